use std::fmt::Write;

use crate::models::Resume;
use crate::search::ScoreBand;

use super::{experience, join_or_missing, or_missing};

/// Full view of one candidate, the terminal counterpart of the details modal.
pub fn render_details(resume: &Resume) -> String {
    let score = resume.score();
    let band = ScoreBand::from_score(score);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", or_missing(&resume.name));
    let _ = writeln!(out, "  Source file : {}", or_missing(&resume.source_file));
    let _ = writeln!(out, "  Contact     : {}", or_missing(&resume.contact_number));
    let _ = writeln!(out, "  Experience  : {}", experience(resume));
    let _ = writeln!(out, "  Match score : {score}% {} {}", band.glyph(), band.label());
    if let Some(breakdown) = resume.score_breakdown.as_deref().filter(|b| !b.trim().is_empty()) {
        let _ = writeln!(out, "  Breakdown   : {breakdown}");
    }
    let _ = writeln!(
        out,
        "  Companies   : {}",
        join_or_missing(&resume.valid_companies())
    );
    let _ = writeln!(
        out,
        "  Key skills  : {}",
        join_or_missing(&resume.top_5_technical_skills)
    );
    let summary = resume
        .summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("No summary available.");
    let _ = writeln!(out, "\n  {summary}");
    out
}
