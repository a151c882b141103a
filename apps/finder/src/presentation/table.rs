use crate::models::Resume;
use crate::search::ScoreBand;

use super::{experience, join_or_missing, or_missing};

const HEADERS: [&str; 7] = ["#", "Name", "Contact", "Exp", "Companies", "Key Skills", "Score"];
const MAX_CELL_WIDTH: usize = 36;

/// Renders the results table, or the empty-state message when there are no rows.
pub fn render_table(resumes: &[Resume]) -> String {
    if resumes.is_empty() {
        return "No matching resumes found\nTry different skills or select another folder.\n"
            .to_string();
    }

    let rows: Vec<[String; 7]> = resumes
        .iter()
        .enumerate()
        .map(|(i, resume)| row(i + 1, resume))
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn row(index: usize, resume: &Resume) -> [String; 7] {
    let score = resume.score();
    let band = ScoreBand::from_score(score);
    [
        index.to_string(),
        clip(or_missing(&resume.name)),
        clip(or_missing(&resume.contact_number)),
        experience(resume),
        clip(&join_or_missing(&resume.valid_companies())),
        clip(&join_or_missing(&resume.top_5_technical_skills)),
        format!("{score}% {} {}", band.glyph(), band.label()),
    ]
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

/// Cuts long cells to `MAX_CELL_WIDTH` characters, marking the cut with an ellipsis.
fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}
