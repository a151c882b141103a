//! Pure helpers shared by orchestration and presentation.

use crate::models::Resume;

/// Drops absent companies: `None`, blank strings, and the literal `"null"`
/// in any case. Order is preserved.
pub fn filter_valid_companies(companies: &[Option<String>]) -> Vec<String> {
    companies
        .iter()
        .flatten()
        .filter(|c| !c.trim().is_empty() && !c.eq_ignore_ascii_case("null"))
        .cloned()
        .collect()
}

/// Orders by score, highest first. Missing scores count as 0 and equal
/// scores keep the backend's order (`sort_by` is stable).
pub fn sort_by_score(mut resumes: Vec<Resume>) -> Vec<Resume> {
    resumes.sort_by(|a, b| b.score().total_cmp(&a.score()));
    resumes
}

/// Coarse quality band for a match score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent, // >= 80
    Good,      // >= 65
    Fair,      // >= 50
    Weak,      // >= 30
    Poor,      // < 30
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Excellent
        } else if score >= 65.0 {
            ScoreBand::Good
        } else if score >= 50.0 {
            ScoreBand::Fair
        } else if score >= 30.0 {
            ScoreBand::Weak
        } else {
            ScoreBand::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Weak => "weak",
            ScoreBand::Poor => "poor",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            ScoreBand::Excellent => '★',
            ScoreBand::Good => '▲',
            ScoreBand::Fair => '✓',
            ScoreBand::Weak => '!',
            ScoreBand::Poor => '✗',
        }
    }
}
