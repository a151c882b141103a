//! Plain-text rendering of session state for the terminal.
//!
//! Every renderer returns a `String` so output can be asserted in tests and
//! written to stdout by the CLI.

pub mod cache_status;
pub mod details;
pub mod table;

pub use cache_status::render_cache_status;
pub use details::render_details;
pub use table::render_table;

use crate::models::{CacheInfo, Resume};

/// Placeholder for anything the backend could not extract.
pub const MISSING: &str = "—";

/// Header line. Prefers the backend's total resume count and falls back to
/// the number of rows on screen.
pub fn render_header(resumes: &[Resume], cache_info: Option<&CacheInfo>) -> String {
    let count = cache_info
        .map(|info| info.total_resumes)
        .filter(|total| *total > 0)
        .unwrap_or(resumes.len() as u64);
    format!("Resume Finder ({count} resumes)")
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() {
        MISSING
    } else {
        value
    }
}

fn join_or_missing(items: &[String]) -> String {
    if items.is_empty() {
        MISSING.to_string()
    } else {
        items.join(", ")
    }
}

fn experience(resume: &Resume) -> String {
    match resume.years_of_experience {
        Some(years) if years != 0.0 => format!("{years} years"),
        _ => format!("{MISSING} years"),
    }
}
