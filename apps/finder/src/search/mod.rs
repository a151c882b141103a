// Search orchestration: validation, the backend call, sorting, and the
// session state that results and cache controls live in.

pub mod cache_control;
pub mod helpers;
pub mod orchestration;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use helpers::{filter_valid_companies, ScoreBand};
pub use orchestration::SearchRequest;
pub use session::{SearchPhase, SearchSession, SearchUpdate};
