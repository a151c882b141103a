use std::fmt;

use thiserror::Error;

/// Which search precondition was not met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    NoFolder,
    NoSkills,
}

impl ValidationKind {
    /// Short machine-readable code ("no-folder" / "no-skills").
    pub fn code(self) -> &'static str {
        match self {
            ValidationKind::NoFolder => "no-folder",
            ValidationKind::NoSkills => "no-skills",
        }
    }

    /// The prompt shown to the user.
    pub fn prompt(self) -> &'static str {
        match self {
            ValidationKind::NoFolder => "Please select a folder first.",
            ValidationKind::NoSkills => "Please enter at least one skill to search for.",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt())
    }
}

/// Every failure a search or cache action can surface to the user.
///
/// Variants carry messages rather than transport handles so the session can
/// keep the last failure around for display.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    /// Missing folder or skills; raised before any network call.
    #[error("{0}")]
    Validation(ValidationKind),

    /// No response at all (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response.
    #[error("Request failed (status {status}): {message}")]
    Request { status: u16, message: String },

    /// 2xx response whose payload reports a failure.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Local check failed; nothing was sent.
    #[error("{0}")]
    Precondition(String),

    /// 2xx response that does not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl SearchError {
    /// Whether repeating the same action unchanged could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SearchError::Network(_) | SearchError::Request { .. })
    }
}
