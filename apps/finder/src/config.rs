use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Client configuration loaded from environment variables.
/// Every setting has a default, so a bare environment talks to a local backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// Upper bound on a single backend call. Parsing large folders is slow,
    /// so this is generous; it only exists so a dead backend cannot hang the shell.
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let base_url = std::env::var("RESUME_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match std::env::var("RESUME_API_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            base_url: normalize_base_url(&base_url),
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Replaces the base URL, e.g. from a `--base-url` flag.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }
}

fn parse_timeout_secs(raw: &str) -> Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("RESUME_API_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("RESUME_API_TIMEOUT_SECS must be greater than zero");
    }
    Ok(secs)
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
