use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resume::null_as_empty;
use super::Resume;

/// Cache behaviour of one search, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheInfo {
    /// Opaque handle for the (folder, query) entry. Kept exactly as received;
    /// it is the only way to target that entry in a later clear. The backend
    /// sends `null` when a search ends before anything is cached; that
    /// decodes as empty, which the session treats as "no key".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cache_key: String,
    #[serde(default)]
    pub vector_cache_hit: bool,
    #[serde(default)]
    pub gemini_cache_hit: bool,
    #[serde(default)]
    pub total_resumes: u64,
    #[serde(default)]
    pub filtered_resumes: u64,
    /// Seconds.
    #[serde(default)]
    pub processing_time: Option<f64>,
    #[serde(default)]
    pub total_batches: Option<u32>,
    #[serde(default)]
    pub batches_processed: Option<u32>,
}

/// Successful `/parse-resume` payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParseResumeResponse {
    #[serde(default)]
    pub result: Vec<Resume>,
    /// Older backends answer with `result` only.
    #[serde(default)]
    pub cache_info: Option<CacheInfo>,
    #[serde(default)]
    pub summary: Option<Value>,
}

/// Body of `POST /clear-cache`. `cache_key` is only ever sent for `current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClearCacheRequest {
    Current { cache_key: String },
    All,
}

impl ClearCacheRequest {
    pub fn scope(&self) -> &'static str {
        match self {
            ClearCacheRequest::Current { .. } => "current",
            ClearCacheRequest::All => "all",
        }
    }
}

/// Body of a `/clear-cache` answer. Failure is reported in-band via `success`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl ClearCacheResponse {
    /// Best human-readable reason for a `success: false` answer.
    pub fn failure_reason(&self) -> String {
        match &self.error {
            Some(e) if !e.trim().is_empty() => e.clone(),
            _ if !self.message.trim().is_empty() => self.message.clone(),
            _ => "Failed to clear cache".to_string(),
        }
    }
}
