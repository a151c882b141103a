//! Recording stand-in for the HTTP backend, used by search tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::api_client::ResumeBackend;
use crate::errors::SearchError;
use crate::models::{ClearCacheRequest, ClearCacheResponse, ParseResumeResponse};

pub struct FakeBackend {
    parse_reply: Mutex<Result<ParseResumeResponse, SearchError>>,
    clear_reply: Mutex<Result<ClearCacheResponse, SearchError>>,
    parse_args: Mutex<Vec<(String, String, bool)>>,
    clear_requests: Mutex<Vec<ClearCacheRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            parse_reply: Mutex::new(Ok(parse_response(&[], None))),
            clear_reply: Mutex::new(Ok(ClearCacheResponse {
                success: true,
                message: "Cache cleared".to_string(),
                error: None,
            })),
            parse_args: Mutex::new(Vec::new()),
            clear_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_parse_reply(self, reply: Result<ParseResumeResponse, SearchError>) -> Self {
        *self.parse_reply.lock().unwrap() = reply;
        self
    }

    pub fn with_clear_reply(self, reply: Result<ClearCacheResponse, SearchError>) -> Self {
        *self.clear_reply.lock().unwrap() = reply;
        self
    }

    pub fn set_parse_reply(&self, reply: Result<ParseResumeResponse, SearchError>) {
        *self.parse_reply.lock().unwrap() = reply;
    }

    pub fn parse_calls(&self) -> usize {
        self.parse_args.lock().unwrap().len()
    }

    pub fn last_parse_args(&self) -> Option<(String, String, bool)> {
        self.parse_args.lock().unwrap().last().cloned()
    }

    pub fn clear_requests(&self) -> Vec<ClearCacheRequest> {
        self.clear_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeBackend for FakeBackend {
    async fn parse_resumes(
        &self,
        dir_path: &str,
        query: &str,
        force_analyze: bool,
    ) -> Result<ParseResumeResponse, SearchError> {
        self.parse_args.lock().unwrap().push((
            dir_path.to_string(),
            query.to_string(),
            force_analyze,
        ));
        self.parse_reply.lock().unwrap().clone()
    }

    async fn clear_cache(
        &self,
        request: &ClearCacheRequest,
    ) -> Result<ClearCacheResponse, SearchError> {
        self.clear_requests.lock().unwrap().push(request.clone());
        self.clear_reply.lock().unwrap().clone()
    }
}

/// A response with one resume per score, named `r0.pdf`, `r1.pdf`, ...
pub fn parse_response(scores: &[Option<f64>], cache_key: Option<&str>) -> ParseResumeResponse {
    let result: Vec<_> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            json!({
                "name": format!("Candidate {i}"),
                "source_file": format!("r{i}.pdf"),
                "match_score": score
            })
        })
        .collect();

    let cache_info = cache_key.map(|key| {
        json!({
            "cache_key": key,
            "vector_cache_hit": true,
            "gemini_cache_hit": false,
            "total_resumes": 20,
            "filtered_resumes": scores.len()
        })
    });

    serde_json::from_value(json!({ "result": result, "cache_info": cache_info })).unwrap()
}
