/// API client for the resume-parsing backend.
///
/// The backend does all parsing, scoring and caching. This module only turns
/// typed requests into HTTP calls and HTTP answers into typed results or
/// `SearchError`s. It never filters or re-scores what comes back.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::SearchError;
use crate::models::{ClearCacheRequest, ClearCacheResponse, ParseResumeResponse};

const PARSE_RESUME_PATH: &str = "/parse-resume";
const CLEAR_CACHE_PATH: &str = "/clear-cache";
const PARSE_FAILED_FALLBACK: &str = "Failed to fetch results";
const CLEAR_FAILED_FALLBACK: &str = "Failed to clear cache";

/// The two backend operations the rest of the client depends on.
///
/// Orchestration holds an `Arc<dyn ResumeBackend>` so tests can swap in a
/// recording fake without touching HTTP.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    async fn parse_resumes(
        &self,
        dir_path: &str,
        query: &str,
        force_analyze: bool,
    ) -> Result<ParseResumeResponse, SearchError>;

    async fn clear_cache(
        &self,
        request: &ClearCacheRequest,
    ) -> Result<ClearCacheResponse, SearchError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseResumeRequest<'a> {
    dir_path: &'a str,
    query: &'a str,
    force_analyze: bool,
}

/// HTTP implementation of [`ResumeBackend`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs `body` and returns the status code with the raw body text.
    /// Anything that prevents reading a response is a `Network` failure.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(reqwest::StatusCode, String), SearchError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        debug!("{} answered {} ({} bytes)", path, status, text.len());
        Ok((status, text))
    }
}

#[async_trait]
impl ResumeBackend for ApiClient {
    async fn parse_resumes(
        &self,
        dir_path: &str,
        query: &str,
        force_analyze: bool,
    ) -> Result<ParseResumeResponse, SearchError> {
        debug!(
            "Requesting resume parse: dir={}, query={}, force={}",
            dir_path, query, force_analyze
        );

        let body = ParseResumeRequest {
            dir_path,
            query,
            force_analyze,
        };
        let (status, text) = self.post_json(PARSE_RESUME_PATH, &body).await?;

        if !status.is_success() {
            let message = error_message(&text).unwrap_or_else(|| PARSE_FAILED_FALLBACK.to_string());
            warn!("Resume parse failed with {}: {}", status, message);
            return Err(SearchError::Request {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = decode_parse_response(&text)?;
        debug!(
            "Resume parse returned {} candidates (cache info: {})",
            parsed.result.len(),
            parsed.cache_info.is_some()
        );
        Ok(parsed)
    }

    async fn clear_cache(
        &self,
        request: &ClearCacheRequest,
    ) -> Result<ClearCacheResponse, SearchError> {
        debug!("Requesting cache clear: scope={}", request.scope());

        let (status, text) = self.post_json(CLEAR_CACHE_PATH, request).await?;

        if !status.is_success() {
            let message = error_message(&text).unwrap_or_else(|| CLEAR_FAILED_FALLBACK.to_string());
            warn!("Cache clear failed with {}: {}", status, message);
            return Err(SearchError::Request {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| SearchError::Decode(e.to_string()))
    }
}

/// A 2xx body may still be a failure: the backend reports some errors as
/// `{"error": "..."}` with status 200.
fn decode_parse_response(text: &str) -> Result<ParseResumeResponse, SearchError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| SearchError::Decode(e.to_string()))?;

    if let Some(message) = error_field(&value) {
        warn!("Backend reported a failed search: {}", message);
        return Err(SearchError::Backend(message));
    }

    serde_json::from_value(value).map_err(|e| SearchError::Decode(e.to_string()))
}

/// Pulls a readable message out of an error body, if the body is JSON and has one.
fn error_message(text: &str) -> Option<String> {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|value| error_field(&value))
}

/// Reads `error` as a string, or `error.message` when it is an object.
/// A `null` error means no error.
fn error_field(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => Some(
            obj.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(obj.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_error_field_variants() {
        assert_eq!(error_field(&json!({"error": "bad path"})).as_deref(), Some("bad path"));
        assert_eq!(
            error_field(&json!({"error": {"code": "X", "message": "nested"}})).as_deref(),
            Some("nested")
        );
        assert_eq!(error_field(&json!({"error": null})), None);
        assert_eq!(error_field(&json!({"result": []})), None);
    }

    #[test]
    fn test_error_message_ignores_non_json() {
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
    }

    #[tokio::test]
    async fn test_parse_resumes_sends_camel_case_body() {
        let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let router = Router::new().route(
            "/parse-resume",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    captured.lock().unwrap().push(body);
                    Json(json!({
                        "result": [
                            {"name": "Asha", "source_file": "asha.pdf", "match_score": 91}
                        ],
                        "cache_info": {
                            "cache_key": "5f2a9c0e77",
                            "vector_cache_hit": false,
                            "gemini_cache_hit": true,
                            "total_resumes": 25,
                            "filtered_resumes": 4,
                            "processing_time": 3.2
                        }
                    }))
                }
            }),
        );
        let base = spawn_backend(router).await;

        let response = client(&base)
            .parse_resumes("C:/resumes", "java, kafka", true)
            .await
            .unwrap();

        assert_eq!(response.result.len(), 1);
        assert_eq!(response.result[0].match_score, Some(91.0));
        let info = response.cache_info.unwrap();
        assert_eq!(info.cache_key, "5f2a9c0e77");
        assert!(info.gemini_cache_hit);

        let bodies = seen.lock().unwrap();
        assert_eq!(
            bodies[0],
            json!({"dirPath": "C:/resumes", "query": "java, kafka", "forceAnalyze": true})
        );
    }

    #[tokio::test]
    async fn test_parse_resumes_error_in_ok_body_is_backend_error() {
        let router = Router::new().route(
            "/parse-resume",
            post(|| async { Json(json!({"error": "bad path"})) }),
        );
        let base = spawn_backend(router).await;

        let err = client(&base)
            .parse_resumes("/missing", "rust", false)
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::Backend("bad path".to_string()));
    }

    #[tokio::test]
    async fn test_parse_resumes_http_error_uses_body_message() {
        let router = Router::new().route(
            "/parse-resume",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Gemini quota exhausted"})),
                )
            }),
        );
        let base = spawn_backend(router).await;

        let err = client(&base)
            .parse_resumes("/resumes", "python", false)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::Request {
                status: 500,
                message: "Gemini quota exhausted".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_parse_resumes_http_error_falls_back_to_generic_message() {
        let router = Router::new().route(
            "/parse-resume",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base = spawn_backend(router).await;

        let err = client(&base)
            .parse_resumes("/resumes", "python", false)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::Request {
                status: 502,
                message: "Failed to fetch results".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_parse_resumes_malformed_ok_body_is_decode_error() {
        let router = Router::new().route(
            "/parse-resume",
            post(|| async { Json(json!({"result": "not a list"})) }),
        );
        let base = spawn_backend(router).await;

        let err = client(&base)
            .parse_resumes("/resumes", "go", false)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn test_empty_search_with_null_cache_key_decodes() {
        let parsed = decode_parse_response(
            r#"{"result": [], "cache_info": {"gemini_cache_hit": false, "vector_cache_hit": false, "cache_key": null, "processing_time": null, "total_resumes": 0, "filtered_resumes": 0, "batches_processed": 0, "total_batches": 0}}"#,
        )
        .unwrap();

        assert!(parsed.result.is_empty());
        let info = parsed.cache_info.unwrap();
        assert_eq!(info.cache_key, "");
        assert_eq!(info.processing_time, None);
        assert_eq!(info.total_batches, Some(0));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .parse_resumes("/resumes", "go", false)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_clear_cache_sends_scope_and_reads_in_band_failure() {
        let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let router = Router::new().route(
            "/clear-cache",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    captured.lock().unwrap().push(body);
                    Json(json!({
                        "success": false,
                        "message": "",
                        "error": "Cache entry not found"
                    }))
                }
            }),
        );
        let base = spawn_backend(router).await;
        let api = client(&base);

        let response = api
            .clear_cache(&ClearCacheRequest::Current {
                cache_key: "abc123".to_string(),
            })
            .await
            .unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Cache entry not found"));

        api.clear_cache(&ClearCacheRequest::All).await.unwrap();

        let bodies = seen.lock().unwrap();
        assert_eq!(bodies[0], json!({"type": "current", "cache_key": "abc123"}));
        assert_eq!(bodies[1], json!({"type": "all"}));
    }

    #[tokio::test]
    async fn test_clear_cache_http_error_is_request_error() {
        let router = Router::new().route(
            "/clear-cache",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "") }),
        );
        let base = spawn_backend(router).await;

        let err = client(&base)
            .clear_cache(&ClearCacheRequest::All)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::Request {
                status: 503,
                message: "Failed to clear cache".to_string()
            }
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = client("http://localhost:8000/");
        assert_eq!(api.endpoint(PARSE_RESUME_PATH), "http://localhost:8000/parse-resume");
        assert_eq!(api.base_url(), "http://localhost:8000");
    }
}
