use tracing::debug;

use crate::api_client::ResumeBackend;
use crate::errors::{SearchError, ValidationKind};
use crate::models::{CacheInfo, Resume};
use crate::search::helpers::sort_by_score;

/// Inputs of one search, exactly as the user entered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub folder_path: String,
    pub skills_query: String,
    /// Ask the backend to bypass its caches and recompute.
    pub force_analyze: bool,
}

impl SearchRequest {
    pub fn new(folder_path: impl Into<String>, skills_query: impl Into<String>) -> Self {
        Self {
            folder_path: folder_path.into(),
            skills_query: skills_query.into(),
            force_analyze: false,
        }
    }

    pub fn forced(mut self, force_analyze: bool) -> Self {
        self.force_analyze = force_analyze;
        self
    }

    /// Folder first, then skills; whitespace-only counts as missing.
    pub fn validate(&self) -> Result<(), SearchError> {
        let missing = if self.folder_path.trim().is_empty() {
            ValidationKind::NoFolder
        } else if self.skills_query.trim().is_empty() {
            ValidationKind::NoSkills
        } else {
            return Ok(());
        };
        debug!("Search rejected before sending: {}", missing.code());
        Err(SearchError::Validation(missing))
    }
}

/// Render-ready result of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Sorted by score, highest first.
    pub resumes: Vec<Resume>,
    /// As received from the backend.
    pub cache_info: Option<CacheInfo>,
}

/// Validates, calls the backend, and sorts. Validation failures never reach
/// the backend; backend failures are returned untouched.
pub async fn perform_search(
    backend: &dyn ResumeBackend,
    request: &SearchRequest,
) -> Result<SearchOutcome, SearchError> {
    request.validate()?;

    let response = backend
        .parse_resumes(
            &request.folder_path,
            &request.skills_query,
            request.force_analyze,
        )
        .await?;

    Ok(SearchOutcome {
        resumes: sort_by_score(response.result),
        cache_info: response.cache_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fake::{parse_response, FakeBackend};

    #[tokio::test]
    async fn test_empty_folder_fails_without_network_call() {
        let backend = FakeBackend::new();
        let err = perform_search(&backend, &SearchRequest::new("", "java"))
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::Validation(ValidationKind::NoFolder));
        assert_eq!(backend.parse_calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_skills_fail_without_network_call() {
        let backend = FakeBackend::new();
        let err = perform_search(&backend, &SearchRequest::new("C:/resumes", "   "))
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::Validation(ValidationKind::NoSkills));
        assert_eq!(backend.parse_calls(), 0);
    }

    #[tokio::test]
    async fn test_folder_is_checked_before_skills() {
        let backend = FakeBackend::new();
        let err = perform_search(&backend, &SearchRequest::new(" ", ""))
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::Validation(ValidationKind::NoFolder));
    }

    #[tokio::test]
    async fn test_results_are_sorted_and_cache_info_passed_through() {
        let backend = FakeBackend::new().with_parse_reply(Ok(parse_response(
            &[Some(50.0), Some(90.0), None],
            Some("key-1"),
        )));

        let outcome = perform_search(&backend, &SearchRequest::new("C:/resumes", "java"))
            .await
            .unwrap();

        let scores: Vec<f64> = outcome.resumes.iter().map(|r| r.score()).collect();
        assert_eq!(scores, vec![90.0, 50.0, 0.0]);
        assert_eq!(outcome.cache_info.unwrap().cache_key, "key-1");
        assert_eq!(backend.parse_calls(), 1);
    }

    #[tokio::test]
    async fn test_force_flag_reaches_backend() {
        let backend = FakeBackend::new().with_parse_reply(Ok(parse_response(&[], None)));
        perform_search(
            &backend,
            &SearchRequest::new("/data/cv", "rust").forced(true),
        )
        .await
        .unwrap();
        assert_eq!(
            backend.last_parse_args(),
            Some(("/data/cv".to_string(), "rust".to_string(), true))
        );
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let backend =
            FakeBackend::new().with_parse_reply(Err(SearchError::Backend("bad path".into())));
        let err = perform_search(&backend, &SearchRequest::new("/nope", "java"))
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::Backend("bad path".into()));
    }
}
