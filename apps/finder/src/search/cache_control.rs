use tracing::{info, warn};

use crate::errors::SearchError;
use crate::models::{ClearCacheRequest, ClearCacheResponse};
use crate::search::session::SearchSession;

const NO_CURRENT_CACHE: &str = "No current cache to clear. Please perform a search first.";

impl SearchSession {
    /// Clears the backend cache entry of the last successful search.
    ///
    /// Fails locally when no cache key is held. Displayed results are left
    /// alone either way.
    pub async fn clear_current(&mut self) -> Result<ClearCacheResponse, SearchError> {
        let cache_key = self
            .cache_key()
            .map(str::to_string)
            .ok_or_else(|| SearchError::Precondition(NO_CURRENT_CACHE.to_string()))?;

        self.clear_key(&cache_key).await
    }

    /// Clears the entry named by `cache_key`, e.g. one printed by an earlier
    /// run. A blank key is rejected without contacting the backend.
    pub async fn clear_key(&self, cache_key: &str) -> Result<ClearCacheResponse, SearchError> {
        if cache_key.trim().is_empty() {
            return Err(SearchError::Precondition(NO_CURRENT_CACHE.to_string()));
        }

        let request = ClearCacheRequest::Current {
            cache_key: cache_key.to_string(),
        };
        let response = self.backend.clear_cache(&request).await?;
        ensure_cleared(&request, response)
    }

    /// Clears every backend cache. On success the held cache info (and with
    /// it the cache key) is dropped too, since it no longer refers to anything.
    pub async fn clear_all(&mut self) -> Result<ClearCacheResponse, SearchError> {
        let request = ClearCacheRequest::All;
        let response = self.backend.clear_cache(&request).await?;
        let response = ensure_cleared(&request, response)?;

        self.cache_info = None;
        Ok(response)
    }
}

fn ensure_cleared(
    request: &ClearCacheRequest,
    response: ClearCacheResponse,
) -> Result<ClearCacheResponse, SearchError> {
    if response.success {
        info!("Cleared {} cache: {}", request.scope(), response.message);
        Ok(response)
    } else {
        let reason = response.failure_reason();
        warn!("Clearing {} cache failed: {}", request.scope(), reason);
        Err(SearchError::Backend(reason))
    }
}
