//! The stateful side of searching: what is currently displayed, and which
//! in-flight search is allowed to replace it.
//!
//! Every search gets a ticket from a monotonically increasing counter. Only the
//! ticket issued most recently may apply its outcome; anything older finished
//! after the user had already moved on and is dropped.

use std::sync::Arc;

use tracing::debug;

use crate::api_client::ResumeBackend;
use crate::errors::SearchError;
use crate::models::{CacheInfo, Resume};
use crate::search::orchestration::{perform_search, SearchOutcome, SearchRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Succeeded,
    Failed(SearchError),
}

/// Identifies one search started via [`SearchSession::begin_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// What happened when an outcome was handed back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchUpdate {
    Applied { resumes: usize },
    /// A newer search started since this one; nothing changed.
    Superseded,
}

pub struct SearchSession {
    pub(super) backend: Arc<dyn ResumeBackend>,
    pub(super) resumes: Vec<Resume>,
    pub(super) cache_info: Option<CacheInfo>,
    phase: SearchPhase,
    generation: u64,
}

impl SearchSession {
    pub fn new(backend: Arc<dyn ResumeBackend>) -> Self {
        Self {
            backend,
            resumes: Vec::new(),
            cache_info: None,
            phase: SearchPhase::Idle,
            generation: 0,
        }
    }

    pub fn backend(&self) -> Arc<dyn ResumeBackend> {
        Arc::clone(&self.backend)
    }

    pub fn resumes(&self) -> &[Resume] {
        &self.resumes
    }

    pub fn cache_info(&self) -> Option<&CacheInfo> {
        self.cache_info.as_ref()
    }

    /// The key of the last successful search, if the backend sent a usable one.
    pub fn cache_key(&self) -> Option<&str> {
        self.cache_info
            .as_ref()
            .map(|info| info.cache_key.as_str())
            .filter(|key| !key.is_empty())
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// 1-based lookup, matching the row numbers shown in the table.
    pub fn resume_at(&self, row: usize) -> Option<&Resume> {
        row.checked_sub(1).and_then(|i| self.resumes.get(i))
    }

    /// Validates and, if valid, starts a new search: previous results and
    /// cache status are cleared and any older ticket becomes stale.
    /// An invalid request leaves everything as it was.
    pub fn begin_search(&mut self, request: &SearchRequest) -> Result<SearchTicket, SearchError> {
        request.validate()?;

        self.generation += 1;
        self.resumes.clear();
        self.cache_info = None;
        self.phase = SearchPhase::Searching;

        debug!("Search #{} started", self.generation);
        Ok(SearchTicket(self.generation))
    }

    /// Applies the outcome of the search identified by `ticket`.
    ///
    /// Success replaces results and cache info together. Failure leaves the
    /// cleared state from `begin_search` and is returned to the caller. Stale
    /// tickets change nothing, whatever their outcome.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<SearchOutcome, SearchError>,
    ) -> Result<SearchUpdate, SearchError> {
        if ticket.0 != self.generation {
            debug!(
                "Dropping outcome of search #{} (latest is #{})",
                ticket.0, self.generation
            );
            return Ok(SearchUpdate::Superseded);
        }

        match outcome {
            Ok(outcome) => {
                let count = outcome.resumes.len();
                self.resumes = outcome.resumes;
                self.cache_info = outcome.cache_info;
                self.phase = SearchPhase::Succeeded;
                Ok(SearchUpdate::Applied { resumes: count })
            }
            Err(e) => {
                self.phase = SearchPhase::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Runs a whole search against this session's backend.
    pub async fn search(&mut self, request: &SearchRequest) -> Result<SearchUpdate, SearchError> {
        let ticket = self.begin_search(request)?;
        let backend = self.backend();
        let outcome = perform_search(backend.as_ref(), request).await;
        self.complete_search(ticket, outcome)
    }
}
