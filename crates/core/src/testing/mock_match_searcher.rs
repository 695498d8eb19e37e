//! Mock trace.moe searcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::input::SearchPayload;
use crate::trace::{MatchError, MatchRecord, MatchSearcher};

/// A recorded search request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedSearch {
    Upload { mime: String, size: usize },
    Url(String),
    Empty,
}

/// Mock implementation of the MatchSearcher trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable result list (first entry wins)
/// - Track searches for assertions
/// - Simulate failures and slow responses
#[derive(Debug, Clone)]
pub struct MockMatchSearcher {
    /// Results returned by every search.
    results: Arc<RwLock<Vec<MatchRecord>>>,
    /// Recorded searches.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<MatchError>>>,
    /// Simulated response time.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl Default for MockMatchSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMatchSearcher {
    /// Create a new mock that finds nothing.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the results returned by searches.
    pub async fn set_results(&self, results: Vec<MatchRecord>) {
        *self.results.write().await = results;
    }

    /// Get all recorded searches.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: MatchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every search take this long.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }
}

#[async_trait]
impl MatchSearcher for MockMatchSearcher {
    async fn search(&self, payload: &SearchPayload) -> Result<MatchRecord, MatchError> {
        let recorded = match (&payload.file, &payload.url) {
            (Some(file), _) => RecordedSearch::Upload {
                mime: file.mime.clone(),
                size: file.bytes.len(),
            },
            (None, Some(url)) => RecordedSearch::Url(url.clone()),
            (None, None) => RecordedSearch::Empty,
        };
        self.searches.write().await.push(recorded.clone());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if recorded == RecordedSearch::Empty {
            return Err(MatchError::MissingInput);
        }

        self.results
            .read()
            .await
            .first()
            .cloned()
            .ok_or(MatchError::NotFound)
    }
}
