//! Mock AniList lookup for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::anilist::{CatalogRecord, LookupError, MediaLookup};

/// Mock implementation of the MediaLookup trait.
///
/// Provides controllable behavior for testing:
/// - Serve configured media entries by id
/// - Track requested ids for assertions
/// - Simulate failures and slow responses
#[derive(Debug, Clone)]
pub struct MockMediaLookup {
    /// Media entries by AniList id.
    media: Arc<RwLock<HashMap<u64, CatalogRecord>>>,
    /// Requested ids, in order.
    requests: Arc<RwLock<Vec<u64>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<LookupError>>>,
    /// Simulated response time.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl Default for MockMediaLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMediaLookup {
    /// Create a new empty mock lookup.
    pub fn new() -> Self {
        Self {
            media: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a media entry.
    pub async fn add_media(&self, media: CatalogRecord) {
        self.media.write().await.insert(media.id, media);
    }

    /// Clear all media entries.
    pub async fn clear_media(&self) {
        self.media.write().await.clear();
    }

    /// Get all requested ids.
    pub async fn recorded_requests(&self) -> Vec<u64> {
        self.requests.read().await.clone()
    }

    /// Get the number of lookups performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: LookupError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every lookup take this long.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }
}

#[async_trait]
impl MediaLookup for MockMediaLookup {
    async fn fetch_media(&self, id: u64) -> Result<Option<CatalogRecord>, LookupError> {
        self.requests.write().await.push(id);

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.media.read().await.get(&id).cloned())
    }
}
