//! Persisted result store.
//!
//! Holds the most recent [`DisplayResult`] between the search view and the
//! results view. Only one entry is kept; every save overwrites it. Storage
//! failures are logged and never reach the caller.

mod file;
mod memory;

pub use file::FileResultStore;
pub use memory::MemoryResultStore;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{StoreBackend, StoreConfig};
use crate::merge::DisplayResult;

/// Fixed key of the stored entry.
pub const RESULT_STORAGE_KEY: &str = "anisauce:lastResult";

/// What is written under [`RESULT_STORAGE_KEY`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    /// Milliseconds since the Unix epoch.
    pub saved_at: i64,
    pub result: DisplayResult,
}

impl StoredResult {
    pub fn new(result: DisplayResult) -> Self {
        Self {
            saved_at: Utc::now().timestamp_millis(),
            result,
        }
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.saved_at)
    }
}

/// Session-scoped slot for the last result.
pub trait ResultStore: Send + Sync {
    /// Overwrite the stored result.
    fn save(&self, result: &DisplayResult);

    /// The stored entry, or `None` when absent, unreadable or unavailable.
    fn load_entry(&self) -> Option<StoredResult>;

    /// The stored result, or `None` when absent, unreadable or unavailable.
    fn load(&self) -> Option<DisplayResult> {
        self.load_entry().map(|entry| entry.result)
    }
}

/// Store used when there is no session storage at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl ResultStore for UnavailableStore {
    fn save(&self, _result: &DisplayResult) {
        warn!("No session storage available; result not persisted");
    }

    fn load_entry(&self) -> Option<StoredResult> {
        None
    }
}

/// Build the store selected in the config.
pub fn create_result_store(config: &StoreConfig) -> Arc<dyn ResultStore> {
    match config.backend {
        StoreBackend::File => Arc::new(FileResultStore::new(&config.session_dir)),
        StoreBackend::Memory => Arc::new(MemoryResultStore::new()),
        StoreBackend::None => Arc::new(UnavailableStore),
    }
}

/// Parse stored text, logging instead of failing.
pub(crate) fn decode_entry(raw: &str) -> Option<StoredResult> {
    match serde_json::from_str(raw) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("Failed to parse stored result: {}", e);
            None
        }
    }
}

/// Serialize an entry, logging instead of failing.
pub(crate) fn encode_entry(result: &DisplayResult) -> Option<String> {
    match serde_json::to_string(&StoredResult::new(result.clone())) {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!("Failed to persist result: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_unavailable_store() {
        let store = UnavailableStore;
        store.save(&fixtures::display_result("Mononoke"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_stored_layout() {
        let raw = encode_entry(&fixtures::display_result("Mononoke")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["savedAt"].as_i64().unwrap() > 0);
        assert_eq!(value["result"]["animeTitle"], "Mononoke");
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_entry("{not json").is_none());
        assert!(decode_entry(r#"{"savedAt": 1}"#).is_none());
    }

    #[test]
    fn test_saved_at_timestamp() {
        let entry = StoredResult {
            saved_at: 1_700_000_000_000,
            result: fixtures::display_result("Mononoke"),
        };
        assert_eq!(entry.saved_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_create_result_store_by_backend() {
        let store = create_result_store(&StoreConfig {
            backend: StoreBackend::Memory,
            ..StoreConfig::default()
        });
        store.save(&fixtures::display_result("Paprika"));
        assert_eq!(store.load().unwrap().anime_title, "Paprika");

        let store = create_result_store(&StoreConfig {
            backend: StoreBackend::None,
            ..StoreConfig::default()
        });
        store.save(&fixtures::display_result("Paprika"));
        assert!(store.load().is_none());
    }
}
