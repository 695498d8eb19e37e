use std::sync::RwLock;

use tracing::warn;

use super::{decode_entry, encode_entry, ResultStore, StoredResult};
use crate::merge::DisplayResult;

/// In-process store; holds the serialized entry like session storage would.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    slot: RwLock<Option<String>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw stored text (for simulating corrupt storage).
    pub fn set_raw(&self, raw: impl Into<String>) {
        match self.slot.write() {
            Ok(mut slot) => *slot = Some(raw.into()),
            Err(e) => warn!("Result store lock poisoned: {}", e),
        }
    }
}

impl ResultStore for MemoryResultStore {
    fn save(&self, result: &DisplayResult) {
        if let Some(raw) = encode_entry(result) {
            self.set_raw(raw);
        }
    }

    fn load_entry(&self) -> Option<StoredResult> {
        let slot = match self.slot.read() {
            Ok(slot) => slot,
            Err(e) => {
                warn!("Result store lock poisoned: {}", e);
                return None;
            }
        };
        slot.as_deref().and_then(decode_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_empty_store_loads_none() {
        assert!(MemoryResultStore::new().load().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryResultStore::new();
        store.save(&fixtures::display_result("First"));
        store.save(&fixtures::display_result("Second"));
        assert_eq!(store.load().unwrap().anime_title, "Second");
    }

    #[test]
    fn test_load_is_idempotent() {
        let store = MemoryResultStore::new();
        store.save(&fixtures::display_result("Akira"));
        assert_eq!(store.load(), store.load());
    }

    #[test]
    fn test_corrupt_entry_loads_none() {
        let store = MemoryResultStore::new();
        store.set_raw("][");
        assert!(store.load().is_none());
    }
}
