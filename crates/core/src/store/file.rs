use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{decode_entry, encode_entry, ResultStore, StoredResult, RESULT_STORAGE_KEY};
use crate::merge::DisplayResult;

/// Store backed by a file in a session directory.
///
/// The file name is derived from [`RESULT_STORAGE_KEY`]; removing the
/// directory ends the session.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    path: PathBuf,
}

impl FileResultStore {
    pub fn new(session_dir: &Path) -> Self {
        Self {
            path: session_dir.join(key_file_name(RESULT_STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, raw: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write then rename so a reader never sees half an entry.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)
    }
}

impl ResultStore for FileResultStore {
    fn save(&self, result: &DisplayResult) {
        let Some(raw) = encode_entry(result) else {
            return;
        };
        match self.write(&raw) {
            Ok(()) => debug!("Persisted result to {:?}", self.path),
            Err(e) => warn!("Failed to persist result to {:?}: {}", self.path, e),
        }
    }

    fn load_entry(&self) -> Option<StoredResult> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_entry(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read stored result from {:?}: {}", self.path, e);
                None
            }
        }
    }
}

fn key_file_name(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{}.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use tempfile::TempDir;

    #[test]
    fn test_key_file_name() {
        assert_eq!(key_file_name(RESULT_STORAGE_KEY), "anisauce-lastResult.json");
    }

    #[test]
    fn test_round_trip_creates_session_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileResultStore::new(&dir.path().join("session"));
        assert!(store.load().is_none());

        let result = fixtures::display_result("Haibane Renmei");
        store.save(&result);
        assert_eq!(store.load(), Some(result));
        assert!(store.load_entry().unwrap().saved_at > 0);
    }

    #[test]
    fn test_load_twice_is_equal() {
        let dir = TempDir::new().unwrap();
        let store = FileResultStore::new(dir.path());
        store.save(&fixtures::display_result("Texhnolyze"));
        let first = store.load();
        let second = store.load();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unparsable_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileResultStore::new(dir.path());
        fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_unwritable_location_does_not_panic() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a dir").unwrap();

        let store = FileResultStore::new(&blocker);
        store.save(&fixtures::display_result("Ergo Proxy"));
        assert!(store.load().is_none());
    }
}
