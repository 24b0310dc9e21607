use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::TutorError;

/// Minimal key-value persistence capability backing the transcript store.
///
/// Keys are plain strings, values are opaque text records. Swapping the
/// implementation (file tree, embedded store, in-memory for tests) must not
/// change the transcript store's contract.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, TutorError>;
    fn set(&self, key: &str, value: &str) -> Result<(), TutorError>;
    fn remove(&self, key: &str) -> Result<(), TutorError>;
}

/// File-per-key store under a base directory.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Store under the default location (`~/.numcalc/history/`).
    pub fn new() -> Result<Self, TutorError> {
        let home = dirs::home_dir()
            .ok_or_else(|| TutorError::Config("Could not determine home directory".to_string()))?;
        Self::with_dir(home.join(".numcalc").join("history"))
    }

    /// Store under a custom directory (useful for testing).
    pub fn with_dir(base_dir: PathBuf) -> Result<Self, TutorError> {
        fs::create_dir_all(&base_dir).map_err(|e| {
            TutorError::Config(format!("Failed to create history directory: {}", e))
        })?;
        Ok(Self { base_dir })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        // Keys are internal identifiers; replace anything path-hostile anyway.
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.base_dir.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TutorError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TutorError> {
        let path = self.record_path(key);
        // Write-then-rename so a crash never leaves a half-written record.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TutorError> {
        let path = self.record_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// In-memory store for unit tests and the disabled-persistence case.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TutorError> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TutorError> {
        self.records.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TutorError> {
        self.records.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.get("chat_history_errors").unwrap(), None);
        store.set("chat_history_errors", "[1,2,3]").unwrap();
        assert_eq!(
            store.get("chat_history_errors").unwrap().as_deref(),
            Some("[1,2,3]")
        );

        store.remove("chat_history_errors").unwrap();
        assert_eq!(store.get("chat_history_errors").unwrap(), None);
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
        store.remove("never_written").unwrap();
    }

    #[test]
    fn hostile_key_characters_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
        store.set("a/../b", "x").unwrap();
        assert_eq!(store.get("a/../b").unwrap().as_deref(), Some("x"));
        // Nothing escaped the base directory.
        assert!(dir.path().join("a____b.json").exists());
    }
}
