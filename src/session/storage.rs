//! Durable key/value session storage backends.

use std::{fs, io, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to persist session storage")]
    Io(#[from] io::Error),

    #[error("failed to serialize session storage")]
    Serialize(#[source] serde_json::Error),
}

/// Flat key/value storage for serialized session state.
///
/// Mirrors the durable client-side storage of the console: string keys,
/// string values, nothing more.
pub trait SessionStorage: Send {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error when the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error when the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage; state lives for the process only.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: FxHashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);

        Ok(())
    }
}

/// Storage persisted as a single JSON document on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    slots: FxHashMap<String, String>,
}

impl FileStorage {
    /// Open storage at `path`, creating it lazily on first write.
    ///
    /// An unreadable or corrupt file reads as empty storage rather than an
    /// error; stored session state is reconstructible by logging in again.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let slots = match fs::read_to_string(&path) {
            Ok(body) => match serde_json::from_str(&body) {
                Ok(slots) => slots,
                Err(error) => {
                    warn!("discarding corrupt session storage file: {error}");

                    FxHashMap::default()
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => FxHashMap::default(),
            Err(error) => {
                warn!("session storage file unreadable, starting empty: {error}");

                FxHashMap::default()
            }
        };

        Self { path, slots }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let body =
            serde_json::to_string_pretty(&self.slots).map_err(StorageError::Serialize)?;

        fs::write(&self.path, body)?;

        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());

        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.slots.remove(key).is_some() {
            self.persist()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn file_storage_round_trips_across_reopen() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        let mut storage = FileStorage::open(&path);

        storage.set("token", "tba_v1.abc")?;
        storage.set("profile", "{}")?;

        let reopened = FileStorage::open(&path);

        assert_eq!(reopened.get("token").as_deref(), Some("tba_v1.abc"));
        assert_eq!(reopened.get("profile").as_deref(), Some("{}"));

        Ok(())
    }

    #[test]
    fn file_storage_remove_persists() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        let mut storage = FileStorage::open(&path);

        storage.set("token", "value")?;
        storage.remove("token")?;

        let reopened = FileStorage::open(&path);

        assert!(reopened.get("token").is_none());

        Ok(())
    }

    #[test]
    fn corrupt_file_reads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        fs::write(&path, "not json")?;

        let storage = FileStorage::open(&path);

        assert!(storage.get("token").is_none());

        Ok(())
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let storage = FileStorage::open("/nonexistent/dir/session.json");

        assert!(storage.get("token").is_none());
    }
}
