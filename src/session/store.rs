//! Key-value stores backing the session
//!
//! The browser keeps session values in `localStorage`; natively they live in a
//! small JSON file. Both sit behind [`KeyValueStore`].

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors writing to a session store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the stored values failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing storage cannot be reached (e.g. browser storage disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// String-keyed persistent storage
pub trait KeyValueStore {
    /// Read a value. Read failures are reported as absent.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use super::{KeyValueStore, StoreError};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// JSON-object file store. Every write rewrites the whole file.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        values: BTreeMap<String, String>,
    }

    impl FileStore {
        /// Open the store at `path`. A missing file is an empty store; an
        /// unreadable or malformed one is logged and treated as empty.
        pub fn open(path: impl AsRef<Path>) -> Self {
            let path = path.as_ref().to_path_buf();
            let values = match std::fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(values) => values,
                    Err(e) => {
                        tracing::warn!("Ignoring malformed session file {:?}: {}", path, e);
                        BTreeMap::new()
                    }
                },
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
                Err(e) => {
                    tracing::warn!("Cannot read session file {:?}: {}", path, e);
                    BTreeMap::new()
                }
            };

            Self { path, values }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let content = serde_json::to_string_pretty(&self.values)?;
            std::fs::write(&self.path, content)?;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.values.insert(key.to_string(), value.to_string());
            self.flush()
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            if self.values.remove(key).is_some() {
                self.flush()?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("abc"));
        store.remove("token").unwrap();
        assert!(store.get("token").is_none());
        assert!(store.is_empty());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = FileStore::open(&path);
        store.set("role", "doctor").unwrap();
        store.set("token", "tok").unwrap();
        store.remove("token").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("role").as_deref(), Some("doctor"));
        assert!(reopened.get("token").is_none());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_ignores_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert!(store.get("role").is_none());
    }
}
