//! Key-value storage abstraction layer.
//!
//! The client persists a handful of small records (the session being the
//! important one) under fixed keys. This module hides where they live so the
//! session store can run against the local filesystem in the app and against
//! memory in tests.
//!
//! # Example
//!
//! ```ignore
//! use tutorlink_core::storage::{KeyValueStorage, LocalFileStorage};
//!
//! let storage = LocalFileStorage::new("./.tutorlink");
//!
//! storage.save("auth-store", "{}").await?;
//! assert_eq!(storage.load("auth-store").await?.as_deref(), Some("{}"));
//! storage.remove("auth-store").await?;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::fs;
use tracing::debug;

/// Boxed future returned by [`KeyValueStorage`] operations.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Abstract trait for durable key-value backends.
///
/// Implementations can be swapped without changing the session logic. The
/// only contract is that a successful `save` survives a process restart and
/// `load` returns the last successful `save` (or `None`).
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been stored under the key.
    fn load<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>>;

    /// Replace the value stored under `key`.
    fn save<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a, ()>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;
}

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Filesystem-backed storage: one JSON file per key inside `base_dir`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Validate key format to prevent path traversal.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") {
            return Err(StorageError::InvalidKey(
                "Key must not be empty or contain '..'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Self::validate_key(key)?;
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for LocalFileStorage {
    fn load<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            let path = self.path_for(key)?;

            match fs::read_to_string(&path).await {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn save<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            fs::create_dir_all(&self.base_dir).await?;

            // Write beside the target and rename so a crash never leaves a
            // half-written record behind.
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, value.as_bytes()).await?;
            fs::rename(&tmp, &path).await?;

            debug!(storage.key = %key, storage.path = %path.display(), "Record saved");
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let path = self.path_for(key)?;

            match fs::remove_file(&path).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }
}

/// In-memory storage. Clones share the same map, so a test can hand one
/// clone to a store, drop the store, and rehydrate a new one from another
/// clone to simulate a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous peek at a stored value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Synchronous write, bypassing the async trait. Handy for seeding.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move { Ok(self.get(key)) })
    }

    fn save<'a>(&'a self, key: &'a str, value: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.insert(key, value);
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.lock().remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(LocalFileStorage::validate_key("auth-store").is_ok());
        assert!(LocalFileStorage::validate_key("prefs_v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(LocalFileStorage::validate_key("../auth-store").is_err());
        assert!(LocalFileStorage::validate_key("nested/auth-store").is_err());
        assert!(LocalFileStorage::validate_key("").is_err());
    }

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("data"));

        assert_eq!(storage.load("auth-store").await.unwrap(), None);

        storage.save("auth-store", "first").await.unwrap();
        storage.save("auth-store", "second").await.unwrap();
        assert_eq!(
            storage.load("auth-store").await.unwrap().as_deref(),
            Some("second")
        );
        assert!(!dir.path().join("data/auth-store.json.tmp").exists());

        storage.remove("auth-store").await.unwrap();
        assert_eq!(storage.load("auth-store").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        assert!(storage.remove("never-written").await.is_ok());
    }

    #[tokio::test]
    async fn test_file_storage_rejects_bad_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        let err = storage.save("../escape", "x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.save("k", "v").await.unwrap();
        assert_eq!(other.load("k").await.unwrap().as_deref(), Some("v"));

        other.remove("k").await.unwrap();
        assert_eq!(storage.get("k"), None);
    }
}
