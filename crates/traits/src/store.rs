//! CacheStore trait for abstracting the persistent key-value store.
//!
//! The store is deliberately dumb: string keys, string values, no expiry and
//! no namespacing beyond the key itself. Everything that gives the values
//! meaning lives in the cache layer of `fontsheet-core`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for store operations.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// A string-keyed get/put store with process-wide durability.
///
/// Implementations must tolerate concurrent writes: `put`s on different keys
/// must not corrupt each other, and concurrent `put`s on the same key may race
/// with the last writer winning.
///
/// # Implementations
///
/// - `FilesystemCacheStore` (in `fontsheet-resource`): one file per key
/// - `InMemoryCacheStore`: process memory only (always available)
#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    /// Returns the value stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removes `key`. Returns `true` if a value was removed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Returns a human-readable name for this store (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory store.
///
/// Values live as long as the process. Useful for tests and for deployments
/// that do not need the cache to survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries in the store.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    ///
    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.entries.read().map(|e| e.is_empty()).unwrap_or(true)
    }

    /// Returns the stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::ReadFailed {
            key: key.to_string(),
            message: "store lock poisoned".to_string(),
        })?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::WriteFailed {
            key: key.to_string(),
            message: "store lock poisoned".to_string(),
        })?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::WriteFailed {
            key: key.to_string(),
            message: "store lock poisoned".to_string(),
        })?;
        Ok(entries.remove(key).is_some())
    }

    fn name(&self) -> &'static str {
        "InMemoryCacheStore"
    }
}
