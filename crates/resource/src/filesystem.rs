//! Filesystem-backed cache store.
//!
//! Each key is stored as its own JSON file under a base directory. Writes go
//! to a uniquely named temporary file first and are renamed into place, so a
//! reader never observes a half-written entry and concurrent writers to the
//! same key simply race for the last rename.

use async_trait::async_trait;
use fontsheet_traits::{CacheStore, StoreError};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A cache store that keeps one file per key under `base_path`.
///
/// Keys are percent-encoded into file names, so no key can address a path
/// outside the base directory.
#[derive(Debug)]
pub struct FilesystemCacheStore {
    base_path: PathBuf,
}

impl FilesystemCacheStore {
    /// Creates the store, creating the base directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        tokio::fs::create_dir_all(&base_path).await?;
        Ok(Self { base_path })
    }

    /// Returns the base path for this store.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", encode_key(key)))
    }
}

/// Bytes kept as-is in file names: `[A-Za-z0-9._-]`.
const KEY_SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'_').remove(b'-');

fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_SAFE).to_string()
}

#[async_trait]
impl CacheStore for FilesystemCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.entry_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.entry_path(key);
        let temp_path = path.with_extension(format!("{:016x}.tmp", rand::random::<u64>()));
        let write_failed = |e: std::io::Error| StoreError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        };

        tokio::fs::write(&temp_path, value).await.map_err(write_failed)?;
        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(write_failed(e));
        }
        log::debug!("Stored cache entry '{}' at {}", key, path.display());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "FilesystemCacheStore"
    }
}
