//! Typed cache of resolved font families on top of a [`CacheStore`].

use crate::request::{FontKind, FontRequest, cache_key};
use chrono::{DateTime, Utc};
use fontsheet_traits::{CacheStore, StoreError};
use fontsheet_types::FontFamilyResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// What is written to the store for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub stored_at: DateTime<Utc>,
    pub result: FontFamilyResult,
}

impl CacheEntry {
    pub fn new(result: FontFamilyResult) -> Self {
        Self {
            stored_at: Utc::now(),
            result,
        }
    }

    /// An entry is fresh forever when there is no TTL.
    pub fn is_fresh(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        let Some(ttl) = ttl else {
            return true;
        };
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now.signed_duration_since(self.stored_at) < ttl,
            // Longer than chrono can represent
            Err(_) => true,
        }
    }
}

/// Read-through cache of [`FontFamilyResult`]s, keyed per [`FontKind`].
///
/// Entries that fail to decode or are past their TTL are treated as misses.
#[derive(Debug, Clone)]
pub struct FontCache {
    store: Arc<dyn CacheStore>,
    ttl: Option<Duration>,
}

impl FontCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store, ttl: None }
    }

    /// Sets the entry lifetime. `None` or a zero duration means never expire.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl.filter(|ttl| !ttl.is_zero());
        self
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    pub async fn get(&self, request: &FontRequest) -> Result<Option<FontFamilyResult>, StoreError> {
        self.get_at(request, Utc::now()).await
    }

    async fn get_at(
        &self,
        request: &FontRequest,
        now: DateTime<Utc>,
    ) -> Result<Option<FontFamilyResult>, StoreError> {
        let key = request.cache_key();
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(None);
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Ignoring unreadable cache entry '{}': {}", key, e);
                return Ok(None);
            }
        };

        if !entry.is_fresh(self.ttl, now) {
            log::debug!("Cache entry '{}' stored at {} has expired", key, entry.stored_at);
            return Ok(None);
        }

        Ok(Some(entry.result))
    }

    /// Stores `result` under the key for `request`.
    ///
    /// Results without a family name are never stored; this returns `false`
    /// for them.
    pub async fn put(
        &self,
        request: &FontRequest,
        result: &FontFamilyResult,
    ) -> Result<bool, StoreError> {
        let key = request.cache_key();
        if result.family.is_empty() {
            log::warn!("Refusing to cache '{}' without a family name", key);
            return Ok(false);
        }

        let entry = CacheEntry::new(result.clone());
        let value = serde_json::to_string(&entry).map_err(|e| StoreError::WriteFailed {
            key: key.clone(),
            message: e.to_string(),
        })?;
        self.store.put(&key, value).await?;
        Ok(true)
    }

    /// Removes the entry for `stylesheet`. Returns `true` if one existed.
    pub async fn invalidate(&self, kind: FontKind, stylesheet: &str) -> Result<bool, StoreError> {
        self.store.delete(&cache_key(kind, stylesheet)).await
    }
}
