use crate::cache::FontCache;
use crate::error::ResolutionError;
use crate::request::{FontKind, FontRequest};
use crate::resolver::FontResolver;
use fontsheet_traits::StoreError;
use fontsheet_types::FontFamilyResult;

/// Cache-first font family lookups.
#[derive(Debug, Clone)]
pub struct FontService {
    resolver: FontResolver,
    cache: FontCache,
}

impl FontService {
    pub fn new(resolver: FontResolver, cache: FontCache) -> Self {
        Self { resolver, cache }
    }

    /// Returns the family for `request`, resolving it upstream on a cache miss.
    ///
    /// A cache that cannot be read or written only costs an extra upstream
    /// round trip; the failure is logged and the lookup carries on.
    pub async fn family(&self, request: &FontRequest) -> Result<FontFamilyResult, ResolutionError> {
        let key = request.cache_key();
        match self.cache.get(request).await {
            Ok(Some(result)) => {
                log::debug!("Cache hit for '{}'", key);
                return Ok(result);
            }
            Ok(None) => log::debug!("Cache miss for '{}'", key),
            Err(e) => log::warn!("Cache read for '{}' failed: {}", key, e),
        }

        let result = self.resolver.resolve(request).await?;
        log::info!(
            "Resolved {} family '{}' with {} variant(s)",
            request.kind,
            result.family,
            result.variants.len()
        );

        if let Err(e) = self.cache.put(request, &result).await {
            log::error!("Failed to cache '{}': {}", key, e);
        }
        Ok(result)
    }

    /// Drops the cached family so the next lookup resolves it again.
    pub async fn invalidate(&self, kind: FontKind, stylesheet: &str) -> Result<bool, StoreError> {
        let removed = self.cache.invalidate(kind, stylesheet).await?;
        log::info!("Invalidated {} '{}' (removed: {})", kind, stylesheet, removed);
        Ok(removed)
    }
}
