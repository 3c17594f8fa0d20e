use crate::config::{CacheBackend, Config};
use crate::error::ServiceError;
use fontsheet_core::{FontCache, FontResolver, FontService};
use fontsheet_resource::{FilesystemCacheStore, HttpStylesheetFetcher, InMemoryCacheStore};
use fontsheet_traits::{CacheStore, StylesheetFetcher};
use std::sync::Arc;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Cache-first font family lookups
    pub fonts: Arc<FontService>,

    /// Key required by the invalidation routes. `None` locks them.
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(fonts: FontService, api_key: Option<String>) -> Self {
        Self {
            fonts: Arc::new(fonts),
            api_key: api_key.map(Arc::from),
        }
    }

    /// Wires the HTTP fetcher and the configured cache backend into a
    /// [`FontService`].
    pub async fn from_config(config: &Config, api_key: Option<String>) -> Result<Self, ServiceError> {
        let fetcher = HttpStylesheetFetcher::new(&config.upstream.fetcher_config())
            .map_err(|e| ServiceError::Config(e.to_string()))?;
        let fetcher: Arc<dyn StylesheetFetcher> = Arc::new(fetcher);

        let store: Arc<dyn CacheStore> = match config.cache.backend {
            CacheBackend::Filesystem => {
                let store = FilesystemCacheStore::new(&config.cache.path).await?;
                tracing::info!("Filesystem cache at {}", config.cache.path.display());
                Arc::new(store)
            }
            CacheBackend::Memory => {
                tracing::info!("In-memory cache; entries are lost on restart");
                Arc::new(InMemoryCacheStore::new())
            }
        };

        let resolver = FontResolver::with_base_url(fetcher, config.upstream.base_url.clone());
        let cache = FontCache::new(store).with_ttl(config.cache.ttl());
        match cache.ttl() {
            Some(ttl) => tracing::info!("{} entries expire after {:?}", cache.store_name(), ttl),
            None => tracing::info!("{} entries never expire", cache.store_name()),
        }
        Ok(Self::new(FontService::new(resolver, cache), api_key))
    }
}
