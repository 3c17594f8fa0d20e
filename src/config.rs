use fontsheet_core::DEFAULT_BASE_URL;
use fontsheet_resource::HttpFetcherConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_ENV: &str = "FONTSHEET_CONFIG";
const API_KEY_ENV: &str = "FONTSHEET_API_KEY";
const ENV_PREFIX: &str = "FONTSHEET";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// Base path for resolving relative paths (set during loading)
    #[serde(skip)]
    base_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_accept_invalid_certs() -> bool {
    true
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }
}

impl UpstreamConfig {
    pub fn fetcher_config(&self) -> HttpFetcherConfig {
        HttpFetcherConfig {
            timeout: self
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            accept_invalid_certs: self.accept_invalid_certs,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Filesystem,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_backend")]
    pub backend: CacheBackend,
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// Entry lifetime in seconds; absent or 0 means entries never expire.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

fn default_cache_backend() -> CacheBackend {
    CacheBackend::Filesystem
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("./cache")
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_cache_backend(),
            path: default_cache_path(),
            ttl_secs: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

impl Config {
    /// Loads configuration from, in increasing precedence: built-in defaults,
    /// a TOML file, and `FONTSHEET__SECTION__KEY` environment variables.
    ///
    /// The file is `path` when given, else the file named by
    /// `FONTSHEET_CONFIG`, else `config/default.toml` if it exists. An
    /// explicitly named file must exist.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let explicit = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .filter(|p| !p.is_empty());

        let mut builder = config::Config::builder();
        let mut base_path: Option<PathBuf> = None;

        match explicit {
            Some(path) => {
                builder = builder.add_source(config::File::with_name(&path));
                base_path = config_base(Path::new(&path));
            }
            None => {
                if Path::new("config/default.toml").exists() {
                    builder = builder.add_source(config::File::with_name("config/default"));
                    base_path = Some(PathBuf::from("."));
                }
            }
        }

        // Always layer environment variables on top
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.base_path = base_path;
        config.resolve_paths();

        Ok(config)
    }

    /// Resolve relative paths in the config based on the base path
    fn resolve_paths(&mut self) {
        if let Some(ref base) = self.base_path {
            if self.cache.path.is_relative() {
                let cache_path = self
                    .cache
                    .path
                    .strip_prefix("./")
                    .unwrap_or(&self.cache.path);
                self.cache.path = base.join(cache_path);
            }
        }
    }

    /// The key required to invalidate cache entries, if one is configured.
    pub fn api_key() -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
    }
}

/// A config file in a `config/` directory resolves paths against that
/// directory's parent; any other file against its own directory.
fn config_base(file: &Path) -> Option<PathBuf> {
    let dir = file.parent()?;
    if dir.file_name().is_some_and(|name| name == "config") {
        dir.parent().map(Path::to_path_buf)
    } else {
        Some(dir.to_path_buf())
    }
}
