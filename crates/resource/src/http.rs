//! reqwest-backed stylesheet fetcher.

use async_trait::async_trait;
use fontsheet_traits::{FetchError, Header, StylesheetFetcher};
use std::time::Duration;

/// Client settings for [`HttpStylesheetFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Total request timeout. `None` keeps the client default.
    pub timeout: Option<Duration>,
    /// Skip TLS certificate verification. The upstream font service is a
    /// fixed, known host, so this is on by default.
    pub accept_invalid_certs: bool,
    /// Default `User-Agent`, overridable per request.
    pub user_agent: Option<String>,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            accept_invalid_certs: true,
            user_agent: None,
        }
    }
}

/// Fetches stylesheets with a shared [`reqwest::Client`].
///
/// Non-success HTTP statuses are reported as [`FetchError::Status`] instead of
/// handing the error document to the parser.
#[derive(Debug, Clone)]
pub struct HttpStylesheetFetcher {
    client: reqwest::Client,
}

impl HttpStylesheetFetcher {
    pub fn new(config: &HttpFetcherConfig) -> Result<Self, FetchError> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::InvalidRequest(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StylesheetFetcher for HttpStylesheetFetcher {
    async fn fetch(&self, url: &str, headers: &[Header<'_>]) -> Result<String, FetchError> {
        log::debug!("GET {} ({} extra headers)", url, headers.len());

        let mut request = self.client.get(url);
        for &(name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("GET {} returned HTTP {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "HttpStylesheetFetcher"
    }
}
