//! StylesheetFetcher trait for abstracting outbound HTTP.
//!
//! The resolver only needs "GET this URL with these extra headers and give me
//! the body as text". Keeping that behind a trait lets tests script upstream
//! responses without a network.

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Error type for stylesheet fetches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request to '{url}' failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// A request header as a name/value pair, e.g. `("user-agent", "...")`.
pub type Header<'a> = (&'a str, &'a str);

/// A trait for fetching stylesheet text over HTTP GET.
///
/// # Implementations
///
/// - `HttpStylesheetFetcher` (in `fontsheet-resource`): reqwest-backed client
///
/// # Example
///
/// ```ignore
/// let css = fetcher
///     .fetch("https://fonts.googleapis.com/icon?family=Material+Icons", &[("user-agent", ua)])
///     .await?;
/// ```
#[async_trait]
pub trait StylesheetFetcher: Send + Sync + Debug {
    /// Fetch `url`, sending `headers` on top of the client's defaults.
    ///
    /// Returns the response body as text. A header passed here replaces a
    /// default header of the same name.
    async fn fetch(&self, url: &str, headers: &[Header<'_>]) -> Result<String, FetchError>;

    /// Returns a human-readable name for this fetcher (for logging/debugging).
    fn name(&self) -> &'static str;
}
