//! Collaborator implementations for fontsheet.
//!
//! This crate provides the concrete implementations of the traits from
//! `fontsheet-traits`.
//!
//! ## Available Implementations
//!
//! - [`HttpStylesheetFetcher`]: Fetches stylesheets over HTTP with reqwest
//! - [`FilesystemCacheStore`]: Persists cache entries as one file per key
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory store from fontsheet-traits:
//! - [`InMemoryCacheStore`]: Process-local storage

mod filesystem;
mod http;

pub use filesystem::FilesystemCacheStore;
pub use http::{HttpFetcherConfig, HttpStylesheetFetcher};

pub use fontsheet_traits::InMemoryCacheStore;
