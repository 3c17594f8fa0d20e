pub mod fetch;
pub mod store;

pub use fetch::{FetchError, Header, StylesheetFetcher};
pub use store::{CacheStore, InMemoryCacheStore, StoreError};
