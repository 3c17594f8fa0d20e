//! Font family resolution for fontsheet.
//!
//! [`FontService`] is the entry point. It checks the [`FontCache`] for a
//! previously resolved family, asks the [`FontResolver`] to fetch and parse
//! the upstream stylesheet(s) on a miss, and stores successful results.
//!
//! Every call is described by an immutable [`FontRequest`] that is passed by
//! reference through the service, the cache and the resolver; none of them
//! keep per-request state.

pub mod cache;
pub mod error;
pub mod request;
pub mod resolver;
pub mod service;

pub use cache::{CacheEntry, FontCache};
pub use error::ResolutionError;
pub use request::{FontKind, FontRequest, cache_key};
pub use resolver::{DEFAULT_BASE_URL, FontResolver, ICON_CLIENT_IDENTITIES};
pub use service::FontService;

pub use fontsheet_types::{FontFamilyResult, Variant};
