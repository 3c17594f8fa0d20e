//! Parsing for `@font-face` stylesheets as served by web font services.
//!
//! Parsing happens in two passes:
//!
//! 1. [`tokenize`] turns the stylesheet text into a flat, ordered sequence of
//!    [`StylesheetToken`]s: one boundary per `@font-face` block and one
//!    declaration per `property: value;` pair.
//! 2. [`build_variants`] folds those tokens into one [`Variant`] per block,
//!    normalizing property names and pulling font file URLs out of `src`.
//!
//! This is deliberately not a general CSS parser. Selectors, nested rules and
//! other at-rules are skipped over rather than understood.
//!
//! ```
//! use fontsheet_parser::parse_stylesheet;
//!
//! let css = "@font-face { font-family: 'Example One'; font-style: normal; \
//!            font-weight: 400; src: url(http://x/a.woff2) format('woff2'); }";
//! let variants = parse_stylesheet(css);
//! assert_eq!(variants[0].id, "400");
//! assert_eq!(variants[0].file("woff2"), Some("http://x/a.woff2"));
//! ```

pub mod tokenizer;
pub mod variants;

pub use fontsheet_types::{StylesheetToken, Variant};
pub use tokenizer::{Tokens, tokenize};
pub use variants::{build_variants, camel_case, file_extension, source_urls};

/// Tokenizes `css` and builds its variants in one call.
pub fn parse_stylesheet(css: &str) -> Vec<Variant> {
    build_variants(tokenize(css))
}
