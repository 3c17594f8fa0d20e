use std::fmt;

/// Which upstream operation a request maps to.
///
/// Each kind has its own cache key namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKind {
    /// An early access webfont stylesheet, fetched once.
    Webfont,
    /// An icon font family, fetched once per file format.
    Icon,
}

impl FontKind {
    pub fn cache_prefix(self) -> &'static str {
        match self {
            FontKind::Webfont => "eaf_api_cached_request_",
            FontKind::Icon => "icon_api_cached_request_",
        }
    }

    /// The route segment serving this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            FontKind::Webfont => "early-access",
            FontKind::Icon => "icons",
        }
    }
}

impl fmt::Display for FontKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call: what to resolve and which version token to send upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    pub kind: FontKind,
    /// The raw identifier as requested, e.g. `notosansjp.css` or `material-icons`.
    pub stylesheet: String,
    /// Cache-busting token forwarded upstream; never part of the cache key.
    pub version: String,
}

impl FontRequest {
    pub fn new(kind: FontKind, stylesheet: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind,
            stylesheet: stylesheet.into(),
            version: version.into(),
        }
    }

    pub fn webfont(stylesheet: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(FontKind::Webfont, stylesheet, version)
    }

    pub fn icon(family: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(FontKind::Icon, family, version)
    }

    pub fn cache_key(&self) -> String {
        cache_key(self.kind, &self.stylesheet)
    }
}

/// The store key for `stylesheet` under the namespace of `kind`.
pub fn cache_key(kind: FontKind, stylesheet: &str) -> String {
    format!("{}{}", kind.cache_prefix(), stylesheet)
}
