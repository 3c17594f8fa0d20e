use crate::variant::Variant;
use serde::{Deserialize, Serialize};

/// The unit returned to API callers and stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamilyResult {
    /// Lowercased, hyphenated slug of `family`.
    pub id: String,
    pub family: String,
    /// Only present (and `true`) for early access webfonts.
    #[serde(default, skip_serializing_if = "is_false")]
    pub early_access: bool,
    pub variants: Vec<Variant>,
    /// Reserved; always empty.
    #[serde(default)]
    pub subsets: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FontFamilyResult {
    pub fn new(family: impl Into<String>, variants: Vec<Variant>) -> Self {
        let family = family.into();
        Self {
            id: family_slug(&family),
            family,
            early_access: false,
            variants,
            subsets: Vec::new(),
        }
    }

    pub fn with_early_access(mut self) -> Self {
        self.early_access = true;
        self
    }
}

/// Strips one layer of matching single or double quotes.
///
/// Unbalanced quotes are left untouched.
pub fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// `Noto Sans JP` becomes `noto-sans-jp`.
pub fn family_slug(family: &str) -> String {
    family.to_lowercase().replace(' ', "-")
}
