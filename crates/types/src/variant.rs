use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `@font-face` block, normalized.
///
/// The required descriptors are typed fields. Font file URLs are keyed by
/// their file extension (`woff2`, `ttf`, ...) in [`Variant::files`]; every
/// other descriptor (`unicodeRange`, `fontDisplay`, ...) lands in
/// [`Variant::descriptors`] under its camelCase name.
///
/// On the wire a variant is one flat object: the required fields, the
/// descriptors and the file keys side by side, in sorted key order so that
/// two equal variants always serialize to the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FlatVariant", into = "FlatVariant")]
pub struct Variant {
    pub id: String,
    pub font_family: String,
    pub font_style: String,
    pub font_weight: String,
    pub descriptors: BTreeMap<String, String>,
    pub files: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatVariant {
    id: String,
    font_family: String,
    font_style: String,
    font_weight: String,
    #[serde(flatten)]
    properties: BTreeMap<String, String>,
}

impl From<Variant> for FlatVariant {
    fn from(variant: Variant) -> Self {
        let mut properties = variant.descriptors;
        properties.extend(variant.files);
        Self {
            id: variant.id,
            font_family: variant.font_family,
            font_style: variant.font_style,
            font_weight: variant.font_weight,
            properties,
        }
    }
}

impl From<FlatVariant> for Variant {
    fn from(flat: FlatVariant) -> Self {
        let (files, descriptors): (BTreeMap<_, _>, BTreeMap<_, _>) = flat
            .properties
            .into_iter()
            .partition(|(key, _)| is_file_key(key));
        Self {
            id: flat.id,
            font_family: flat.font_family,
            font_style: flat.font_style,
            font_weight: flat.font_weight,
            descriptors,
            files,
        }
    }
}

/// File extensions are lowercase alphanumerics; hyphenated descriptor names
/// always carry an uppercase letter once camelCased.
fn is_file_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

impl Variant {
    /// Creates a variant with its `id` already derived from weight and style.
    pub fn new(
        font_family: impl Into<String>,
        font_style: impl Into<String>,
        font_weight: impl Into<String>,
    ) -> Self {
        let mut variant = Self {
            font_family: font_family.into(),
            font_style: font_style.into(),
            font_weight: font_weight.into(),
            ..Default::default()
        };
        variant.refresh_id();
        variant
    }

    /// The variant id: the weight, followed by the style unless it is `normal`.
    ///
    /// `400` + `normal` gives `400`, `700` + `italic` gives `700italic`.
    pub fn compute_id(font_weight: &str, font_style: &str) -> String {
        if font_style == "normal" {
            font_weight.to_string()
        } else {
            format!("{font_weight}{font_style}")
        }
    }

    pub fn refresh_id(&mut self) {
        self.id = Self::compute_id(&self.font_weight, &self.font_style);
    }

    /// Returns the URL recorded for a file extension, if any.
    pub fn file(&self, extension: &str) -> Option<&str> {
        self.files.get(extension).map(String::as_str)
    }

    /// Merges `other` into `self`.
    ///
    /// Every key present in `other` overwrites the same key in `self`,
    /// including the required descriptors. The id is recomputed afterwards.
    pub fn merge(&mut self, other: Variant) {
        self.font_family = other.font_family;
        self.font_style = other.font_style;
        self.font_weight = other.font_weight;
        self.descriptors.extend(other.descriptors);
        self.files.extend(other.files);
        self.refresh_id();
    }
}
