//! Folds stylesheet tokens into [`Variant`]s.

use fontsheet_types::{StylesheetToken, Variant, strip_quotes};
use nom::{
    IResult, Parser,
    bytes::complete::{is_not, tag, take_until},
    character::complete::char,
    sequence::delimited,
};
use std::collections::BTreeMap;

/// Builds one variant per `@font-face` block, in block order.
///
/// Declarations that appear before the first block boundary open an implicit
/// block. Blocks without a `font-weight` or `font-family` are malformed and
/// are dropped with a warning; a missing `font-style` means `normal`.
pub fn build_variants<'a, I>(tokens: I) -> Vec<Variant>
where
    I: IntoIterator<Item = StylesheetToken<'a>>,
{
    let mut drafts: Vec<VariantDraft> = Vec::new();

    for token in tokens {
        match token {
            StylesheetToken::BlockBoundary => drafts.push(VariantDraft::default()),
            StylesheetToken::Declaration {
                property,
                raw_value,
            } => {
                if drafts.is_empty() {
                    drafts.push(VariantDraft::default());
                }
                if let Some(draft) = drafts.last_mut() {
                    draft.apply(property, raw_value);
                }
            }
        }
    }

    drafts
        .into_iter()
        .enumerate()
        .filter_map(|(index, draft)| draft.finish(index))
        .collect()
}

/// Accumulates the declarations of one block until the block is complete.
#[derive(Debug, Default)]
struct VariantDraft {
    font_family: Option<String>,
    font_style: Option<String>,
    font_weight: Option<String>,
    descriptors: BTreeMap<String, String>,
    files: BTreeMap<String, String>,
}

impl VariantDraft {
    fn apply(&mut self, property: &str, raw_value: &str) {
        let name = camel_case(property);
        match name.as_str() {
            "src" => self.apply_src(raw_value),
            "fontFamily" => self.font_family = Some(raw_value.to_string()),
            "fontStyle" => self.font_style = Some(raw_value.to_string()),
            "fontWeight" => self.font_weight = Some(raw_value.to_string()),
            _ => {
                self.descriptors.insert(name, raw_value.to_string());
            }
        }
    }

    fn apply_src(&mut self, raw_value: &str) {
        let urls = source_urls(raw_value);
        if urls.is_empty() {
            log::warn!("Skipping 'src' declaration without any url(): '{}'", raw_value);
            return;
        }

        for url in urls {
            match file_extension(url) {
                Some(extension) => {
                    self.files.insert(extension.to_string(), url.to_string());
                }
                None => log::warn!("Skipping font source without a file extension: '{}'", url),
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && self.font_style.is_none()
            && self.font_weight.is_none()
            && self.descriptors.is_empty()
            && self.files.is_empty()
    }

    fn finish(self, index: usize) -> Option<Variant> {
        if self.is_empty() {
            return None;
        }
        let Some(font_weight) = self.font_weight else {
            log::warn!("Dropping @font-face block #{} without a font-weight", index);
            return None;
        };
        let Some(font_family) = self.font_family else {
            log::warn!("Dropping @font-face block #{} without a font-family", index);
            return None;
        };
        let font_style = self.font_style.unwrap_or_else(|| "normal".to_string());

        let mut variant = Variant::new(font_family, font_style, font_weight);
        variant.descriptors = self.descriptors;
        variant.files = self.files;
        Some(variant)
    }
}

/// Converts a hyphenated CSS property name to camelCase.
///
/// `font-style` becomes `fontStyle`, `unicode-range` becomes `unicodeRange`.
/// Property names are case-insensitive, so the input is lowercased first.
pub fn camel_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper_next = false;
    for c in property.chars() {
        if c == '-' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// Extracts every `url(...)` target from a `src` value, in order.
///
/// Surrounding quotes inside the parentheses are removed.
pub fn source_urls(raw_value: &str) -> Vec<&str> {
    let mut urls = Vec::new();
    let mut input = raw_value;

    while let Ok((after, _)) = until_url(input) {
        match url_reference(after) {
            Ok((rest, url)) => {
                let url = strip_quotes(url);
                if !url.is_empty() {
                    urls.push(url);
                }
                input = rest;
            }
            Err(_) => input = &after["url(".len()..],
        }
    }
    urls
}

fn until_url(input: &str) -> IResult<&str, &str> {
    take_until("url(").parse(input)
}

fn url_reference(input: &str) -> IResult<&str, &str> {
    delimited(tag("url("), is_not(")"), char(')')).parse(input)
}

/// The file extension of the last path segment of `url`.
///
/// Query strings and fragments are ignored. The extension is returned as
/// written, without case normalization.
pub fn file_extension(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = file_name.rsplit_once('.')?;
    (!extension.is_empty()).then_some(extension)
}
