//! Fetches upstream stylesheets and turns them into [`FontFamilyResult`]s.

use crate::error::ResolutionError;
use crate::request::{FontKind, FontRequest};
use fontsheet_parser::parse_stylesheet;
use fontsheet_traits::StylesheetFetcher;
use fontsheet_types::{FontFamilyResult, Variant, strip_quotes};
use futures::future::try_join_all;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://fonts.googleapis.com";

/// Everything except RFC 3986 unreserved characters is escaped, so a value
/// can never open a new query parameter, path segment or fragment.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URL_COMPONENT).to_string()
}

/// File format → `User-Agent` presented to the font service to get that format.
///
/// The service picks the file format from the client it believes it is
/// talking to, so each format needs its own fetch. Results are merged in this
/// order; a later format wins on shared keys.
pub const ICON_CLIENT_IDENTITIES: [(&str, &str); 5] = [
    (
        "eot",
        "Mozilla/5.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0; GTB7.4; InfoPath.2; SV1; .NET CLR 3.3.69573; WOW64; en-US)",
    ),
    (
        "woff2",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:93.0) Gecko/20100101 Firefox/93.0",
    ),
    (
        "woff",
        "Mozilla/5.0 (iPad; CPU OS 6_0 like Mac OS X) AppleWebKit/536.26 (KHTML, like Gecko) Version/6.0 Mobile/10A5355d Safari/8536.25",
    ),
    (
        "ttf",
        "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10_6_8; de-at) AppleWebKit/533.21.1 (KHTML, like Gecko) Version/5.0.5 Safari/533.21.1",
    ),
    (
        "svg",
        "Mozilla/5.0(iPad; U; CPU iPhone OS 3_2 like Mac OS X; en-us) AppleWebKit/531.21.10 (KHTML, like Gecko) Version/4.0.4 Mobile/7B314 Safari/531.21.10gin_lib.cc",
    ),
];

/// Resolves font families against a remote font service.
///
/// The resolver never touches the cache; see [`crate::FontService`].
#[derive(Debug, Clone)]
pub struct FontResolver {
    fetcher: Arc<dyn StylesheetFetcher>,
    base_url: String,
}

impl FontResolver {
    pub fn new(fetcher: Arc<dyn StylesheetFetcher>) -> Self {
        Self::with_base_url(fetcher, DEFAULT_BASE_URL)
    }

    /// Points the resolver at another font service host.
    pub fn with_base_url(fetcher: Arc<dyn StylesheetFetcher>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { fetcher, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn resolve(&self, request: &FontRequest) -> Result<FontFamilyResult, ResolutionError> {
        match request.kind {
            FontKind::Webfont => self.resolve_webfont(request).await,
            FontKind::Icon => self.resolve_icon(request).await,
        }
    }

    /// `<base>/earlyaccess/<stylesheet>?ver=<version>`, with the stylesheet
    /// escaped as one path segment and the version as one query value.
    pub fn webfont_url(&self, stylesheet: &str, version: &str) -> String {
        format!(
            "{}/earlyaccess/{}?ver={}",
            self.base_url,
            encode_component(stylesheet),
            encode_component(version)
        )
    }

    /// `<base>/icon?family=<Family+Name>&ver=<version>`
    ///
    /// Words of the family are joined with `+`; anything else that is not
    /// unreserved is percent-escaped.
    pub fn icon_url(&self, family: &str, version: &str) -> String {
        let family = family
            .split(' ')
            .map(encode_component)
            .collect::<Vec<_>>()
            .join("+");
        format!(
            "{}/icon?family={}&ver={}",
            self.base_url,
            family,
            encode_component(version)
        )
    }

    async fn resolve_webfont(
        &self,
        request: &FontRequest,
    ) -> Result<FontFamilyResult, ResolutionError> {
        let url = self.webfont_url(&request.stylesheet, &request.version);
        let css = self.fetcher.fetch(&url, &[]).await?;
        let variants = parse_stylesheet(&css);
        log::debug!(
            "Parsed {} variant(s) from webfont stylesheet '{}'",
            variants.len(),
            request.stylesheet
        );

        let family = family_name(&variants, request)?;
        Ok(FontFamilyResult::new(family, variants).with_early_access())
    }

    async fn resolve_icon(&self, request: &FontRequest) -> Result<FontFamilyResult, ResolutionError> {
        let url = self.icon_url(&icon_family_name(&request.stylesheet), &request.version);

        let url = url.as_str();
        let responses = try_join_all(ICON_CLIENT_IDENTITIES.iter().map(|&(_, user_agent)| async move {
            self.fetcher.fetch(url, &[("user-agent", user_agent)]).await
        }))
        .await?;

        let mut merged: Option<Variant> = None;
        for ((format, _), css) in ICON_CLIENT_IDENTITIES.iter().zip(&responses) {
            let Some(variant) = parse_stylesheet(css).into_iter().next() else {
                log::warn!(
                    "No @font-face block in the '{}' response for icon family '{}'",
                    format,
                    request.stylesheet
                );
                continue;
            };
            match merged.as_mut() {
                Some(merged) => merged.merge(variant),
                None => merged = Some(variant),
            }
        }

        let variants: Vec<Variant> = merged.into_iter().collect();
        let family = family_name(&variants, request)?;
        Ok(FontFamilyResult::new(family, variants))
    }
}

/// The family of the first variant, with one layer of quotes removed.
fn family_name(variants: &[Variant], request: &FontRequest) -> Result<String, ResolutionError> {
    variants
        .first()
        .map(|variant| strip_quotes(&variant.font_family))
        .filter(|family| !family.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ResolutionError::NoFontFamily(request.stylesheet.clone()))
}

/// Turns a requested icon family identifier into the family name the font
/// service expects: `material-icons` and `material+icons` both become
/// `Material Icons`.
pub fn icon_family_name(stylesheet: &str) -> String {
    let spaced = stylesheet.replace(['-', '+'], " ");
    let mut name = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start {
            name.extend(c.to_uppercase());
        } else {
            name.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    name
}
