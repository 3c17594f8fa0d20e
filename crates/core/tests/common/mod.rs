#![allow(dead_code)]

use async_trait::async_trait;
use fontsheet_core::{FontCache, FontResolver, FontService, ICON_CLIENT_IDENTITIES};
use fontsheet_traits::{FetchError, Header, InMemoryCacheStore, StylesheetFetcher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const NOTO_SANS_JP: &str = r#"/*
 * Noto Sans JP (Japanese) http://www.google.com/fonts/earlyaccess
 */
@font-face {
  font-family: 'Noto Sans JP';
  font-style: normal;
  font-weight: 100;
  src: url(//fonts.gstatic.com/ea/notosansjp/v5/NotoSansJP-Thin.woff2) format('woff2'),
       url(//fonts.gstatic.com/ea/notosansjp/v5/NotoSansJP-Thin.woff) format('woff'),
       url(//fonts.gstatic.com/ea/notosansjp/v5/NotoSansJP-Thin.otf) format('opentype');
}
@font-face {
  font-family: 'Noto Sans JP';
  font-style: normal;
  font-weight: 400;
  src: url(//fonts.gstatic.com/ea/notosansjp/v5/NotoSansJP-Regular.woff2) format('woff2'),
       url(//fonts.gstatic.com/ea/notosansjp/v5/NotoSansJP-Regular.woff) format('woff');
}
"#;

pub const ERROR_DOCUMENT: &str =
    "<!DOCTYPE html><html><body><p>400. That's an error.</p></body></html>";

/// The icon stylesheet the font service would serve for one file format.
pub fn icon_css(format: &str) -> String {
    format!(
        "@font-face {{\n  font-family: 'Material Icons';\n  font-style: normal;\n  font-weight: 400;\n  src: url(https://fonts.gstatic.com/s/materialicons/v140/icon.{format}) format('{format}');\n}}\n"
    )
}

/// A fetcher that answers from a table keyed by the request's `User-Agent`
/// and records every call.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    by_user_agent: HashMap<String, Result<String, FetchError>>,
    fallback: Option<Result<String, FetchError>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedFetcher {
    pub fn returning(body: impl Into<String>) -> Self {
        Self {
            fallback: Some(Ok(body.into())),
            ..Default::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fallback: Some(Err(FetchError::Status {
                url: String::new(),
                status,
            })),
            ..Default::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: &str, response: Result<String, FetchError>) -> Self {
        self.by_user_agent.insert(user_agent.to_string(), response);
        self
    }

    /// Answers each icon format identity with the stylesheet for that format.
    pub fn icon_formats() -> Self {
        ICON_CLIENT_IDENTITIES
            .iter()
            .fold(Self::default(), |fetcher, (format, user_agent)| {
                fetcher.with_user_agent(user_agent, Ok(icon_css(format)))
            })
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl StylesheetFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, headers: &[Header<'_>]) -> Result<String, FetchError> {
        let user_agent = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
            .map(|(_, value)| value.to_string());
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), user_agent.clone()));

        let scripted = user_agent
            .as_deref()
            .and_then(|ua| self.by_user_agent.get(ua))
            .or(self.fallback.as_ref());
        match scripted {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(FetchError::Status { status, .. })) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "ScriptedFetcher"
    }
}

pub struct Harness {
    pub fetcher: Arc<ScriptedFetcher>,
    pub store: Arc<InMemoryCacheStore>,
    pub service: FontService,
}

pub fn harness(fetcher: ScriptedFetcher) -> Harness {
    let fetcher = Arc::new(fetcher);
    let store = Arc::new(InMemoryCacheStore::new());
    let resolver = FontResolver::with_base_url(fetcher.clone(), "http://upstream.test");
    let service = FontService::new(resolver, FontCache::new(store.clone()));
    Harness {
        fetcher,
        store,
        service,
    }
}
