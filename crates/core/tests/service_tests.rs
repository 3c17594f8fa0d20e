mod common;

use common::{ERROR_DOCUMENT, NOTO_SANS_JP, ScriptedFetcher, harness, icon_css};
use fontsheet_core::{
    FontCache, FontKind, FontRequest, FontResolver, FontService, ICON_CLIENT_IDENTITIES,
    ResolutionError,
};
use fontsheet_traits::{CacheStore, FetchError, InMemoryCacheStore};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_webfont_resolution() {
    let h = harness(ScriptedFetcher::returning(NOTO_SANS_JP));
    let result = h
        .service
        .family(&FontRequest::webfont("notosansjp.css", "5.0"))
        .await
        .unwrap();

    assert_eq!(result.id, "noto-sans-jp");
    assert_eq!(result.family, "Noto Sans JP");
    assert!(result.early_access);
    assert!(result.subsets.is_empty());
    assert_eq!(result.variants.len(), 2);

    let thin = &result.variants[0];
    assert_eq!(thin.id, "100");
    assert_eq!(
        thin.file("woff2"),
        Some("//fonts.gstatic.com/ea/notosansjp/v5/NotoSansJP-Thin.woff2")
    );
    assert_eq!(
        thin.file("otf"),
        Some("//fonts.gstatic.com/ea/notosansjp/v5/NotoSansJP-Thin.otf")
    );
    assert_eq!(result.variants[1].id, "400");
    assert_eq!(result.variants[1].file("otf"), None);

    assert_eq!(
        h.fetcher.calls(),
        vec![(
            "http://upstream.test/earlyaccess/notosansjp.css?ver=5.0".to_string(),
            None
        )]
    );
}

#[tokio::test]
async fn test_second_lookup_is_served_from_cache() {
    let h = harness(ScriptedFetcher::returning(NOTO_SANS_JP));
    let request = FontRequest::webfont("notosansjp.css", "");

    let cold = h.service.family(&request).await.unwrap();
    let warm = h.service.family(&request).await.unwrap();

    assert_eq!(h.fetcher.call_count(), 1);
    assert_eq!(
        serde_json::to_string(&cold).unwrap(),
        serde_json::to_string(&warm).unwrap()
    );
    assert_eq!(h.store.keys(), vec!["eaf_api_cached_request_notosansjp.css"]);
}

#[tokio::test]
async fn test_version_change_still_hits_cache() {
    let h = harness(ScriptedFetcher::returning(NOTO_SANS_JP));

    h.service
        .family(&FontRequest::webfont("notosansjp.css", "1"))
        .await
        .unwrap();
    h.service
        .family(&FontRequest::webfont("notosansjp.css", "2"))
        .await
        .unwrap();

    assert_eq!(h.fetcher.call_count(), 1);
}

#[tokio::test]
async fn test_error_document_fails_without_caching() {
    let h = harness(ScriptedFetcher::returning(ERROR_DOCUMENT));
    let err = h
        .service
        .family(&FontRequest::webfont("doesnotexist.css", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolutionError::NoFontFamily(ref id) if id == "doesnotexist.css"));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_upstream_status_fails_without_caching() {
    let h = harness(ScriptedFetcher::failing(400));
    let err = h
        .service
        .family(&FontRequest::webfont("doesnotexist.css", ""))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ResolutionError::Fetch(FetchError::Status { status: 400, .. })
    ));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_icon_formats_are_merged() {
    let h = harness(ScriptedFetcher::icon_formats());
    let result = h
        .service
        .family(&FontRequest::icon("material-icons", "3"))
        .await
        .unwrap();

    assert_eq!(result.id, "material-icons");
    assert_eq!(result.family, "Material Icons");
    assert!(!result.early_access);
    assert_eq!(result.variants.len(), 1);

    let variant = &result.variants[0];
    assert_eq!(variant.id, "400");
    for (format, _) in ICON_CLIENT_IDENTITIES {
        let expected = format!("https://fonts.gstatic.com/s/materialicons/v140/icon.{format}");
        assert_eq!(variant.file(format), Some(expected.as_str()));
    }

    let calls = h.fetcher.calls();
    assert_eq!(calls.len(), 5);
    for (url, user_agent) in &calls {
        assert_eq!(url, "http://upstream.test/icon?family=Material+Icons&ver=3");
        assert!(user_agent.is_some());
    }
    assert_eq!(h.store.keys(), vec!["icon_api_cached_request_material-icons"]);
}

#[tokio::test]
async fn test_icon_format_without_block_is_skipped() {
    let (_, svg_agent) = ICON_CLIENT_IDENTITIES[4];
    let fetcher = ScriptedFetcher::icon_formats()
        .with_user_agent(svg_agent, Ok("/* nothing for this client */".to_string()));
    let h = harness(fetcher);

    let result = h
        .service
        .family(&FontRequest::icon("material-icons", ""))
        .await
        .unwrap();

    let variant = &result.variants[0];
    assert_eq!(variant.files.len(), 4);
    assert_eq!(variant.file("svg"), None);
}

#[tokio::test]
async fn test_later_icon_format_wins_on_shared_keys() {
    let (_, eot_agent) = ICON_CLIENT_IDENTITIES[0];
    let (_, woff2_agent) = ICON_CLIENT_IDENTITIES[1];
    let fetcher = ScriptedFetcher::default()
        .with_user_agent(
            eot_agent,
            Ok("@font-face { font-family: 'Material Icons'; font-weight: 400; font-display: swap; src: url(a/first.eot); }".to_string()),
        )
        .with_user_agent(
            woff2_agent,
            Ok("@font-face { font-family: 'Material Icons'; font-weight: 400; font-display: block; src: url(b/second.eot), url(b/icon.woff2); }".to_string()),
        )
        .with_user_agent(ICON_CLIENT_IDENTITIES[2].1, Ok(String::new()))
        .with_user_agent(ICON_CLIENT_IDENTITIES[3].1, Ok(String::new()))
        .with_user_agent(ICON_CLIENT_IDENTITIES[4].1, Ok(String::new()));
    let h = harness(fetcher);

    let result = h
        .service
        .family(&FontRequest::icon("material-icons", ""))
        .await
        .unwrap();

    let variant = &result.variants[0];
    assert_eq!(variant.file("eot"), Some("b/second.eot"));
    assert_eq!(variant.file("woff2"), Some("b/icon.woff2"));
    assert_eq!(variant.descriptors.get("fontDisplay").map(String::as_str), Some("block"));
}

#[tokio::test]
async fn test_icon_fetch_failure_fails_resolution() {
    let (_, ttf_agent) = ICON_CLIENT_IDENTITIES[3];
    let fetcher = ScriptedFetcher::icon_formats().with_user_agent(
        ttf_agent,
        Err(FetchError::Transport {
            url: String::new(),
            message: "connection reset".to_string(),
        }),
    );
    let h = harness(fetcher);

    let err = h
        .service
        .family(&FontRequest::icon("material-icons", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolutionError::Fetch(FetchError::Transport { .. })));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_icon_without_any_block_fails() {
    let h = harness(ScriptedFetcher::returning(ERROR_DOCUMENT));
    let err = h
        .service
        .family(&FontRequest::icon("not-an-icon-set", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolutionError::NoFontFamily(_)));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_webfont_and_icon_namespaces_are_separate() {
    let fetcher = ScriptedFetcher::icon_formats();
    let h = harness(fetcher);

    h.service
        .family(&FontRequest::icon("material-icons", ""))
        .await
        .unwrap();
    // The icon entry must not satisfy a webfont lookup for the same identifier.
    let webfont = h
        .service
        .family(&FontRequest::webfont("material-icons", ""))
        .await;

    assert!(webfont.is_err());
    assert_eq!(h.fetcher.call_count(), 6);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let h = harness(ScriptedFetcher::returning(NOTO_SANS_JP));
    let request = FontRequest::webfont("notosansjp.css", "");

    h.service.family(&request).await.unwrap();
    assert!(h.service.invalidate(FontKind::Webfont, "notosansjp.css").await.unwrap());
    assert!(!h.service.invalidate(FontKind::Webfont, "notosansjp.css").await.unwrap());
    h.service.family(&request).await.unwrap();

    assert_eq!(h.fetcher.call_count(), 2);
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let fetcher = Arc::new(ScriptedFetcher::returning(NOTO_SANS_JP));
    let store = Arc::new(InMemoryCacheStore::new());
    let stale = serde_json::json!({
        "storedAt": "2000-01-01T00:00:00Z",
        "result": {
            "id": "stale",
            "family": "Stale",
            "variants": [],
            "subsets": []
        }
    });
    store
        .put("eaf_api_cached_request_notosansjp.css", stale.to_string())
        .await
        .unwrap();

    let cache = FontCache::new(store.clone()).with_ttl(Some(Duration::from_secs(3600)));
    let service = FontService::new(
        FontResolver::with_base_url(fetcher.clone(), "http://upstream.test"),
        cache,
    );

    let result = service
        .family(&FontRequest::webfont("notosansjp.css", ""))
        .await
        .unwrap();

    assert_eq!(result.family, "Noto Sans JP");
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn test_entry_without_ttl_never_expires() {
    let fetcher = Arc::new(ScriptedFetcher::returning(NOTO_SANS_JP));
    let store = Arc::new(InMemoryCacheStore::new());
    let old = serde_json::json!({
        "storedAt": "2000-01-01T00:00:00Z",
        "result": {
            "id": "old",
            "family": "Old",
            "variants": [],
            "subsets": []
        }
    });
    store
        .put("eaf_api_cached_request_notosansjp.css", old.to_string())
        .await
        .unwrap();

    let service = FontService::new(
        FontResolver::with_base_url(fetcher.clone(), "http://upstream.test"),
        FontCache::new(store),
    );
    let result = service
        .family(&FontRequest::webfont("notosansjp.css", ""))
        .await
        .unwrap();

    assert_eq!(result.family, "Old");
    assert_eq!(fetcher.call_count(), 0);
}

#[test]
fn test_icon_fixture_parses() {
    let variants = fontsheet_parser::parse_stylesheet(&icon_css("woff2"));
    assert_eq!(variants.len(), 1);
}
