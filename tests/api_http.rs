// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /news  (fresh result, cached fallback, 503 with no cache)

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    Router,
};
use http::{Request, StatusCode};
use serde_json::Value as Json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt as _; // for `oneshot`

use meme_news_aggregator::aggregate::{AggregateCfg, Aggregator};
use meme_news_aggregator::api::{create_router, AppState};
use meme_news_aggregator::catalogue::Catalogue;
use meme_news_aggregator::error::{AggregateError, Result};
use meme_news_aggregator::feed::NewsFeed;
use meme_news_aggregator::source::{RawPost, SourceClient};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

const TEST_CATALOGUE: &str = r#"
[categories.sports]
news_sources = ["s1"]
meme_sources = ["m1"]
keywords = ["cricket"]
"#;

/// Succeeds for the first `good_runs` news fetches, then times out. Meme
/// fetches always succeed so a good run completes.
struct FlakyClient {
    news_calls: AtomicUsize,
    good_runs: usize,
}

#[async_trait]
impl SourceClient for FlakyClient {
    async fn fetch_hot(&self, source: &str, _limit: u32) -> Result<Vec<RawPost>> {
        match source {
            "s1" => {
                let n = self.news_calls.fetch_add(1, Ordering::SeqCst);
                if n < self.good_runs {
                    Ok(vec![RawPost {
                        title: "Cricket thriller goes to the last ball".to_string(),
                        created_utc: 1_000.0,
                        ..RawPost::default()
                    }])
                } else {
                    Err(AggregateError::SourceTimeout {
                        source_id: source.to_string(),
                    })
                }
            }
            "m1" => Ok(vec![RawPost {
                title: "Funny cricket thriller meme".to_string(),
                url: Some("https://i.example.test/m.jpg".to_string()),
                post_hint: Some("image".to_string()),
                ..RawPost::default()
            }]),
            _ => Ok(Vec::new()),
        }
    }
}

fn test_router(good_runs: usize) -> (Router, Arc<NewsFeed>) {
    let catalogue = Catalogue::from_toml_str(TEST_CATALOGUE).expect("test catalogue");
    let client = FlakyClient {
        news_calls: AtomicUsize::new(0),
        good_runs,
    };
    let aggregator = Aggregator::new(
        Arc::new(client),
        Arc::new(catalogue),
        AggregateCfg {
            listing_limit: 25,
            pacing: Duration::ZERO,
        },
    );
    let feed = Arc::new(NewsFeed::new(aggregator, None));
    (create_router(AppState::new(Arc::clone(&feed))), feed)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let json = serde_json::from_slice(&bytes).expect("parse json body");
    (status, json)
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let (app, _) = test_router(1);

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "OK", "health body should be 'OK'");
}

#[tokio::test]
async fn api_news_returns_items_with_memes() {
    let (app, _) = test_router(1);

    let (status, v) = get_json(app, "/news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["stale"], Json::Bool(false));

    let items = v["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Cricket thriller goes to the last ball");
    assert!(!items[0]["memes"].as_array().expect("memes").is_empty());
}

#[tokio::test]
async fn api_news_serves_cached_result_after_total_failure() {
    let (app, feed) = test_router(1);

    // warm the cache through the feed, then hit the router once the only
    // source has started timing out
    feed.fetch_aggregated_news(true).await.expect("first run ok");

    let (status, v) = get_json(app, "/news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["stale"], Json::Bool(true), "payload should be the cache");
    assert_eq!(
        v["items"].as_array().map(|a| a.len()),
        Some(1),
        "cached items survive"
    );
}

#[tokio::test]
async fn api_news_is_503_when_nothing_was_ever_fetched() {
    let (app, _) = test_router(0);

    let (status, v) = get_json(app, "/news").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(v["retry"], Json::Bool(true));
    assert!(v["error"].as_str().expect("error string").contains("no usable content"));
}
