// src/source/client.rs
//! Source client: one tagged HTTP GET against one feed. No retries here;
//! partial-failure handling belongs to the aggregator.

use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{AggregateError, Result};
use crate::source::types::{Listing, RawPost};

pub const USER_AGENT: &str = "meme-news-aggregator/1.0";
pub const FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Seam for the aggregator and for tests; fakes substitute the network.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Fetch the hot listing of one source, decoded to candidate posts.
    async fn fetch_hot(&self, source: &str, limit: u32) -> Result<Vec<RawPost>>;
}

pub struct HttpSourceClient {
    client: Client,
    base: Url,
}

impl HttpSourceClient {
    pub fn new() -> Self {
        Self::with_base(DEFAULT_BASE_URL)
    }

    /// `base` must be an absolute URL; tests point it at a local server.
    pub fn with_base(base: &str) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        let base = Url::parse(base).expect("source base URL must be absolute");
        Self { client, base }
    }

    fn listing_url(&self, source: &str, limit: u32) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AggregateError::Decode {
                source_id: source.to_string(),
                reason: "base URL cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(["r", source, "hot.json"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

impl Default for HttpSourceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceClient for HttpSourceClient {
    async fn fetch_hot(&self, source: &str, limit: u32) -> Result<Vec<RawPost>> {
        let t0 = std::time::Instant::now();
        let url = self.listing_url(source, limit)?;
        debug!(source, %url, "fetching listing");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(source, &e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AggregateError::SourceUnavailable {
                source_id: source.to_string(),
                status: status.as_u16(),
            });
        }

        let listing: Listing = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                AggregateError::SourceTimeout {
                    source_id: source.to_string(),
                }
            } else {
                AggregateError::Decode {
                    source_id: source.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let posts: Vec<RawPost> = listing
            .data
            .children
            .into_iter()
            .map(|c| c.data)
            .collect();

        histogram!("aggregate_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        counter!("aggregate_posts_total").increment(posts.len() as u64);

        Ok(posts)
    }
}

fn classify_transport_error(source: &str, e: &reqwest::Error) -> AggregateError {
    if e.is_timeout() {
        AggregateError::SourceTimeout {
            source_id: source.to_string(),
        }
    } else {
        // connection-level failures carry no HTTP status
        AggregateError::SourceUnavailable {
            source_id: source.to_string(),
            status: e.status().map(|s| s.as_u16()).unwrap_or(0),
        }
    }
}
