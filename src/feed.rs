// src/feed.rs
//! The feed combiner: merges curated store items with the remote aggregation
//! result and keeps the last successful result in memory so the API can keep
//! serving through a total-failure run.

use std::sync::{Arc, RwLock};
use tracing::warn;

use crate::aggregate::{dedupe_by_title, Aggregator};
use crate::error::{AggregateError, Result};
use crate::model::NewsItem;
use crate::store::{self, DocumentStore};

pub struct NewsFeed {
    aggregator: Aggregator,
    docs: Option<Arc<dyn DocumentStore>>,
    last_good: RwLock<Option<Vec<NewsItem>>>,
}

impl NewsFeed {
    pub fn new(aggregator: Aggregator, docs: Option<Arc<dyn DocumentStore>>) -> Self {
        Self {
            aggregator,
            docs,
            last_good: RwLock::new(None),
        }
    }

    /// The sole entry point the presentation layer calls. Curated items are
    /// merged first; `include_remote` adds the fan-out result. The merged set
    /// is deduped and sorted newest-first, then cached.
    pub async fn fetch_aggregated_news(&self, include_remote: bool) -> Result<Vec<NewsItem>> {
        let mut items: Vec<NewsItem> = Vec::new();

        if let Some(docs) = &self.docs {
            match store::curated_news(docs.as_ref()).await {
                Ok(mut curated) => items.append(&mut curated),
                // the store degrades exactly like a failed source
                Err(e) => warn!(error = %e, "curated store unavailable"),
            }
        }

        if include_remote {
            match self.aggregator.run().await {
                Ok(mut remote) => items.append(&mut remote),
                Err(AggregateError::NoContentAvailable) => {}
                Err(e) => warn!(error = %e, "remote aggregation failed"),
            }
        }

        let mut items = dedupe_by_title(items);
        if items.is_empty() {
            return Err(AggregateError::NoContentAvailable);
        }
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        if let Ok(mut guard) = self.last_good.write() {
            *guard = Some(items.clone());
        }
        Ok(items)
    }

    /// Last successful result, if any run has succeeded.
    pub fn cached(&self) -> Option<Vec<NewsItem>> {
        self.last_good.read().ok().and_then(|g| g.clone())
    }
}
