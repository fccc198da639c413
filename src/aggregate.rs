// src/aggregate.rs
//! Fan-out aggregator: one task per news source, a nested task group per
//! accepted candidate over that category's meme sources. Dispatches are
//! paced; completions are not. Producer tasks never touch shared state;
//! everything merges after join-all.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalogue::{Catalogue, Category};
use crate::error::{AggregateError, Result};
use crate::image;
use crate::model::{Meme, MemeKind, NewsItem, MEME_CAP};
use crate::relevance;
use crate::source::SourceClient;
use crate::textutil::{self, SUMMARY_BUDGET};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("aggregate_posts_total", "Candidate posts decoded from sources.");
        describe_counter!("aggregate_items_kept_total", "News items kept after filtering.");
        describe_counter!(
            "aggregate_dropped_no_memes_total",
            "Candidates dropped because zero relevant memes survived."
        );
        describe_counter!("aggregate_dedup_total", "Items removed by title deduplication.");
        describe_counter!("aggregate_source_errors_total", "Source fetch/decode errors.");
        describe_counter!("aggregate_task_failures_total", "Fan-out tasks that panicked.");
        describe_histogram!("aggregate_fetch_ms", "Source fetch time in milliseconds.");
        describe_gauge!("aggregate_last_run_ts", "Unix ts when the last run finished.");
    });
}

#[derive(Clone, Copy, Debug)]
pub struct AggregateCfg {
    /// Result limit requested from each source.
    pub listing_limit: u32,
    /// Delay between task dispatches, to stay under upstream rate limits.
    pub pacing: Duration,
}

impl Default for AggregateCfg {
    fn default() -> Self {
        Self {
            listing_limit: 25,
            pacing: Duration::from_millis(150),
        }
    }
}

/// Collaborators arrive via the constructor so tests can substitute fakes.
pub struct Aggregator {
    client: Arc<dyn SourceClient>,
    catalogue: Arc<Catalogue>,
    cfg: AggregateCfg,
}

impl Aggregator {
    pub fn new(client: Arc<dyn SourceClient>, catalogue: Arc<Catalogue>, cfg: AggregateCfg) -> Self {
        Self {
            client,
            catalogue,
            cfg,
        }
    }

    /// Run one aggregation: fan out over every configured news source, merge,
    /// dedupe, sort. Per-source failures degrade to empty contributions; only
    /// a fully empty merge is an error.
    pub async fn run(&self) -> Result<Vec<NewsItem>> {
        ensure_metrics_described();

        let mut handles: Vec<JoinHandle<Vec<NewsItem>>> = Vec::new();
        for category in Category::ALL {
            for source in self.catalogue.news_sources(category) {
                let task = NewsSourceTask {
                    client: Arc::clone(&self.client),
                    source: source.clone(),
                    category,
                    keywords: self.catalogue.keywords(category).to_vec(),
                    meme_sources: self.catalogue.meme_sources(category).to_vec(),
                    cfg: self.cfg,
                };
                handles.push(tokio::spawn(task.run()));
                // pace dispatches, not completions
                tokio::time::sleep(self.cfg.pacing).await;
            }
        }

        // join-all: the only write to the shared collection happens here
        let mut items: Vec<NewsItem> = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(contribution) => items.extend(contribution),
                Err(e) => {
                    warn!(error = ?e, "news source task failed to join");
                    counter!("aggregate_task_failures_total").increment(1);
                }
            }
        }

        let deduped = dedupe_by_title(items);
        if deduped.is_empty() {
            return Err(AggregateError::NoContentAvailable);
        }

        let mut items = deduped;
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        gauge!("aggregate_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
        Ok(items)
    }
}

/// Drop items whose lowercased title was already seen; first occurrence wins.
/// Near-duplicate titles from different sources are deliberately not caught.
pub fn dedupe_by_title(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    let mut dropped = 0u64;
    for item in items {
        if seen.insert(item.dedupe_key()) {
            out.push(item);
        } else {
            dropped += 1;
        }
    }
    if dropped > 0 {
        counter!("aggregate_dedup_total").increment(dropped);
    }
    out
}

struct NewsSourceTask {
    client: Arc<dyn SourceClient>,
    source: String,
    category: Category,
    keywords: Vec<String>,
    meme_sources: Vec<String>,
    cfg: AggregateCfg,
}

impl NewsSourceTask {
    /// Fetch one news source and turn qualifying posts into news items.
    /// Failures are logged and swallowed; siblings keep running.
    async fn run(self) -> Vec<NewsItem> {
        let posts = match self.client.fetch_hot(&self.source, self.cfg.listing_limit).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!(source = %self.source, error = %e, "news source failed");
                counter!("aggregate_source_errors_total").increment(1);
                return Vec::new();
            }
        };

        let mut out = Vec::new();
        for post in posts {
            if !relevance::is_major_news(&post.title, &self.keywords) {
                continue;
            }

            let title_keywords = relevance::extract_keywords(&post.title);
            let memes = fetch_memes(
                Arc::clone(&self.client),
                &self.meme_sources,
                &title_keywords,
                self.cfg,
            )
            .await;

            if memes.is_empty() {
                // a news item with zero relevant memes is dropped, not emitted
                counter!("aggregate_dropped_no_memes_total").increment(1);
                debug!(source = %self.source, "candidate dropped: no relevant memes");
                continue;
            }

            out.push(NewsItem {
                id: Uuid::new_v4(),
                title: post.title.clone(),
                summary: textutil::cleanup(&post.selftext, SUMMARY_BUDGET),
                image_url: image::best_image_url(&post).map(String::from),
                category: self.category,
                published_at: post.published_at(),
                memes,
                source_url: post.canonical_url(),
            });
        }

        counter!("aggregate_items_kept_total").increment(out.len() as u64);
        out
    }
}

/// Nested fan-out over one category's meme sources for a single accepted
/// candidate. Merged, capped at MEME_CAP; per-source failures contribute
/// nothing.
async fn fetch_memes(
    client: Arc<dyn SourceClient>,
    meme_sources: &[String],
    keywords: &[String],
    cfg: AggregateCfg,
) -> Vec<Meme> {
    let mut handles: Vec<JoinHandle<Vec<Meme>>> = Vec::new();
    for source in meme_sources {
        let client = Arc::clone(&client);
        let source = source.clone();
        let keywords = keywords.to_vec();
        handles.push(tokio::spawn(async move {
            fetch_meme_source(client, source, keywords, cfg.listing_limit).await
        }));
        tokio::time::sleep(cfg.pacing).await;
    }

    let mut memes = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(mut contribution) => memes.append(&mut contribution),
            Err(e) => {
                warn!(error = ?e, "meme source task failed to join");
                counter!("aggregate_task_failures_total").increment(1);
            }
        }
    }
    memes.truncate(MEME_CAP);
    memes
}

async fn fetch_meme_source(
    client: Arc<dyn SourceClient>,
    source: String,
    keywords: Vec<String>,
    limit: u32,
) -> Vec<Meme> {
    let posts = match client.fetch_hot(&source, limit).await {
        Ok(posts) => posts,
        Err(e) => {
            warn!(source = %source, error = %e, "meme source failed");
            counter!("aggregate_source_errors_total").increment(1);
            return Vec::new();
        }
    };

    posts
        .into_iter()
        .filter(image::passes_meme_gate)
        .filter(|p| relevance::is_relevant_meme(&p.title, &keywords))
        .filter_map(|p| {
            let image_url = image::best_image_url(&p)?;
            Some(Meme {
                id: Uuid::new_v4(),
                image_url: image_url.into(),
                kind: MemeKind::Remote,
                title: Some(p.title.clone()),
                source_url: p.canonical_url(),
            })
        })
        .collect()
}
