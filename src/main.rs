//! Meme-News Aggregator — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the catalogue, the source client, and
//! the feed combiner into shared state.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meme_news_aggregator::aggregate::{AggregateCfg, Aggregator};
use meme_news_aggregator::api::{self, AppState};
use meme_news_aggregator::catalogue::Catalogue;
use meme_news_aggregator::feed::NewsFeed;
use meme_news_aggregator::metrics::Metrics;
use meme_news_aggregator::source::HttpSourceClient;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let catalogue = Arc::new(Catalogue::from_env()?);
    let metrics = Metrics::init(catalogue.news_source_count());

    let client = Arc::new(HttpSourceClient::new());
    let aggregator = Aggregator::new(client, Arc::clone(&catalogue), AggregateCfg::default());

    // No document-store collaborator is wired in the standalone binary; the
    // feed serves remote aggregation only.
    let feed = Arc::new(NewsFeed::new(aggregator, None));

    let router = api::create_router(AppState::new(feed)).merge(metrics.router());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "meme-news aggregator listening");
    axum::serve(listener, router).await?;

    Ok(())
}
