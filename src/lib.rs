// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod api;
pub mod catalogue;
pub mod error;
pub mod feed;
pub mod image;
pub mod metrics;
pub mod model;
pub mod relevance;
pub mod source;
pub mod store;
pub mod textutil;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{AggregateCfg, Aggregator};
pub use crate::api::{create_router, AppState};
pub use crate::catalogue::{Catalogue, Category};
pub use crate::error::AggregateError;
pub use crate::feed::NewsFeed;
pub use crate::model::{Meme, MemeKind, NewsItem, MEME_CAP};
