// src/model.rs
//! Domain records produced by the aggregator. Immutable after construction;
//! identity is a process-local uuid, while dedupe compares lowercased titles
//! within a single run (a documented heuristic, not a strong identity).

use serde::Serialize;
use uuid::Uuid;

use crate::catalogue::Category;

/// Hard cap on related memes per news item.
pub const MEME_CAP: usize = 4;

/// Where a meme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemeKind {
    /// Fetched from a remote meme source during aggregation.
    Remote,
    /// Originated in the curated document store.
    Curated,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meme {
    pub id: Uuid,
    pub image_url: String,
    pub kind: MemeKind,
    pub title: Option<String>,
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub published_at: u64,
    pub memes: Vec<Meme>,
    pub source_url: Option<String>,
}

impl NewsItem {
    /// Key used for within-run deduplication.
    pub fn dedupe_key(&self) -> String {
        self.title.trim().to_lowercase()
    }
}
