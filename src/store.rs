// src/store.rs
//! Collaborator boundary for the curated document store and the binary
//! object store. Records are typed inside the crate; the string-keyed field
//! map exists only at this edge.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::catalogue::Category;
use crate::model::{Meme, MemeKind, NewsItem};
use crate::textutil::{self, CARD_BUDGET};

pub const NEWS_COLLECTION: &str = "news";
pub const MEMES_COLLECTION: &str = "memes";

/// Dynamic payload shape the store collaborator speaks.
pub type FieldMap = HashMap<String, Value>;

/// A persistent document store: list, query-by-field equality, create.
/// Timestamps on created records are assigned by the store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, collection: &str) -> anyhow::Result<Vec<FieldMap>>;
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> anyhow::Result<Vec<FieldMap>>;
    async fn create(&self, collection: &str, fields: FieldMap) -> anyhow::Result<()>;
}

/// A binary object store: bytes in, durable URL out.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> anyhow::Result<String>;
}

/// A curated news document, typed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsRecord {
    pub news_id: String,
    pub title: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub published_at: u64,
}

impl NewsRecord {
    pub fn to_fields(&self) -> FieldMap {
        let mut m = FieldMap::new();
        m.insert("newsId".into(), Value::String(self.news_id.clone()));
        m.insert("title".into(), Value::String(self.title.clone()));
        m.insert("summary".into(), Value::String(self.summary.clone()));
        if let Some(url) = &self.image_url {
            m.insert("imageUrl".into(), Value::String(url.clone()));
        }
        m.insert(
            "category".into(),
            Value::String(self.category.as_str().to_string()),
        );
        m.insert("publishedAt".into(), Value::from(self.published_at));
        m
    }

    pub fn from_fields(m: &FieldMap) -> Option<Self> {
        Some(Self {
            news_id: m.get("newsId")?.as_str()?.to_string(),
            title: m.get("title")?.as_str()?.to_string(),
            summary: m
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            image_url: m
                .get("imageUrl")
                .and_then(Value::as_str)
                .map(str::to_string),
            category: Category::parse(m.get("category")?.as_str()?)?,
            published_at: m.get("publishedAt").and_then(Value::as_u64).unwrap_or(0),
        })
    }
}

/// A curated meme document, keyed to its news item by `newsId`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemeRecord {
    pub news_id: String,
    pub image_url: String,
    pub title: Option<String>,
}

impl MemeRecord {
    pub fn to_fields(&self) -> FieldMap {
        let mut m = FieldMap::new();
        m.insert("newsId".into(), Value::String(self.news_id.clone()));
        m.insert("imageUrl".into(), Value::String(self.image_url.clone()));
        if let Some(t) = &self.title {
            m.insert("title".into(), Value::String(t.clone()));
        }
        m
    }

    pub fn from_fields(m: &FieldMap) -> Option<Self> {
        Some(Self {
            news_id: m.get("newsId")?.as_str()?.to_string(),
            image_url: m.get("imageUrl")?.as_str()?.to_string(),
            title: m.get("title").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// Read the curated feed: every stored news record becomes a news item with
/// its stored memes attached, or a single default meme derived from its own
/// image when none are stored. Records that fail to decode are skipped.
pub async fn curated_news(docs: &dyn DocumentStore) -> anyhow::Result<Vec<NewsItem>> {
    let rows = docs.list(NEWS_COLLECTION).await?;
    let mut out = Vec::with_capacity(rows.len());

    for row in &rows {
        let Some(record) = NewsRecord::from_fields(row) else {
            warn!("skipping malformed curated news record");
            continue;
        };

        let mut memes: Vec<Meme> = match docs
            .query_eq(MEMES_COLLECTION, "newsId", &record.news_id)
            .await
        {
            Ok(rows) => rows
                .iter()
                .filter_map(MemeRecord::from_fields)
                .map(|m| Meme {
                    id: Uuid::new_v4(),
                    image_url: m.image_url,
                    kind: MemeKind::Curated,
                    title: m.title,
                    source_url: None,
                })
                .collect(),
            Err(e) => {
                warn!(news_id = %record.news_id, error = %e, "meme query failed");
                Vec::new()
            }
        };

        // curated items may fall back to a single meme made from their own image
        if memes.is_empty() {
            if let Some(url) = &record.image_url {
                memes.push(Meme {
                    id: Uuid::new_v4(),
                    image_url: url.clone(),
                    kind: MemeKind::Curated,
                    title: Some(record.title.clone()),
                    source_url: None,
                });
            }
        }

        out.push(NewsItem {
            id: Uuid::new_v4(),
            title: record.title.clone(),
            summary: textutil::cleanup(&record.summary, CARD_BUDGET),
            image_url: record.image_url.clone(),
            category: record.category,
            published_at: record.published_at,
            memes,
            source_url: None,
        });
    }

    Ok(out)
}

/// Admin-side draft: what the upload surface hands us. The store assigns the
/// publish timestamp.
#[derive(Debug, Clone)]
pub struct NewsDraft {
    pub title: String,
    pub summary: String,
    pub category: Category,
    pub image: Option<Vec<u8>>,
}

/// Writes admin-created news through both collaborators.
pub struct Publisher {
    docs: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
}

impl Publisher {
    pub fn new(docs: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { docs, objects }
    }

    /// Upload the image (if any), then create the news document. Returns the
    /// generated news id.
    pub async fn publish(&self, draft: NewsDraft) -> anyhow::Result<String> {
        let news_id = Uuid::new_v4().to_string();

        let image_url = match draft.image {
            Some(bytes) => Some(
                self.objects
                    .put(&format!("news/{news_id}.jpg"), bytes)
                    .await?,
            ),
            None => None,
        };

        let mut fields = FieldMap::new();
        fields.insert("newsId".into(), Value::String(news_id.clone()));
        fields.insert("title".into(), Value::String(draft.title));
        fields.insert(
            "summary".into(),
            Value::String(textutil::cleanup(&draft.summary, CARD_BUDGET)),
        );
        if let Some(url) = image_url {
            fields.insert("imageUrl".into(), Value::String(url));
        }
        fields.insert(
            "category".into(),
            Value::String(draft.category.as_str().to_string()),
        );
        // publishedAt intentionally absent: the store assigns it

        self.docs.create(NEWS_COLLECTION, fields).await?;
        Ok(news_id)
    }
}
