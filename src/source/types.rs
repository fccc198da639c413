// src/source/types.rs
//! Wire types for a subreddit-style listing: the JSON envelope is
//! `{ data: { children: [ { data: {...post...} } ] } }`. A decoded post is
//! a transient candidate; it lives only while one response is processed.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
pub struct Child {
    pub data: RawPost,
}

/// One candidate post as the feed returns it. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub preview: Option<Preview>,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub subreddit: String,
    pub permalink: Option<String>,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub is_video: bool,
    pub post_hint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewImage {
    pub source: PreviewSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSource {
    pub url: Option<String>,
}

impl RawPost {
    /// Source URL of the first preview image, if the feed supplied one.
    pub fn preview_source_url(&self) -> Option<&str> {
        self.preview
            .as_ref()?
            .images
            .first()?
            .source
            .url
            .as_deref()
    }

    pub fn published_at(&self) -> u64 {
        if self.created_utc.is_finite() && self.created_utc > 0.0 {
            self.created_utc as u64
        } else {
            0
        }
    }

    /// Canonical link back to the post; the permalink wins over the raw url.
    pub fn canonical_url(&self) -> Option<String> {
        match self.permalink.as_deref() {
            Some(p) if !p.is_empty() => Some(format!("https://www.reddit.com{p}")),
            _ => self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_listing_envelope() {
        let payload = r#"{
            "data": { "children": [
                { "data": {
                    "title": "Example post",
                    "selftext": "body",
                    "url": "https://i.example.test/a.jpg",
                    "created_utc": 1700000000.0,
                    "subreddit": "sports",
                    "permalink": "/r/sports/comments/abc/example_post/",
                    "over_18": false,
                    "is_video": false,
                    "post_hint": "image"
                } }
            ] }
        }"#;
        let listing: Listing = serde_json::from_str(payload).expect("decode listing");
        let post = &listing.data.children[0].data;
        assert_eq!(post.title, "Example post");
        assert_eq!(post.published_at(), 1_700_000_000);
        assert_eq!(
            post.canonical_url().as_deref(),
            Some("https://www.reddit.com/r/sports/comments/abc/example_post/")
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let listing: Listing =
            serde_json::from_str(r#"{ "data": { "children": [ { "data": {} } ] } }"#)
                .expect("decode sparse listing");
        let post = &listing.data.children[0].data;
        assert!(post.title.is_empty());
        assert_eq!(post.published_at(), 0);
        assert!(post.canonical_url().is_none());
        assert!(post.preview_source_url().is_none());
    }
}
