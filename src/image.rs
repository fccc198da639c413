// src/image.rs
//! Image resolution: pick the best available image URL for a post from a
//! ranked set of fields, plus the stricter gate meme candidates must pass.

use url::Url;

use crate::source::types::RawPost;

/// Preference order: preview source (entity-decoded) → direct `.jpg`/`.png`
/// URL → thumbnail. `None` when nothing parses as a URL.
pub fn best_image_url(post: &RawPost) -> Option<Url> {
    if let Some(raw) = post.preview_source_url() {
        // preview URLs arrive with `&amp;` in the query string
        let decoded = html_escape::decode_html_entities(raw);
        if let Ok(url) = Url::parse(&decoded) {
            return Some(url);
        }
    }

    if let Some(direct) = post.url.as_deref() {
        let lower = direct.to_lowercase();
        if lower.ends_with(".jpg") || lower.ends_with(".png") {
            if let Ok(url) = Url::parse(direct) {
                return Some(url);
            }
        }
    }

    // thumbnails can be sentinels like "self" or "default", not URLs
    post.thumbnail
        .as_deref()
        .filter(|t| t.starts_with("http"))
        .and_then(|t| Url::parse(t).ok())
}

/// Meme-only gate: no adult or video content, and the feed must declare the
/// post an image.
pub fn passes_meme_gate(post: &RawPost) -> bool {
    !post.over_18 && !post.is_video && post.post_hint.as_deref() == Some("image")
}
