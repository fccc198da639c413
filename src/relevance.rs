// src/relevance.rs
//! Relevance gate primitives: the major-news predicate, the meme predicate,
//! and keyword extraction from news titles. All pure; the category keyword
//! sets live in the catalogue.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

/// Cross-category indicators that qualify a title regardless of its
/// category keyword set.
pub const TRENDING_INDICATORS: [&str; 6] = [
    "breaking",
    "exclusive",
    "viral",
    "trending",
    "just in",
    "massive",
];

/// A meme title must signal humor through one of these…
pub const HUMOR_INDICATORS: [&str; 8] = [
    "funny",
    "meme",
    "lol",
    "parody",
    "joke",
    "humor",
    "hilarious",
    "satire",
];

// …or match one of the hardcoded category-humor combinations: the anchor
// term plus at least one companion term.
const HUMOR_COMBOS: [(&str, &[&str]); 3] = [
    (
        "cricket",
        &["ipl", "wicket", "bowler", "batsman", "stumps", "sixer"],
    ),
    ("musk", &["tesla", "spacex", "rocket", "doge"]),
    ("election", &["vote", "ballot", "poll", "rally"]),
];

/// How many keywords to carry over from a news title into meme matching.
pub const MAX_TITLE_KEYWORDS: usize = 3;
/// Words this short carry no topical signal.
pub const MIN_KEYWORD_LEN: usize = 4;

// Dev logging gate: AGGREGATOR_DEV_LOG=1 AND a debug build.
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var("AGGREGATOR_DEV_LOG").ok().as_deref() == Some("1");
    on && cfg!(debug_assertions)
}

// Short anonymized id so dev logs never carry raw titles.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn dev_log_verdict(event: &str, title: &str, accepted: bool) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(title);
    info!(target: "relevance", %id, accepted, event);
}

/// True iff the lowercased title contains a category keyword or a
/// cross-category trending indicator.
pub fn is_major_news(title: &str, keywords: &[String]) -> bool {
    let t = title.to_lowercase();
    let hit = keywords.iter().any(|k| t.contains(k.as_str()))
        || TRENDING_INDICATORS.iter().any(|k| t.contains(k));
    dev_log_verdict("major_news", title, hit);
    hit
}

/// True iff the lowercased title signals humor AND shares a keyword with the
/// originating news title, or matches a hardcoded category-humor combo.
pub fn is_relevant_meme(title: &str, keywords: &[String]) -> bool {
    let t = title.to_lowercase();

    let humor = HUMOR_INDICATORS.iter().any(|h| t.contains(h));
    let topical = keywords.iter().any(|k| t.contains(k.as_str()));
    if humor && topical {
        dev_log_verdict("meme", title, true);
        return true;
    }

    let combo = HUMOR_COMBOS
        .iter()
        .any(|(anchor, terms)| t.contains(anchor) && terms.iter().any(|x| t.contains(x)));
    dev_log_verdict("meme", title, combo);
    combo
}

static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w+\b").unwrap());

/// Extract the up-to-3 longest words (over 3 characters) from a news title,
/// lowercased, original order preserved.
pub fn extract_keywords(title: &str) -> Vec<String> {
    let words: Vec<String> = RE_WORD
        .find_iter(title)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
        .collect();

    let mut indices: Vec<usize> = (0..words.len()).collect();
    indices.sort_by(|&a, &b| words[b].len().cmp(&words[a].len()).then(a.cmp(&b)));
    indices.truncate(MAX_TITLE_KEYWORDS);
    indices.sort_unstable();

    indices.into_iter().map(|i| words[i].clone()).collect()
}
