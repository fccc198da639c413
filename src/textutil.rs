// src/textutil.rs
//! Text normalizer: strips markdown/markup artifacts from free-form post
//! bodies and truncates to a bounded length at a sentence-safe boundary.
//! `cleanup` is idempotent; tests pin that property.

use once_cell::sync::Lazy;
use regex::Regex;

/// Returned for empty input so cards always have something to show.
pub const EMPTY_PLACEHOLDER: &str = "No description available.";

/// Budget for remote news summaries.
pub const SUMMARY_BUDGET: usize = 250;
/// Budget for curated store summaries (card-sized).
pub const CARD_BUDGET: usize = 150;

// Sentence-safe truncation: look for a clause boundary inside this window,
// preferring the one closest to TRUNCATE_TARGET.
const BOUNDARY_WINDOW_START: usize = 100;
const BOUNDARY_WINDOW_END: usize = 200;
const TRUNCATE_TARGET: usize = 150;

const BOUNDARY_CHARS: [char; 5] = ['.', '!', '?', ';', ':'];

static RE_MD_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static RE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static RE_CODE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]*)`").unwrap());
static RE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s*").unwrap());
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]*)\*\*").unwrap());
static RE_ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]*)\*").unwrap());
static RE_ITALIC_UNDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b_([^_]+)_\b").unwrap());
static RE_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*>\s*").unwrap());
static RE_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").unwrap());
static RE_NUM_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s+").unwrap());
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup artifacts and bound the result to `budget` characters.
pub fn cleanup(text: &str, budget: usize) -> String {
    if text.trim().is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let mut out = RE_MD_LINK.replace_all(text, "$1").into_owned();
    out = RE_URL.replace_all(&out, "").into_owned();
    out = html_escape::decode_html_entities(&out).into_owned();
    out = RE_CODE_BLOCK.replace_all(&out, "").into_owned();
    out = RE_INLINE_CODE.replace_all(&out, "$1").into_owned();
    out = RE_HEADER.replace_all(&out, "").into_owned();
    out = RE_BOLD.replace_all(&out, "$1").into_owned();
    out = RE_ITALIC_STAR.replace_all(&out, "$1").into_owned();
    out = RE_ITALIC_UNDER.replace_all(&out, "$1").into_owned();
    out = RE_QUOTE.replace_all(&out, "").into_owned();
    out = RE_LIST.replace_all(&out, "").into_owned();
    out = RE_NUM_LIST.replace_all(&out, "").into_owned();
    out = RE_WS.replace_all(&out, " ").trim().to_string();

    if out.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    truncate_sentence_safe(&out, budget)
}

/// Truncate at the clause boundary nearest the target offset when the text
/// exceeds `budget`, else hard-cut at `budget` and append an ellipsis.
fn truncate_sentence_safe(text: &str, budget: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= budget {
        return text.to_string();
    }

    let window_end = BOUNDARY_WINDOW_END.min(chars.len() - 1);
    let mut best: Option<usize> = None;
    for (i, c) in chars
        .iter()
        .enumerate()
        .take(window_end + 1)
        .skip(BOUNDARY_WINDOW_START)
    {
        if !BOUNDARY_CHARS.contains(c) {
            continue;
        }
        let dist = i.abs_diff(TRUNCATE_TARGET);
        match best {
            Some(b) if b.abs_diff(TRUNCATE_TARGET) <= dist => {}
            _ => best = Some(i),
        }
    }

    match best {
        // keep the boundary character itself
        Some(pos) => chars[..=pos].iter().collect(),
        None => {
            let mut cut: String = chars[..budget].iter().collect();
            cut.truncate(cut.trim_end().len());
            cut.push('…');
            cut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_placeholder() {
        assert_eq!(cleanup("", SUMMARY_BUDGET), EMPTY_PLACEHOLDER);
        assert_eq!(cleanup("   \n ", SUMMARY_BUDGET), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn markdown_links_keep_their_text() {
        let s = "see [the announcement](https://example.test/a) today";
        assert_eq!(cleanup(s, SUMMARY_BUDGET), "see the announcement today");
    }

    #[test]
    fn strips_headers_lists_and_quotes() {
        let s = "# Title\n> quoted line\n- first\n2. second\n**bold** and *em*";
        assert_eq!(
            cleanup(s, SUMMARY_BUDGET),
            "Title quoted line first second bold and em"
        );
    }

    #[test]
    fn decodes_entities_and_drops_raw_urls() {
        let s = "tickets &amp; passes &lt;here&gt; https://example.test/buy now";
        assert_eq!(cleanup(s, SUMMARY_BUDGET), "tickets & passes <here> now");
    }

    #[test]
    fn cleanup_is_idempotent() {
        let samples = [
            "## Heading\nsome **bold** text with [a link](https://x.test) and https://y.test",
            "plain text already clean",
            &"long sentence without any boundary characters at all ".repeat(8),
        ];
        for s in samples {
            let once = cleanup(s, CARD_BUDGET);
            assert_eq!(cleanup(&once, CARD_BUDGET), once, "not idempotent for {s:?}");
        }
    }
}
