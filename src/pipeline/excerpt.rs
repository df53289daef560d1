//! Excerpt extraction: derive a short plain-text summary from a document.
//!
//! Catalog listings show a one-or-two-line teaser per document. The excerpt
//! is taken from the raw Markdown (never from rendered output): frontmatter
//! is stripped, leading heading lines are dropped, inline markup is
//! collapsed to its inner text, and the result is cut at the first natural
//! paragraph break — or, failing that, at 150 characters with an ellipsis.
//!
//! The frontmatter strip here re-applies the same delimiter rule as
//! [`super::frontmatter`]; there is no shared state between the two.

use super::frontmatter;
use once_cell::sync::Lazy;
use regex::Regex;

/// Paragraph breaks are only honoured when they occur before this offset.
const PARAGRAPH_SEARCH_LIMIT: usize = 200;

/// Hard cap on excerpt length when no paragraph break is found in range.
const MAX_LENGTH: usize = 150;

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Extract an excerpt from raw document text (frontmatter still present).
///
/// The output is always trimmed and may be empty. Its length is at most
/// 150 visible characters unless it ends at a paragraph break found before
/// offset 200.
pub fn extract(raw: &str) -> String {
    let body = frontmatter::strip(raw);
    let body = strip_leading_headings(body);

    let text = RE_BOLD.replace_all(body, "$1");
    let text = RE_ITALIC.replace_all(&text, "$1");
    let text = RE_INLINE_CODE.replace_all(&text, "$1");
    let text = text.trim();

    truncate(text).trim().to_string()
}

/// Drop heading lines (`# …`) at the start of the body, including any blank
/// lines between them.
fn strip_leading_headings(body: &str) -> &str {
    let mut rest = body;
    loop {
        let skipped = rest.trim_start();
        if skipped.starts_with('#') {
            match skipped.find('\n') {
                Some(nl) => rest = &skipped[nl + 1..],
                None => return "",
            }
        } else {
            return rest;
        }
    }
}

/// Apply the truncation ladder: paragraph break before offset 200, else
/// 147 characters plus `...` when over 150, else unchanged.
fn truncate(text: &str) -> String {
    if let Some(break_at) = text.find("\n\n") {
        if break_at > 0 && break_at < PARAGRAPH_SEARCH_LIMIT {
            return text[..break_at].to_string();
        }
    }
    if text.chars().count() > MAX_LENGTH {
        let cut: String = text.chars().take(MAX_LENGTH - 3).collect();
        return format!("{cut}...");
    }
    text.to_string()
}
