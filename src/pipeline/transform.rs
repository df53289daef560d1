//! HTML → terminal-art transformation.
//!
//! ## Why an ordered rule chain?
//!
//! The transformer rewrites comrak's HTML output into the box-drawing
//! terminal dialect through a fixed sequence of passes. Later rules assume
//! the output of earlier ones — lists are flattened before paragraph tags
//! are dropped, images are substituted before the residual-tag sweep — so
//! the order below is a contract, not an implementation detail.
//!
//! The chain is deliberately non-recursive: each pass runs exactly once over
//! the text. Nested or malformed HTML that a pass does not recognise falls
//! through to the final sweep, which strips whatever tags remain. Partially
//! converted output on degenerate input is accepted behaviour.
//!
//! Two passes need more than a find/replace: header boxes measure their
//! border against the *decoded visible* header text (nested tags stripped,
//! entities unescaped — a border sized against `&amp;` would misalign), and
//! image substitution walks matches explicitly so each reference can be
//! rasterised in source order.
//!
//! ## Rule order
//!
//! 1. h1/h2 → dynamically-sized double/single-line boxes
//! 2. h3–h6 → `**text**` with surrounding blank lines
//! 3. lists → `•` bullet lines
//! 4. paragraphs → double newline
//! 5. `<br>` → newline
//! 6. links → `text (url)`
//! 7. code blocks → ``` fences; inline code → backticks
//! 8. emphasis → `**bold**` / `*italic*`
//! 9. tables → single-line-per-row rails (lossy, not column-aligned)
//! 10. images → glyph art via the rasterizer, `[Image]` on failure
//! 11. sweep: strip residual tags and entities, tidy whitespace

use crate::config::ContentConfig;
use crate::pipeline::rasterize;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

/// Substituted for any image that has no `src` or cannot be rasterised.
pub const IMAGE_PLACEHOLDER: &str = "[Image]";

/// Bullet prefix for list items.
const BULLET: &str = "  • ";

/// One box-drawing glyph set.
struct BoxGlyphs {
    top_left: char,
    horizontal: char,
    top_right: char,
    vertical: char,
    bottom_left: char,
    bottom_right: char,
}

/// Double-line set for h1 headers.
const DOUBLE_BOX: BoxGlyphs = BoxGlyphs {
    top_left: '╔',
    horizontal: '═',
    top_right: '╗',
    vertical: '║',
    bottom_left: '╚',
    bottom_right: '╝',
};

/// Single-line set for h2 headers.
const SINGLE_BOX: BoxGlyphs = BoxGlyphs {
    top_left: '┌',
    horizontal: '─',
    top_right: '┐',
    vertical: '│',
    bottom_left: '└',
    bottom_right: '┘',
};

/// Rewrite an HTML fragment into the terminal-art dialect.
///
/// `doc_dir` is the logical directory of the source document, used to
/// resolve relative image references. Images render strictly serially in
/// source order; a document with many remote images pays their latency
/// one by one.
pub async fn html_to_terminal(html: &str, doc_dir: &str, config: &ContentConfig) -> String {
    let text = render_boxed_headers(html);
    let text = rewrite_minor_headers(&text);
    let text = rewrite_lists(&text);
    let text = rewrite_paragraphs(&text);
    let text = rewrite_links(&text);
    let text = rewrite_code(&text);
    let text = rewrite_emphasis(&text);
    let text = rewrite_tables(&text);
    let text = rewrite_images(&text, doc_dir, config).await;
    let text = strip_residual_markup(&text);
    tidy_whitespace(&text)
}

// ── Rule 1: dynamic h1/h2 boxes ──────────────────────────────────────────

static RE_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<h1[^>]*>(.*?)</h1>").unwrap());
static RE_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<h2[^>]*>(.*?)</h2>").unwrap());
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

fn render_boxed_headers(html: &str) -> String {
    let text = RE_H1.replace_all(html, |caps: &Captures<'_>| {
        boxed_header(&visible_header_text(&caps[1]), &DOUBLE_BOX)
    });
    RE_H2
        .replace_all(&text, |caps: &Captures<'_>| {
            boxed_header(&visible_header_text(&caps[1]), &SINGLE_BOX)
        })
        .into_owned()
}

/// Reduce raw header inner HTML to its decoded visible text.
///
/// Nested tags are stripped and entities decoded *before* the border width
/// is measured; measuring raw markup would draw borders wider than the text.
fn visible_header_text(raw: &str) -> String {
    let no_tags = RE_TAG.replace_all(raw, "");
    html_escape::decode_html_entities(no_tags.trim()).into_owned()
}

/// Emit the three-line box: top border, `║  text  ║`, bottom border.
///
/// Border width is the visible rune count plus 4 (two padding spaces each
/// side), so all three lines of one block have identical rune width.
fn boxed_header(text: &str, glyphs: &BoxGlyphs) -> String {
    let width = text.chars().count() + 4;
    let rail: String = std::iter::repeat(glyphs.horizontal).take(width).collect();
    format!(
        "\n{}{}{}\n{}  {}  {}\n{}{}{}\n",
        glyphs.top_left,
        rail,
        glyphs.top_right,
        glyphs.vertical,
        text,
        glyphs.vertical,
        glyphs.bottom_left,
        rail,
        glyphs.bottom_right,
    )
}

// ── Rule 2: h3–h6 collapse to bold ───────────────────────────────────────

static RE_MINOR_HEADERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    (3..=6)
        .map(|level| Regex::new(&format!(r"<h{level}[^>]*>([^<]*)</h{level}>")).unwrap())
        .collect()
});

fn rewrite_minor_headers(text: &str) -> String {
    let mut out = text.to_string();
    for re in RE_MINOR_HEADERS.iter() {
        out = re.replace_all(&out, "\n**$1**\n").into_owned();
    }
    out
}

// ── Rule 3: lists ────────────────────────────────────────────────────────

static RE_UL_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<ul[^>]*>").unwrap());
static RE_LI_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<li[^>]*>").unwrap());

fn rewrite_lists(text: &str) -> String {
    let out = RE_UL_OPEN.replace_all(text, "");
    let out = out.replace("</ul>", "");
    let out = RE_LI_OPEN.replace_all(&out, BULLET);
    out.replace("</li>", "\n")
}

// ── Rules 4–5: paragraphs and line breaks ────────────────────────────────

static RE_P_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<p[^>]*>").unwrap());
static RE_BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br[^>]*>").unwrap());

fn rewrite_paragraphs(text: &str) -> String {
    let out = RE_P_OPEN.replace_all(text, "");
    let out = out.replace("</p>", "\n\n");
    RE_BR.replace_all(&out, "\n").into_owned()
}

// ── Rule 6: links ────────────────────────────────────────────────────────

static RE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a[^>]*href="([^"]*)"[^>]*>([^<]*)</a>"#).unwrap());

fn rewrite_links(text: &str) -> String {
    RE_LINK.replace_all(text, "$2 ($1)").into_owned()
}

// ── Rule 7: code blocks and inline code ──────────────────────────────────

static RE_PRE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<pre[^>]*><code[^>]*>").unwrap());
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<code[^>]*>([^<]*)</code>").unwrap());

fn rewrite_code(text: &str) -> String {
    let out = RE_PRE_OPEN.replace_all(text, "\n```\n");
    let out = out.replace("</code></pre>", "\n```\n");
    RE_INLINE_CODE.replace_all(&out, "`$1`").into_owned()
}

// ── Rule 8: emphasis ─────────────────────────────────────────────────────

static RE_STRONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<strong[^>]*>([^<]*)</strong>").unwrap());
static RE_EM: Lazy<Regex> = Lazy::new(|| Regex::new(r"<em[^>]*>([^<]*)</em>").unwrap());

fn rewrite_emphasis(text: &str) -> String {
    let out = RE_STRONG.replace_all(text, "**$1**");
    RE_EM.replace_all(&out, "*$1*").into_owned()
}

// ── Rule 9: tables ───────────────────────────────────────────────────────
//
// Lossy single-line-per-row approximation: corner glyphs open and close the
// table, each row ends on a side rail, cells are delimited by vertical bars.
// Cell content is not column-aligned.

static RE_TABLE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<table[^>]*>").unwrap());
static RE_TR_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<tr[^>]*>").unwrap());
static RE_TH_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<th[^>]*>").unwrap());
static RE_TD_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<td[^>]*>").unwrap());

fn rewrite_tables(text: &str) -> String {
    let out = RE_TABLE_OPEN.replace_all(text, "\n┌");
    let out = out.replace("</table>", "┘\n");
    let out = RE_TR_OPEN.replace_all(&out, "");
    let out = out.replace("</tr>", "\n├");
    let out = RE_TH_OPEN.replace_all(&out, "─ ");
    let out = out.replace("</th>", " ─");
    let out = RE_TD_OPEN.replace_all(&out, "│ ");
    out.replace("</td>", " │")
}

// ── Rule 10: images ──────────────────────────────────────────────────────

static RE_IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]*src="([^"]*)"[^>]*>"#).unwrap());
static RE_IMG_ANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"<img[^>]*>").unwrap());

/// Substitute every `<img src=…>` with rasterised glyph art, in source
/// order. An explicit match walk (rather than `replace_all`) because each
/// substitution awaits the rasterizer. Failures degrade to the placeholder;
/// `src`-less images become the placeholder directly.
async fn rewrite_images(text: &str, doc_dir: &str, config: &ContentConfig) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in RE_IMG_SRC.captures_iter(text) {
        let whole = caps.get(0).expect("capture 0 always present");
        out.push_str(&text[last..whole.start()]);
        let src = &caps[1];
        match rasterize::glyph_art(src, doc_dir, config).await {
            Ok(art) => out.push_str(&art),
            Err(e) => {
                warn!("Image '{}' degraded to placeholder: {}", src, e);
                out.push_str(IMAGE_PLACEHOLDER);
            }
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);
    RE_IMG_ANY.replace_all(&out, IMAGE_PLACEHOLDER).into_owned()
}

// ── Rule 11: final sweep ─────────────────────────────────────────────────

static RE_ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[^;]+;").unwrap());

/// Strip any tag the earlier rules did not recognise, and delete residual
/// HTML entities. Entity deletion is information-lossy by contract: stray
/// `&copy;` or `&#8212;` in body text vanishes rather than being decoded.
fn strip_residual_markup(text: &str) -> String {
    let out = RE_TAG.replace_all(text, "");
    RE_ENTITY.replace_all(&out, "").into_owned()
}

static RE_TRAILING_BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());
static RE_LEADING_BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]+").unwrap());
static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Trim per-line edge whitespace, collapse runs of blank lines to a single
/// blank line, and trim the whole document. Operates on spaces and tabs
/// only so paragraph breaks survive.
fn tidy_whitespace(text: &str) -> String {
    let out = RE_TRAILING_BLANKS.replace_all(text, "\n");
    let out = RE_LEADING_BLANKS.replace_all(&out, "\n");
    let out = RE_BLANK_RUNS.replace_all(&out, "\n\n");
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentConfig;

    /// Render with a default config; tests here use no resolvable images.
    async fn render(html: &str) -> String {
        html_to_terminal(html, "", &ContentConfig::default()).await
    }

    #[test]
    fn h1_box_is_text_width_plus_four() {
        let out = render_boxed_headers("<h1>Hello</h1>");
        let lines: Vec<&str> = out.trim_matches('\n').lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "╔═════════╗"); // 5 + 4 = 9 horizontals
        assert_eq!(lines[1], "║  Hello  ║");
        assert_eq!(lines[2], "╚═════════╝");
        // All three lines of one block have equal rune width.
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn h2_box_uses_single_line_glyphs() {
        let out = render_boxed_headers("<h2>Hi</h2>");
        let lines: Vec<&str> = out.trim_matches('\n').lines().collect();
        assert_eq!(lines[0], "┌──────┐");
        assert_eq!(lines[1], "│  Hi  │");
        assert_eq!(lines[2], "└──────┘");
    }

    #[test]
    fn header_width_measured_after_entity_decode() {
        // `&amp;` must count as one rune, not five.
        let out = render_boxed_headers("<h1>A &amp; B</h1>");
        let lines: Vec<&str> = out.trim_matches('\n').lines().collect();
        assert_eq!(lines[1], "║  A & B  ║");
        assert_eq!(lines[0].chars().count(), 5 + 4 + 2);
    }

    #[test]
    fn header_nested_tags_are_stripped_before_measuring() {
        let out = render_boxed_headers("<h1>Hi <em>there</em></h1>");
        let lines: Vec<&str> = out.trim_matches('\n').lines().collect();
        assert_eq!(lines[1], "║  Hi there  ║");
    }

    #[test]
    fn header_matches_across_newlines() {
        let out = render_boxed_headers("<h1>Two\nLines</h1>");
        assert!(out.contains("║  Two\nLines  ║"));
    }

    #[tokio::test]
    async fn minor_headers_collapse_to_bold() {
        let out = render("<h3>Section</h3>").await;
        assert_eq!(out, "**Section**");
    }

    #[tokio::test]
    async fn list_items_become_bullets() {
        let out = render("<ul>\n<li>one</li>\n<li>two</li>\n</ul>").await;
        assert!(out.contains("• one"));
        assert!(out.contains("• two"));
    }

    #[tokio::test]
    async fn links_flatten_to_text_and_url() {
        let out = render(r#"<p><a href="https://example.com">site</a></p>"#).await;
        assert_eq!(out, "site (https://example.com)");
    }

    #[tokio::test]
    async fn code_blocks_are_fenced() {
        let out = render("<pre><code>let x = 1;\n</code></pre>").await;
        assert!(out.starts_with("```"));
        assert!(out.contains("let x = 1;"));
        assert!(out.ends_with("```"));
    }

    #[tokio::test]
    async fn inline_code_uses_backticks() {
        let out = render("<p>call <code>foo()</code> here</p>").await;
        assert_eq!(out, "call `foo()` here");
    }

    #[tokio::test]
    async fn emphasis_maps_to_markers() {
        let out = render("<p><strong>bold</strong> and <em>soft</em></p>").await;
        assert_eq!(out, "**bold** and *soft*");
    }

    #[tokio::test]
    async fn tables_get_rails_and_corners() {
        let html = "<table><tr><th>A</th></tr><tr><td>1</td></tr></table>";
        let out = render(html).await;
        assert!(out.contains('┌'));
        assert!(out.contains("─ A ─"));
        assert!(out.contains("│ 1 │"));
        assert!(out.contains('┘'));
    }

    #[tokio::test]
    async fn srcless_image_becomes_placeholder() {
        let out = render(r#"<p><img alt="x"></p>"#).await;
        assert_eq!(out, IMAGE_PLACEHOLDER);
    }

    #[tokio::test]
    async fn unresolvable_image_degrades_but_document_renders() {
        let html = r#"<h1>Post</h1><p><img src="missing.png" alt=""></p><p>after</p>"#;
        let out = render(html).await;
        assert!(out.contains(IMAGE_PLACEHOLDER));
        assert!(out.contains("║  Post  ║"));
        assert!(out.contains("after"));
    }

    #[tokio::test]
    async fn residual_tags_and_entities_are_swept() {
        let out = render("<p>before <blockquote>quoted</blockquote> &copy; after</p>").await;
        assert_eq!(out, "before quoted  after");
    }

    #[tokio::test]
    async fn blank_line_runs_collapse() {
        let out = render("<p>one</p><p>two</p><p>three</p>").await;
        assert_eq!(out, "one\n\ntwo\n\nthree");
    }

    #[tokio::test]
    async fn full_document_pipeline() {
        let html = crate::pipeline::markdown::to_html(
            "# Hello\n\nA paragraph with [a link](https://example.com).\n\n- item\n",
        );
        let out = render(&html).await;
        assert!(out.contains("╔═════════╗"));
        assert!(out.contains("a link (https://example.com)"));
        assert!(out.contains("• item"));
        assert!(!out.contains('<'), "no tags may survive: {out:?}");
    }
}
