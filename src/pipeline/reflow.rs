//! Resume text reflow: wrap extracted PDF text into a fixed 90-column box.
//!
//! PDF extraction produces lines broken wherever the PDF laid them out, with
//! uneven trailing whitespace and stretches of blank lines. Reflow
//! normalises all of that and re-frames the text in the same box-drawing
//! dialect the document transformer uses — but with a *fixed* width: every
//! content line is padded (or hard-truncated) to exactly 90 columns, unlike
//! header boxes whose borders fit their text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Content width inside the border, in columns.
pub const CONTENT_WIDTH: usize = 90;

/// Returned verbatim (unboxed) when extraction produced no usable text.
pub const UNAVAILABLE_MESSAGE: &str =
    "Resume text unavailable. Run 'resume --download' to open the PDF.";

static RE_TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());
static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_BLANK_BEFORE_BOTTOM: Lazy<Regex> = Lazy::new(|| Regex::new("\n{2,}╚").unwrap());

/// Reflow raw extracted PDF text into the bordered 90-column block.
///
/// Blank input yields [`UNAVAILABLE_MESSAGE`] rather than an error or an
/// empty box.
pub fn format_resume(raw: &str) -> String {
    if raw.trim().is_empty() {
        return UNAVAILABLE_MESSAGE.to_string();
    }

    let normalized = normalize(raw);

    let rail: String = "═".repeat(CONTENT_WIDTH + 2);
    let blank_row = format!("║ {} ║\n", " ".repeat(CONTENT_WIDTH));

    let mut block = String::new();
    block.push('╔');
    block.push_str(&rail);
    block.push_str("╗\n");
    for paragraph in normalized.split("\n\n") {
        for line in wrap_paragraph(paragraph) {
            block.push_str("║ ");
            block.push_str(&pad_line(&line));
            block.push_str(" ║\n");
        }
        block.push_str(&blank_row);
    }
    block.push('╚');
    block.push_str(&rail);
    block.push('╝');

    // Collapse any accidental blank line directly above the bottom border.
    RE_BLANK_BEFORE_BOTTOM
        .replace_all(&block, "\n╚")
        .into_owned()
}

/// Normalise line endings, strip trailing whitespace, collapse 3+ newlines
/// to a paragraph break, trim overall.
fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = RE_TRAILING_WS.replace_all(&text, "\n");
    let text = RE_BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Split a paragraph into lines no wider than [`CONTENT_WIDTH`] columns.
///
/// Overlong lines break at the last space at-or-before column 90, or
/// mid-word when no space exists in range. Column arithmetic is rune-based
/// so multi-byte characters cannot split a line on a non-boundary.
fn wrap_paragraph(paragraph: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in paragraph.split('\n') {
        let mut chars: Vec<char> = raw_line.trim().chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }

        while chars.len() > CONTENT_WIDTH {
            let break_at = chars[..=CONTENT_WIDTH]
                .iter()
                .rposition(|&c| c == ' ')
                .filter(|&i| i > 0)
                .unwrap_or(CONTENT_WIDTH);
            lines.push(chars[..break_at].iter().collect());
            let rest: String = chars[break_at..].iter().collect();
            chars = rest.trim().chars().collect();
        }
        lines.push(chars.into_iter().collect());
    }
    lines
}

/// Right-pad a line to exactly [`CONTENT_WIDTH`] columns, hard-truncating
/// anything already at or past the limit.
fn pad_line(line: &str) -> String {
    let count = line.chars().count();
    if count >= CONTENT_WIDTH {
        return line.chars().take(CONTENT_WIDTH).collect();
    }
    format!("{}{}", line, " ".repeat(CONTENT_WIDTH - count))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every line between the borders must be exactly 94 runes:
    /// `║ ` + 90 columns + ` ║`.
    fn assert_uniform_width(block: &str) {
        for line in block.lines() {
            assert_eq!(
                line.chars().count(),
                CONTENT_WIDTH + 4,
                "line has wrong width: {line:?}"
            );
        }
    }

    #[test]
    fn blank_input_yields_fallback_message() {
        assert_eq!(format_resume(""), UNAVAILABLE_MESSAGE);
        assert_eq!(format_resume("   \n\t\n"), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn every_line_is_ninety_four_runes() {
        let block = format_resume("JANE DOE\nSoftware Engineer\n\nBuilt things at Example Corp.");
        assert_uniform_width(&block);
    }

    #[test]
    fn borders_are_double_line() {
        let block = format_resume("text");
        assert!(block.starts_with('╔'));
        assert!(block.ends_with('╝'));
        let first = block.lines().next().unwrap();
        assert_eq!(first.matches('═').count(), CONTENT_WIDTH + 2);
    }

    #[test]
    fn long_line_wraps_at_last_space() {
        let long = format!("{} tail", "word ".repeat(20).trim()); // > 90 chars
        let block = format_resume(&long);
        assert_uniform_width(&block);
        // No content row may carry more than 90 non-pad characters.
        for line in block.lines().filter(|l| l.starts_with('║')) {
            let content: String = line.chars().skip(2).take(CONTENT_WIDTH).collect();
            assert!(content.trim_end().chars().count() <= CONTENT_WIDTH);
            assert!(!content.trim_end().ends_with(' '));
        }
    }

    #[test]
    fn unbroken_run_hard_breaks_mid_word() {
        let long = "x".repeat(200);
        let block = format_resume(&long);
        assert_uniform_width(&block);
        let rows: Vec<&str> = block
            .lines()
            .filter(|l| l.starts_with('║') && l.contains('x'))
            .collect();
        assert_eq!(rows.len(), 3); // 90 + 90 + 20
    }

    #[test]
    fn paragraphs_are_separated_by_blank_row() {
        let block = format_resume("first\n\nsecond");
        let blank_row = format!("║ {} ║", " ".repeat(CONTENT_WIDTH));
        assert!(block.contains(&blank_row));
    }

    #[test]
    fn crlf_and_blank_runs_are_normalized() {
        let block = format_resume("a\r\n\r\n\r\n\r\nb");
        // Collapsed to one paragraph break: a-row, blank, b-row, blank.
        let content_rows = block.lines().filter(|l| l.starts_with('║')).count();
        assert_eq!(content_rows, 4);
    }

    #[test]
    fn no_blank_row_directly_above_bottom_border_is_doubled() {
        let block = format_resume("only paragraph");
        assert!(!block.contains("\n\n╚"));
    }
}
