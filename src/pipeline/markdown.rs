//! Markdown → HTML via comrak.
//!
//! The transformer consumes HTML, not Markdown, so that its rewrite rules
//! only have to understand one, machine-generated dialect: comrak's output
//! for headers, paragraphs, lists, links, images, emphasis, code, tables and
//! hard breaks. Author quirks (lazy continuation, setext headings, entity
//! escaping) are all normalised away by the parser before we ever look at
//! the text.

use comrak::Options;

/// Render a Markdown body to HTML with the GFM `table` extension enabled.
///
/// Pure function; safe to call from any thread.
pub fn to_html(body: &str) -> String {
    let mut options = Options::default();
    options.extension.table = true;
    comrak::markdown_to_html(body, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_and_paragraphs() {
        let html = to_html("# Hello\n\nA paragraph.");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>A paragraph.</p>"));
    }

    #[test]
    fn renders_tables() {
        let html = to_html("| A | B |\n| --- | --- |\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn escapes_entities_in_text() {
        // Width measurement downstream depends on this: comrak escapes `&`
        // in header text and the transformer must decode it back.
        let html = to_html("# Fish & Chips");
        assert!(html.contains("Fish &amp; Chips"));
    }
}
