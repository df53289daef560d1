//! Frontmatter extraction: split a document into key/value preamble and body.
//!
//! A document may open with a YAML-like block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: My Post
//! published: Mar 2024
//! ---
//! Body starts here.
//! ```
//!
//! The parser is deliberately shallow — one `key: value` per line, no
//! nesting, no quoting — because that is the full extent of what authors put
//! in these files. Every degenerate input fails open: no opening delimiter,
//! no closing delimiter, or a line without a colon all yield an empty map
//! and leave the text intact rather than raising an error.

use std::collections::HashMap;

/// The marker line that fences a frontmatter block.
pub const DELIMITER: &str = "---";

/// Split a document into its frontmatter mapping and body.
///
/// The body is everything after the second delimiter. When the text does not
/// start with a delimiter, or no second delimiter exists, the mapping is
/// empty and the body is the whole text.
///
/// Duplicate keys are last-write-wins; lines without a colon, or with
/// nothing before the colon, are ignored.
pub fn split(text: &str) -> (HashMap<String, String>, &str) {
    let Some(block_and_body) = text.strip_prefix(DELIMITER) else {
        return (HashMap::new(), text);
    };

    let Some(end) = block_and_body.find(DELIMITER) else {
        return (HashMap::new(), text);
    };

    let block = &block_and_body[..end];
    let body = &block_and_body[end + DELIMITER.len()..];

    let mut mapping = HashMap::new();
    for line in block.lines() {
        if let Some((key, value)) = line.split_once(':') {
            if !key.is_empty() {
                mapping.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    (mapping, body)
}

/// Return only the body, discarding any frontmatter block.
pub fn strip(text: &str) -> &str {
    split(text).1
}
