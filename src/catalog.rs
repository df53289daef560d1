//! Catalog building: per-document metadata for listing, search and filter.
//!
//! A catalog is regenerated from the collection directory on every request —
//! nothing is persisted or cached. Collections are small (tens of files) and
//! whole-file reads keep the metadata honest: what is on disk is what the
//! listing shows.
//!
//! Per-file failures are logged and the file is skipped; one malformed
//! document must never abort a whole listing. A missing collection
//! directory yields an empty catalog rather than an error.

use crate::config::ContentConfig;
use crate::pipeline::{excerpt, frontmatter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Metadata for one blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogMetadata {
    pub filename: String,
    pub title: String,
    /// Parsed from the `published` frontmatter key; `None` when absent or
    /// unparsable. Dateless posts sort after all dated ones.
    pub published: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub excerpt: String,
}

/// Metadata for one portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioMetadata {
    pub filename: String,
    pub title: String,
    pub technologies: Vec<String>,
    pub company: String,
    pub year: String,
    pub excerpt: String,
}

/// List blog posts, newest first, dateless posts last.
///
/// The sort is stable, so equal-date (and equally dateless) entries keep
/// their enumeration order.
pub async fn blog_catalog(config: &ContentConfig) -> Vec<BlogMetadata> {
    let dir = config.content_root.join(&config.blog_dir);
    let mut posts: Vec<BlogMetadata> = read_collection(&dir)
        .await
        .into_iter()
        .map(|(filename, text)| blog_metadata(filename, &text))
        .collect();
    posts.sort_by_key(|p| Reverse(p.published));
    posts
}

/// List portfolio projects in filesystem enumeration order.
pub async fn portfolio_catalog(config: &ContentConfig) -> Vec<PortfolioMetadata> {
    let dir = config.content_root.join(&config.portfolio_dir);
    read_collection(&dir)
        .await
        .into_iter()
        .map(|(filename, text)| portfolio_metadata(filename, &text))
        .collect()
}

/// Search blog posts by case-insensitive substring over title, excerpt and
/// tags. A blank term returns the full catalog.
pub async fn search_blogs(config: &ContentConfig, term: &str) -> Vec<BlogMetadata> {
    let posts = blog_catalog(config).await;
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return posts;
    }
    posts
        .into_iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&term)
                || p.excerpt.to_lowercase().contains(&term)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&term))
        })
        .collect()
}

/// Filter portfolio projects by case-insensitive substring over technology
/// tokens. A blank term returns the full catalog.
pub async fn filter_portfolio(config: &ContentConfig, technology: &str) -> Vec<PortfolioMetadata> {
    let projects = portfolio_catalog(config).await;
    let tech = technology.trim().to_lowercase();
    if tech.is_empty() {
        return projects;
    }
    projects
        .into_iter()
        .filter(|p| p.technologies.iter().any(|t| t.to_lowercase().contains(&tech)))
        .collect()
}

/// Read every immediate `.md` file in a collection directory.
///
/// Single level only — subdirectories are not walked. Unreadable files are
/// logged and skipped.
async fn read_collection(dir: &Path) -> Vec<(String, String)> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Collection directory '{}' not readable: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut documents = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let filename = entry.file_name().to_string_lossy().into_owned();
                if !filename.ends_with(".md") {
                    continue;
                }
                match entry.file_type().await {
                    Ok(ft) if ft.is_file() => {}
                    _ => continue,
                }
                match tokio::fs::read_to_string(entry.path()).await {
                    Ok(text) => documents.push((filename, text)),
                    Err(e) => {
                        warn!(
                            "Skipping '{}' in catalog: {}",
                            entry.path().display(),
                            e
                        );
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Directory walk error under '{}': {}", dir.display(), e);
                break;
            }
        }
    }
    documents
}

/// Build blog metadata from one document's raw text.
fn blog_metadata(filename: String, text: &str) -> BlogMetadata {
    let (fm, _) = frontmatter::split(text);
    let title = title_for(&filename, &fm);
    let published = fm.get("published").and_then(|v| parse_published(v));
    let tags = fm.get("tags").map(|v| split_tags(v)).unwrap_or_default();
    let excerpt = excerpt::extract(text);
    BlogMetadata {
        filename,
        title,
        published,
        tags,
        excerpt,
    }
}

/// Build portfolio metadata from one document's raw text.
fn portfolio_metadata(filename: String, text: &str) -> PortfolioMetadata {
    let (fm, _) = frontmatter::split(text);
    let title = title_for(&filename, &fm);
    let technologies = fm
        .get("technologies")
        .map(|v| split_technologies(v))
        .unwrap_or_default();
    let company = fm.get("company").cloned().unwrap_or_default();
    let year = fm.get("year").cloned().unwrap_or_default();
    let excerpt = excerpt::extract(text);
    PortfolioMetadata {
        filename,
        title,
        technologies,
        company,
        year,
        excerpt,
    }
}

/// Title from the `title` frontmatter key, else the filename with the
/// extension stripped and dashes turned into spaces.
fn title_for(filename: &str, fm: &HashMap<String, String>) -> String {
    fm.get("title").cloned().unwrap_or_else(|| {
        filename
            .strip_suffix(".md")
            .unwrap_or(filename)
            .replace('-', " ")
    })
}

/// Parse a publish date: `"MMM yyyy"` (e.g. "Mar 2024", taken as the first
/// of the month) with an ISO calendar-date fallback. Anything else is no
/// date.
fn parse_published(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("1 {value}"), "%d %b %Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

/// Tags split on commas or whitespace, leading `#` stripped, empties
/// dropped.
fn split_tags(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|t| t.trim().replace('#', ""))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Technologies split on commas only — names like "Spring Boot" keep their
/// internal spaces.
fn split_technologies(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_falls_back_to_filename() {
        let fm = HashMap::new();
        assert_eq!(title_for("my-post.md", &fm), "my post");
        assert_eq!(title_for("single.md", &fm), "single");
    }

    #[test]
    fn title_prefers_frontmatter() {
        let mut fm = HashMap::new();
        fm.insert("title".to_string(), "Proper Title".to_string());
        assert_eq!(title_for("my-post.md", &fm), "Proper Title");
    }

    #[test]
    fn month_year_date_parses_to_first_of_month() {
        assert_eq!(
            parse_published("Mar 2024"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn iso_date_parses_as_fallback() {
        assert_eq!(
            parse_published("2024-03-15"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn unparsable_date_is_none() {
        assert_eq!(parse_published("soonish"), None);
        assert_eq!(parse_published(""), None);
    }

    #[test]
    fn tags_split_on_commas_and_whitespace() {
        assert_eq!(
            split_tags("#rust, cli  #terminal"),
            vec!["rust", "cli", "terminal"]
        );
        assert_eq!(split_tags("  ,, "), Vec::<String>::new());
    }

    #[test]
    fn technologies_split_on_commas_only() {
        assert_eq!(
            split_technologies("Rust, Spring Boot , ,React"),
            vec!["Rust", "Spring Boot", "React"]
        );
    }

    #[test]
    fn blog_metadata_from_full_document() {
        let text = "---\ntitle: Hello\npublished: Mar 2024\ntags: #rust cli\n---\n\nOpening paragraph.\n\nRest.";
        let meta = blog_metadata("hello.md".to_string(), text);
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.published, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(meta.tags, vec!["rust", "cli"]);
        assert_eq!(meta.excerpt, "Opening paragraph.");
    }

    #[test]
    fn portfolio_metadata_defaults_to_empty_strings() {
        let meta = portfolio_metadata("proj.md".to_string(), "Just a body.");
        assert_eq!(meta.title, "proj");
        assert!(meta.technologies.is_empty());
        assert_eq!(meta.company, "");
        assert_eq!(meta.year, "");
    }

    #[test]
    fn blog_sort_is_descending_with_dateless_last() {
        let mut posts = vec![
            blog_metadata("old.md".into(), "---\npublished: Jan 2020\n---\nold"),
            blog_metadata("undated.md".into(), "no frontmatter"),
            blog_metadata("new.md".into(), "---\npublished: 2024-06-01\n---\nnew"),
        ];
        posts.sort_by_key(|p| Reverse(p.published));
        let names: Vec<&str> = posts.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["new.md", "old.md", "undated.md"]);
    }
}
