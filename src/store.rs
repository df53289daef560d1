//! The content store: public operations over a sandboxed content root.
//!
//! [`ContentStore`] is the crate's operation surface. Every call is
//! stateless and side-effect-free except for one cached value: the resume
//! plain text. PDF text extraction is expensive, so it runs once behind a
//! [`tokio::sync::OnceCell`] — concurrent first callers race for a single
//! initialisation, and every caller after the cell is populated reads it
//! without taking any lock.
//!
//! Documents are read whole; collections here are personal-site sized and
//! streaming would buy nothing.

use crate::catalog::{self, BlogMetadata, PortfolioMetadata};
use crate::config::ContentConfig;
use crate::error::ContentError;
use crate::pipeline::{frontmatter, markdown, reflow, transform};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{debug, info};
use walkdir::WalkDir;

/// A content store rooted at a sandboxed directory.
///
/// # Example
/// ```rust,no_run
/// use termfolio::{ContentConfig, ContentStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = ContentStore::new(ContentConfig::default());
///     let art = store.render_document("blog/hello-world.md").await?;
///     println!("{art}");
///     Ok(())
/// }
/// ```
pub struct ContentStore {
    config: ContentConfig,
    resume_text: OnceCell<String>,
}

impl ContentStore {
    /// Create a store over the given configuration.
    pub fn new(config: ContentConfig) -> Self {
        Self {
            config,
            resume_text: OnceCell::new(),
        }
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// List the file names under a logical directory, walking nested
    /// subdirectories. A missing directory yields an empty list.
    pub async fn list_directory(&self, path: &str) -> Result<Vec<String>, ContentError> {
        let dir = self.resolve(path)?;
        if !dir.exists() {
            debug!("Directory '{}' does not exist; empty listing", dir.display());
            return Ok(Vec::new());
        }

        let mut contents = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1) {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("walk error"));
                ContentError::Io {
                    path: dir.clone(),
                    source,
                }
            })?;
            if entry.file_type().is_file() {
                contents.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(contents)
    }

    /// Render a document to terminal art.
    ///
    /// Runs the full pipeline: frontmatter strip → Markdown → HTML →
    /// terminal-art transform. Embedded relative images resolve against the
    /// document's own directory.
    pub async fn render_document(&self, path: &str) -> Result<String, ContentError> {
        let full = self.resolve(path)?;
        let raw = read_document(&full).await?;

        let (_, body) = frontmatter::split(&raw);
        let html = markdown::to_html(body);

        // e.g. "blog" from "blog/post.md"; top-level documents get "".
        let doc_dir = path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");

        let art = transform::html_to_terminal(&html, doc_dir, &self.config).await;
        info!("Rendered '{}' ({} chars)", path, art.len());
        Ok(art)
    }

    /// List blog posts, newest first, dateless posts last.
    pub async fn blog_catalog(&self) -> Vec<BlogMetadata> {
        catalog::blog_catalog(&self.config).await
    }

    /// Search blog posts by title, excerpt or tag (case-insensitive).
    pub async fn search_blogs(&self, term: &str) -> Vec<BlogMetadata> {
        catalog::search_blogs(&self.config, term).await
    }

    /// List portfolio projects in enumeration order.
    pub async fn portfolio_catalog(&self) -> Vec<PortfolioMetadata> {
        catalog::portfolio_catalog(&self.config).await
    }

    /// Filter portfolio projects by technology (case-insensitive).
    pub async fn filter_portfolio(&self, technology: &str) -> Vec<PortfolioMetadata> {
        catalog::filter_portfolio(&self.config, technology).await
    }

    /// The resume, reflowed into the bordered 90-column block.
    ///
    /// Computed once per store; later calls return the cached block without
    /// locking.
    pub async fn resume_text(&self) -> Result<&str, ContentError> {
        self.resume_text
            .get_or_try_init(|| self.load_resume_text())
            .await
            .map(String::as_str)
    }

    /// The raw resume PDF bytes, for download/attachment delivery.
    pub async fn resume_attachment(&self) -> Result<Vec<u8>, ContentError> {
        let path = self.config.resume_pdf.clone();
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ContentError::ResumeNotFound { path })
            }
            Err(e) => Err(ContentError::Io { path, source: e }),
        }
    }

    /// Extract and reflow the resume text. Extraction is CPU-bound, so it
    /// runs under `spawn_blocking` rather than stalling the runtime.
    async fn load_resume_text(&self) -> Result<String, ContentError> {
        let path = self.config.resume_pdf.clone();
        let bytes = self.resume_attachment().await?;
        info!("Extracting resume text from '{}'", path.display());

        let extract_path = path.clone();
        let raw = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                ContentError::ResumeExtractFailed {
                    path: extract_path,
                    detail: e.to_string(),
                }
            })
        })
        .await
        .map_err(|e| ContentError::Internal(format!("extraction task panicked: {e}")))??;

        Ok(reflow::format_resume(&raw))
    }

    /// Resolve a logical path, rejecting traversal outside the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, ContentError> {
        self.config
            .resolve_logical(path)
            .ok_or_else(|| ContentError::PathOutsideRoot {
                path: path.to_string(),
            })
    }
}

/// Read a document file, mapping I/O failures to the error taxonomy.
async fn read_document(path: &Path) -> Result<String, ContentError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ContentError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ContentError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ContentError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn render_rejects_traversal() {
        let store = ContentStore::new(ContentConfig::default());
        let err = store.render_document("../outside.md").await.unwrap_err();
        assert!(matches!(err, ContentError::PathOutsideRoot { .. }));
    }

    #[tokio::test]
    async fn render_missing_document_is_not_found() {
        let store = ContentStore::new(ContentConfig::default());
        let err = store
            .render_document("blog/definitely-missing.md")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn missing_directory_lists_empty() {
        let store = ContentStore::new(ContentConfig::default());
        let listing = store.list_directory("no-such-dir").await.unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn missing_resume_pdf_is_explicit_error() {
        let config = ContentConfig::builder()
            .resume_pdf("/definitely/not/here.pdf")
            .build()
            .unwrap();
        let store = ContentStore::new(config);
        let err = store.resume_text().await.unwrap_err();
        assert!(matches!(err, ContentError::ResumeNotFound { .. }));
    }
}
