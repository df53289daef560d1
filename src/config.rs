//! Configuration for the content rendering core.
//!
//! All behaviour is controlled through [`ContentConfig`], built via its
//! [`ContentConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across a [`crate::ContentStore`] and its
//! pipeline stages, and to log the exact setup a render ran with.
//!
//! The rendering constants themselves (80-cell image width, 90-column resume
//! reflow, the glyph ramp, the box-drawing sets) are deliberately *not*
//! configurable: they define the terminal-art dialect, and every border
//! invariant in the pipeline assumes them. They live as `const`s next to the
//! code that uses them.

use crate::error::ContentError;
use std::path::{Component, Path, PathBuf};

/// Configuration for a content store.
///
/// Built via [`ContentConfig::builder()`] or using
/// [`ContentConfig::default()`].
///
/// # Example
/// ```rust
/// use termfolio::ContentConfig;
///
/// let config = ContentConfig::builder()
///     .content_root("content")
///     .resume_pdf("content/resume.pdf")
///     .fetch_timeout_secs(10)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Directory all logical document paths are resolved under. Default: `content`.
    ///
    /// This is the sandbox boundary: no operation — document render, catalog
    /// walk, or relative image reference — may read outside it. Resolution
    /// rejects absolute paths and `..` components before touching the disk.
    pub content_root: PathBuf,

    /// Blog collection subdirectory under the root. Default: `blog`.
    pub blog_dir: String,

    /// Portfolio collection subdirectory under the root. Default: `portfolio`.
    pub portfolio_dir: String,

    /// Path to the resume PDF. Default: `content/resume.pdf`.
    ///
    /// Unlike document paths this may point anywhere — the resume is host
    /// configuration, not author content, so it is not sandboxed.
    pub resume_pdf: PathBuf,

    /// Timeout for fetching a remote image reference, in seconds. Default: 30.
    ///
    /// Images render strictly in source order, so one unreachable host would
    /// otherwise stall the whole document for the TCP default of minutes.
    pub fetch_timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content"),
            blog_dir: "blog".to_string(),
            portfolio_dir: "portfolio".to_string(),
            resume_pdf: PathBuf::from("content/resume.pdf"),
            fetch_timeout_secs: 30,
        }
    }
}

impl ContentConfig {
    /// Create a new builder for `ContentConfig`.
    pub fn builder() -> ContentConfigBuilder {
        ContentConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve a logical path against the content root.
    ///
    /// Returns `None` when the path is absolute or contains a `..`
    /// component. Containment is enforced lexically, before any file system
    /// access, so a missing file still gets a not-found error rather than a
    /// traversal error.
    pub fn resolve_logical(&self, logical: &str) -> Option<PathBuf> {
        let rel = Path::new(logical);
        if rel.is_absolute() {
            return None;
        }
        if rel
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }
        Some(self.content_root.join(rel))
    }
}

/// Builder for [`ContentConfig`].
#[derive(Debug)]
pub struct ContentConfigBuilder {
    config: ContentConfig,
}

impl ContentConfigBuilder {
    pub fn content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.content_root = root.into();
        self
    }

    pub fn blog_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.blog_dir = dir.into();
        self
    }

    pub fn portfolio_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.portfolio_dir = dir.into();
        self
    }

    pub fn resume_pdf(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.resume_pdf = path.into();
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ContentConfig, ContentError> {
        let c = &self.config;
        if c.content_root.as_os_str().is_empty() {
            return Err(ContentError::InvalidConfig(
                "content_root must not be empty".into(),
            ));
        }
        for (name, dir) in [("blog_dir", &c.blog_dir), ("portfolio_dir", &c.portfolio_dir)] {
            if dir.is_empty() || dir.contains('/') || dir.contains("..") {
                return Err(ContentError::InvalidConfig(format!(
                    "{name} must be a plain subdirectory name, got '{dir}'"
                )));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let config = ContentConfig::builder().build().unwrap();
        assert_eq!(config.blog_dir, "blog");
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn rejects_nested_collection_dir() {
        let result = ContentConfig::builder().blog_dir("a/b").build();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_root() {
        let result = ContentConfig::builder().content_root("").build();
        assert!(result.is_err());
    }

    #[test]
    fn timeout_clamped_to_one() {
        let config = ContentConfig::builder()
            .fetch_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(config.fetch_timeout_secs, 1);
    }

    #[test]
    fn resolve_logical_stays_in_root() {
        let config = ContentConfig::default();
        assert_eq!(
            config.resolve_logical("blog/post.md"),
            Some(PathBuf::from("content/blog/post.md"))
        );
        assert_eq!(config.resolve_logical("../secrets"), None);
        assert_eq!(config.resolve_logical("blog/../../secrets"), None);
        assert_eq!(config.resolve_logical("/etc/passwd"), None);
    }
}
