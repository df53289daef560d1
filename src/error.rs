//! Error types for the termfolio library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ContentError`] — **Fatal for the operation**: the caller asked for
//!   something that cannot be produced at all (document not found, path
//!   escaping the content root, resume PDF unreadable). Returned as
//!   `Err(ContentError)` from [`crate::ContentStore`] operations.
//!
//! * [`RasterError`] — **Non-fatal**: a single embedded image could not be
//!   fetched or decoded. The transformer converts it to the literal
//!   `[Image]` placeholder and the surrounding document still renders.
//!   It never crosses the transformer boundary.
//!
//! Per-file catalog failures are a third category: they are logged with
//! `tracing::warn!` and the file is skipped, so they have no error type of
//! their own — one malformed document must never abort a catalog listing.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the termfolio library.
///
/// Image-level failures use [`RasterError`] and degrade to a placeholder
/// inside the rendered document rather than being propagated here.
#[derive(Debug, Error)]
pub enum ContentError {
    // ── Document errors ──────────────────────────────────────────────────
    /// The requested document was not found under the content root.
    #[error("Document not found: '{path}'\nCheck the path exists under the content root.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The logical path steps outside the content root (`..`, absolute path).
    #[error("Path '{path}' resolves outside the content root and was rejected")]
    PathOutsideRoot { path: String },

    /// Reading a file or directory failed for a reason other than the above.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Resume errors ────────────────────────────────────────────────────
    /// The configured resume PDF does not exist.
    #[error("Resume PDF not found: '{path}'\nPoint --resume-pdf (or ContentConfig::resume_pdf) at the file.")]
    ResumeNotFound { path: PathBuf },

    /// The resume PDF exists but its text could not be extracted.
    #[error("Failed to extract text from resume PDF '{path}': {detail}")]
    ResumeExtractFailed { path: PathBuf, detail: String },

    // ── Config errors ────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single embedded image.
///
/// Produced by [`crate::pipeline::rasterize`] and swallowed by
/// [`crate::pipeline::transform`], which substitutes the `[Image]`
/// placeholder. Rasterisation never fails a document render.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Remote image could not be fetched.
    #[error("Image fetch failed for '{url}': {detail}")]
    Fetch { url: String, detail: String },

    /// Local image file does not exist under the content root.
    #[error("Image file not found: '{path}'")]
    NotFound { path: PathBuf },

    /// The image reference steps outside the content root.
    #[error("Image reference '{reference}' resolves outside the content root")]
    OutsideRoot { reference: String },

    /// The bytes were read but are not a decodable image.
    #[error("Image decode failed for '{reference}': {detail}")]
    Decode { reference: String, detail: String },

    /// Reading the image file failed.
    #[error("I/O error reading image '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = ContentError::FileNotFound {
            path: PathBuf::from("blog/missing.md"),
        };
        let msg = e.to_string();
        assert!(msg.contains("blog/missing.md"), "got: {msg}");
        assert!(msg.contains("content root"));
    }

    #[test]
    fn path_outside_root_display() {
        let e = ContentError::PathOutsideRoot {
            path: "../../etc/passwd".into(),
        };
        assert!(e.to_string().contains("../../etc/passwd"));
    }

    #[test]
    fn resume_extract_failed_display() {
        let e = ContentError::ResumeExtractFailed {
            path: PathBuf::from("resume.pdf"),
            detail: "bad xref".into(),
        };
        assert!(e.to_string().contains("bad xref"));
    }

    #[test]
    fn raster_decode_display() {
        let e = RasterError::Decode {
            reference: "pic.png".into(),
            detail: "not a PNG".into(),
        };
        assert!(e.to_string().contains("pic.png"));
        assert!(e.to_string().contains("not a PNG"));
    }
}
