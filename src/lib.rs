//! # termfolio
//!
//! Render Markdown content collections as box-drawing terminal art.
//!
//! ## Why this crate?
//!
//! A text-console UI cannot show HTML — headings, tables, links and images
//! all need a plain-text shape. Instead of hand-maintaining pre-rendered
//! text files, this crate keeps content as ordinary Markdown (with a
//! `---`-fenced frontmatter preamble) and renders it on demand into a
//! fixed-width box-drawing dialect: bordered headers sized to their text,
//! bullet glyphs, backtick code fences, and embedded images quantised into
//! density-glyph grids. A companion pipeline reflows extracted PDF resume
//! text into the same bordered layout at a fixed 90 columns.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document.md
//!  │
//!  ├─ 1. Frontmatter  split the ---‑fenced key/value preamble from the body
//!  ├─ 2. Markdown     body → HTML via comrak (tables enabled)
//!  ├─ 3. Transform    ordered rewrite of HTML into the box dialect
//!  │       └─ Rasterize  <img> → 80-cell glyph art (network or sandboxed fs)
//!  └─ 4. Output       ready-to-display terminal-art string
//!
//! resume.pdf ──▶ pdf-extract ──▶ Reflow (90-column bordered block)
//! ```
//!
//! Catalog building is a side pipeline: it reads each collection document,
//! extracts frontmatter and an excerpt, and produces sorted, searchable
//! metadata without ever rendering the body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use termfolio::{ContentConfig, ContentStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ContentConfig::builder()
//!         .content_root("content")
//!         .resume_pdf("content/resume.pdf")
//!         .build()?;
//!     let store = ContentStore::new(config);
//!
//!     for post in store.blog_catalog().await {
//!         println!("{} — {}", post.title, post.excerpt);
//!     }
//!     println!("{}", store.render_document("blog/hello-world.md").await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `termfolio` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! termfolio = { version = "0.1", default-features = false }
//! ```
//!
//! ## Degradation contract
//!
//! Rendering never leaves the caller without a usable string when a
//! reasonable default exists: unresolvable images degrade to an `[Image]`
//! placeholder, malformed frontmatter fails open to an empty mapping,
//! unparsable dates become "no date", and a broken catalog file is logged
//! and skipped. Only a missing document, a traversal attempt, or an
//! unreadable resume PDF surface as errors.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod catalog;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod store;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use catalog::{BlogMetadata, PortfolioMetadata};
pub use config::{ContentConfig, ContentConfigBuilder};
pub use error::{ContentError, RasterError};
pub use store::ContentStore;
