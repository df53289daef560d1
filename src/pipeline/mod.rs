//! Pipeline stages for rendering documents into terminal art.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the Markdown parser) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! raw bytes ──▶ frontmatter ──▶ markdown ──▶ transform ──▶ terminal art
//! (document)    (split k/v)     (comrak)     (box dialect)
//!                                                │
//!                                            rasterize
//!                                            (images → glyphs)
//! ```
//!
//! 1. [`frontmatter`] — split the `---`-fenced preamble from the body
//! 2. [`excerpt`]     — derive a short plain-text summary (catalogs only;
//!    shares the delimiter rule with `frontmatter` but no state)
//! 3. [`markdown`]    — Markdown → HTML via comrak (the CommonMark black box)
//! 4. [`transform`]   — ordered rewrite of HTML into the box-drawing dialect
//! 5. [`rasterize`]   — decode embedded images into density-glyph grids; the
//!    only stage with network I/O
//! 6. [`reflow`]      — independent pipeline: wrap extracted PDF text into
//!    the fixed 90-column bordered block

pub mod excerpt;
pub mod frontmatter;
pub mod markdown;
pub mod rasterize;
pub mod reflow;
pub mod transform;
