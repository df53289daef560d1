//! Image rasterisation: decode an image and quantise it into glyph rows.
//!
//! Embedded images cannot be shown in a text console, so each one is resized
//! to a fixed 80-cell grid and mapped pixel-by-pixel onto a 10-step density
//! ramp. The vertical scale is halved because terminal glyphs are roughly
//! twice as tall as they are wide.
//!
//! The ramp is indexed from the light end: a bright pixel selects a dense
//! glyph and a dark pixel selects whitespace, which is how photographs read
//! correctly on the dark terminal background the art is destined for.
//!
//! Every failure mode — unreachable host, missing file, traversal attempt,
//! corrupt bytes — comes back as a [`RasterError`]. The transformer maps all
//! of them to the `[Image]` placeholder; rasterisation never fails a render.

use crate::config::ContentConfig;
use crate::error::RasterError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::path::PathBuf;
use tracing::debug;

/// Width of the glyph grid, in character cells.
pub const TARGET_WIDTH: u32 = 80;

/// Terminal glyphs are ~2× taller than wide; height is scaled down to match.
pub const ASPECT_CORRECTION: f64 = 0.5;

/// Density ramp, darkest glyph first.
pub const DENSITY_RAMP: [char; 10] = ['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

/// Rasterise an image reference into glyph art.
///
/// `reference` is either an absolute `http(s)` URL or a path relative to
/// `doc_dir`, the logical directory of the document embedding it. Relative
/// references are resolved under the sandboxed content root.
///
/// The output is one text line per sampled row, framed by a leading and
/// trailing blank line.
pub async fn glyph_art(
    reference: &str,
    doc_dir: &str,
    config: &ContentConfig,
) -> Result<String, RasterError> {
    let bytes = load_reference(reference, doc_dir, config).await?;
    let img = image::load_from_memory(&bytes).map_err(|e| RasterError::Decode {
        reference: reference.to_string(),
        detail: e.to_string(),
    })?;
    debug!(
        "Rasterising '{}' ({}x{})",
        reference,
        img.width(),
        img.height()
    );
    Ok(render_grid(&img))
}

/// Fetch or read the raw image bytes for a reference.
async fn load_reference(
    reference: &str,
    doc_dir: &str,
    config: &ContentConfig,
) -> Result<Vec<u8>, RasterError> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return fetch_remote(reference, config.fetch_timeout_secs).await;
    }

    let logical = if doc_dir.is_empty() {
        reference.to_string()
    } else {
        format!("{doc_dir}/{reference}")
    };
    let path = config
        .resolve_logical(&logical)
        .ok_or_else(|| RasterError::OutsideRoot {
            reference: reference.to_string(),
        })?;

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RasterError::NotFound { path })
        }
        Err(e) => Err(RasterError::Io { path, source: e }),
    }
}

/// Download a remote image with a per-call timeout.
async fn fetch_remote(url: &str, timeout_secs: u64) -> Result<Vec<u8>, RasterError> {
    let fetch_err = |detail: String| RasterError::Fetch {
        url: url.to_string(),
        detail,
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_err(e.to_string()))?;

    if !response.status().is_success() {
        return Err(fetch_err(format!("HTTP {}", response.status())));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| fetch_err(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Quantise a decoded image into the glyph grid.
pub(crate) fn render_grid(img: &DynamicImage) -> String {
    let (width, height) = img.dimensions();
    let rows = ((height as f64 / width as f64) * TARGET_WIDTH as f64 * ASPECT_CORRECTION).round()
        as u32;

    // Extreme panoramas collapse to zero rows; emit just the blank frame.
    if rows == 0 {
        return String::from("\n\n");
    }

    let resized = img
        .resize_exact(TARGET_WIDTH, rows, FilterType::Triangle)
        .to_rgb8();

    let mut art = String::with_capacity((TARGET_WIDTH as usize + 1) * rows as usize + 2);
    art.push('\n');
    for y in 0..rows {
        for x in 0..TARGET_WIDTH {
            let image::Rgb([r, g, b]) = *resized.get_pixel(x, y);
            let gray = (r as u32 + g as u32 + b as u32) / 3;
            let index = (gray * (DENSITY_RAMP.len() as u32 - 1) / 255) as usize;
            art.push(DENSITY_RAMP[DENSITY_RAMP.len() - 1 - index]);
        }
        art.push('\n');
    }
    art.push('\n');
    art
}
