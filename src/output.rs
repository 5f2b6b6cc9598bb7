//! CLI report types.
//!
//! Each subcommand prints one JSON document on stdout so the output is
//! pipeable into other tooling; human-oriented logging goes to stderr via
//! `tracing`.

use crate::crop::CropRect;
use serde::Serialize;

/// Result of a `prepare` run.
#[derive(Debug, Serialize)]
pub struct PrepareReport {
    pub input: String,
    pub output: String,
    pub original_bytes: u64,
    pub output_bytes: u64,
    /// MIME type of the re-encoded output; absent on fallback.
    pub mime_type: Option<String>,
    /// Whether the output fits the byte budget. `false` means no encoding
    /// fit and the original file was passed through unchanged.
    pub fit: bool,
    pub cropped: bool,
}

/// Result of an `inspect` run.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub input: String,
    pub width: u32,
    pub height: u32,
    /// The committed crop after normalization (absent = no crop).
    pub crop: Option<CropRect>,
    /// Pixel bounds the crop resolves to on this image, as `[x, y, w, h]`.
    pub pixel_bounds: Option<[u32; 4]>,
}

/// Render a report as pretty JSON for stdout.
pub fn render<T: Serialize>(report: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
