//! Raster backend trait and shared types.
//!
//! The [`RasterBackend`] trait is the seam between the scale search (which
//! decides *what size* to encode) and the pixel work (decode, crop, resample,
//! encode). The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust via the
//! `image` crate, statically linked.
//!
//! A backend holds one decoded source raster for its lifetime; the search
//! asks it repeatedly to encode that source at different output sizes. The
//! `Ok(None)` return on [`RasterBackend::encode_region`] means "the encoder
//! produced no data for this size" — the search treats that as a skipped
//! trial, not an error.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// The longer edge, used to derive the resolution-capping base scale.
    pub fn long_edge(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// A rectangular sub-region of the source raster, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One lossy encoding of the source raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// MIME type of the encoding, e.g. `image/jpeg`.
    pub mime_type: String,
}

/// Trait for raster surfaces the compressor can encode from.
///
/// Implementations hold mutable pixel-buffer state between draw and encode
/// steps, so a single backend instance must not be shared across concurrent
/// searches — each search gets its own, or the caller serializes access.
pub trait RasterBackend: Sync {
    /// Dimensions of the loaded source raster.
    fn dimensions(&self) -> Dimensions;

    /// Draw `region` of the source (or the whole source when `None`) scaled
    /// to `width`×`height`, and encode the result lossily.
    ///
    /// Returns `Ok(None)` when the encoder yields no data for this size.
    fn encode_region(
        &self,
        region: Option<PixelRegion>,
        width: u32,
        height: u32,
    ) -> Result<Option<Encoded>, BackendError>;
}
