//! Pure Rust raster backend — zero external dependencies.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | Region crop | `image::DynamicImage::crop_imm` |
//! | Resample | `image::imageops::resize` with `Lanczos3` |
//! | Encode | `image::codecs::jpeg::JpegEncoder` (lossy, quality-controlled) |
//!
//! Output is always JPEG: it is the one lossy format the `image` crate
//! encodes with a quality knob in pure Rust (its WebP encoder is lossless
//! only), and lossy output is the whole point of a byte-budget search.

use super::backend::{BackendError, Dimensions, Encoded, PixelRegion, RasterBackend};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Backend holding one decoded source image.
pub struct RustBackend {
    image: DynamicImage,
    quality: Quality,
}

impl RustBackend {
    /// Decode a source file from disk.
    pub fn open(path: &Path, quality: Quality) -> Result<Self, BackendError> {
        let image = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Self { image, quality })
    }

    /// Wrap an already-decoded image.
    pub fn from_image(image: DynamicImage, quality: Quality) -> Self {
        Self { image, quality }
    }
}

impl RasterBackend for RustBackend {
    fn dimensions(&self) -> Dimensions {
        let (width, height) = self.image.dimensions();
        Dimensions { width, height }
    }

    fn encode_region(
        &self,
        region: Option<PixelRegion>,
        width: u32,
        height: u32,
    ) -> Result<Option<Encoded>, BackendError> {
        let (width, height) = (width.max(1), height.max(1));

        let resized = match region {
            Some(r) => {
                let r = clamp_region(r, self.dimensions());
                self.image
                    .crop_imm(r.x, r.y, r.width, r.height)
                    .resize_exact(width, height, FilterType::Lanczos3)
            }
            None => self.image.resize_exact(width, height, FilterType::Lanczos3),
        };

        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(resized.into_rgb8());
        let mut bytes = Vec::new();
        let encoder =
            JpegEncoder::new_with_quality(Cursor::new(&mut bytes), self.quality.value() as u8);
        rgb.write_with_encoder(encoder)
            .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;

        Ok(Some(Encoded {
            bytes,
            mime_type: "image/jpeg".to_string(),
        }))
    }
}

/// Keep a requested region inside the source bounds, at least 1x1.
fn clamp_region(r: PixelRegion, dims: Dimensions) -> PixelRegion {
    let x = r.x.min(dims.width.saturating_sub(1));
    let y = r.y.min(dims.height.saturating_sub(1));
    PixelRegion {
        x,
        y,
        width: r.width.clamp(1, dims.width - x),
        height: r.height.clamp(1, dims.height - y),
    }
}
