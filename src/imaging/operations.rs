//! High-level photo preparation.
//!
//! The crop engine and the compressor are independent; they meet only here.
//! `prepare_photo` resolves the committed crop to pixel bounds, runs the
//! scale search over that region, and reports whether the caller should use
//! the re-encoded result or fall back to the original unmodified file.

use super::backend::{BackendError, PixelRegion, RasterBackend};
use super::compress::{CompressedFile, compress_image};
use super::params::CompressionTarget;
use crate::crop::CropRect;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Outcome of preparing a photo for upload.
#[derive(Debug, Clone, PartialEq)]
pub enum PrepareResult {
    /// A re-encoded file under the byte budget.
    Compressed(CompressedFile),
    /// No encoding fit the budget; upload the original file as-is.
    Unfit,
}

/// Crop (if committed) and compress a photo to fit the target budget.
pub fn prepare_photo(
    backend: &impl RasterBackend,
    original_name: &str,
    crop: Option<CropRect>,
    target: &CompressionTarget,
) -> Result<PrepareResult> {
    let dims = backend.dimensions();
    let region = crop.map(|rect| {
        let (x, y, width, height) = rect.pixel_bounds(dims.width, dims.height);
        PixelRegion {
            x,
            y,
            width,
            height,
        }
    });

    match compress_image(backend, original_name, region, target)? {
        Some(file) => Ok(PrepareResult::Compressed(file)),
        None => Ok(PrepareResult::Unfit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockRaster;

    #[test]
    fn committed_crop_becomes_the_encode_region() {
        // Center half of a 640x480 source → 320x240 region drives the search
        let raster = MockRaster::new(640, 480, 0.01);
        let crop = CropRect {
            left: 0.25,
            top: 0.25,
            right: 0.75,
            bottom: 0.75,
        };
        let target = CompressionTarget::new(1_000_000);

        let result = prepare_photo(&raster, "item.jpg", Some(crop), &target).unwrap();

        assert_eq!(raster.recorded_calls(), vec![(320, 240)]);
        assert!(matches!(result, PrepareResult::Compressed(_)));
    }

    #[test]
    fn no_crop_encodes_the_whole_source() {
        let raster = MockRaster::new(640, 480, 0.01);
        let target = CompressionTarget::new(1_000_000);

        prepare_photo(&raster, "item.jpg", None, &target).unwrap();
        assert_eq!(raster.recorded_calls(), vec![(640, 480)]);
    }

    #[test]
    fn unfit_budget_reports_fallback() {
        let raster = MockRaster::new(1000, 1000, 1.0);
        let target = CompressionTarget::new(100); // nothing will ever fit

        let result = prepare_photo(&raster, "item.jpg", None, &target).unwrap();
        assert_eq!(result, PrepareResult::Unfit);
    }
}
