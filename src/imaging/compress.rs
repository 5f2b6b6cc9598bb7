//! Byte-budget compression via a bounded scale search.
//!
//! Re-encoding at a fixed quality, output size is the only lever left for
//! hitting a byte budget, and encoded size is not a closed-form function of
//! pixel count. So the search is empirical: encode, measure, adjust. The
//! step schedule halves each trial (`0.5^i` for `i = 2..=11`), which makes it
//! a binary search over the scale factor with a **hard cap of 10 trials** —
//! worst-case latency is bounded by iteration count, not by convergence.
//!
//! Search shape:
//!
//! 1. Apply the one-time resolution cap (`base_scale`), encode at full
//!    capped size. Under budget → done, one encode total.
//! 2. Otherwise walk the scale: shrink when the last encode was over budget,
//!    grow when it was under, always by the current (halving) step.
//! 3. Track the *best fit*: the largest encoding seen that still fits. Stop
//!    early once it lands within 5% of the budget from below.
//! 4. Return the best fit if any trial ever fit; `None` otherwise.
//!
//! Trials are strictly sequential — each direction decision needs the
//! previous trial's byte size, so there is nothing to parallelize.

use super::backend::{BackendError, Dimensions, Encoded, PixelRegion, RasterBackend};
use super::params::CompressionTarget;
use crate::naming::file_name_for_mime;

/// First and last trial exponents: steps run `0.5^2 .. 0.5^11`, ten trials.
const FIRST_TRIAL: i32 = 2;
const LAST_TRIAL: i32 = 11;

/// Stop refining once the best fit is within this fraction of the budget.
const FIT_TOLERANCE: f64 = 0.95;

/// Floor for the scale factor. The step schedule keeps scale above ~0.5 on
/// its own; this guards the degenerate case where it wouldn't, since a zero
/// scale would mean encoding a zero-sized raster.
const MIN_SCALE: f64 = 0.01;

/// A re-encoded image ready to hand to the upload collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedFile {
    /// Original file name with its extension swapped to the encoded subtype.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl CompressedFile {
    fn from_encoded(encoded: Encoded, original_name: &str) -> Self {
        Self {
            file_name: file_name_for_mime(original_name, &encoded.mime_type),
            mime_type: encoded.mime_type,
            bytes: encoded.bytes,
        }
    }
}

/// Re-encode the source (or `region` of it) to fit `target.target_bytes`.
///
/// Returns `Ok(None)` when no trial ever produced an encoding under the
/// budget — including when the *initial* encode yields no blob at all, which
/// short-circuits the whole search. Callers should fall back to the original
/// unmodified file in that case rather than treating it as an error.
/// Per-trial encoder misses after the first are skipped, not surfaced.
///
/// Makes at most 11 encode calls (1 initial + 10 search trials).
pub fn compress_image(
    backend: &impl RasterBackend,
    original_name: &str,
    region: Option<PixelRegion>,
    target: &CompressionTarget,
) -> Result<Option<CompressedFile>, BackendError> {
    let source = match region {
        Some(r) => Dimensions {
            width: r.width,
            height: r.height,
        },
        None => backend.dimensions(),
    };

    let base_scale = match target.max_resolution {
        Some(cap) => (cap as f64 / source.long_edge().max(1) as f64).min(1.0),
        None => 1.0,
    };
    let output_size = |scale: f64| {
        let width = ((source.width as f64 * base_scale * scale).round() as u32).max(1);
        let height = ((source.height as f64 * base_scale * scale).round() as u32).max(1);
        (width, height)
    };

    // Fast path: most photos already fit at full (capped) resolution.
    let mut scale = 1.0_f64;
    let (width, height) = output_size(scale);
    let Some(first) = backend.encode_region(region, width, height)? else {
        return Ok(None);
    };
    tracing::debug!(width, height, bytes = first.bytes.len(), "initial encode");
    if first.bytes.len() <= target.target_bytes {
        return Ok(Some(CompressedFile::from_encoded(first, original_name)));
    }

    let mut last_size = first.bytes.len();
    let mut best_fit: Option<Encoded> = None;

    for trial in FIRST_TRIAL..=LAST_TRIAL {
        let step = 0.5_f64.powi(trial);
        if last_size > target.target_bytes {
            scale -= step;
        } else {
            scale += step;
        }
        scale = scale.max(MIN_SCALE);

        let (width, height) = output_size(scale);
        let Some(encoded) = backend.encode_region(region, width, height)? else {
            tracing::debug!(trial, scale, "encoder produced no data, skipping trial");
            continue;
        };
        last_size = encoded.bytes.len();
        tracing::debug!(trial, scale, width, height, bytes = last_size, "scale trial");

        if last_size <= target.target_bytes
            && best_fit.as_ref().is_none_or(|best| last_size > best.bytes.len())
        {
            best_fit = Some(encoded);
        }

        let close_enough = best_fit
            .as_ref()
            .is_some_and(|best| best.bytes.len() as f64 >= target.target_bytes as f64 * FIT_TOLERANCE);
        if close_enough {
            break;
        }
    }

    Ok(best_fit.map(|encoded| CompressedFile::from_encoded(encoded, original_name)))
}
