//! # Recallio Media
//!
//! Photo preparation for review uploads: edit a normalized crop rectangle
//! over a product photo, then re-encode the cropped result to fit a byte
//! budget. The crop editor and the compressor are independent leaf
//! components; they compose only in [`imaging::prepare_photo`] and in the
//! CLI.
//!
//! # Architecture: Two Leaves, One Seam
//!
//! ```text
//! CropEngine  ──(committed CropRect)──┐
//!                                     ├─→ prepare_photo ─→ CompressedFile | Unfit
//! RasterBackend ──(encode trials)─────┘
//! ```
//!
//! - [`crop::CropEngine`] is a pure value-transition state machine over a
//!   normalized rectangle: permissive clamping (drag coordinates are noisy by
//!   nature, so nothing is ever rejected), a minimum edge gap, and collapse
//!   to "no crop" whenever an edit covers the full image.
//! - [`imaging::compress_image`] is a bounded binary search over a downscale
//!   factor: encode, compare against the byte budget, halve the step, repeat
//!   at most ten times, keep the largest encoding that still fits.
//!
//! All pixel work goes through the [`imaging::RasterBackend`] trait, so the
//! search logic is tested against a scripted mock and only the thin
//! [`imaging::RustBackend`] touches the `image` crate.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`crop`] | Normalized crop-rectangle editing: resize, translate, reset, resync |
//! | [`imaging`] | Backend seam, scale search, production `image`-crate backend |
//! | [`naming`] | Output naming: extension swap to the encoded MIME subtype |
//! | [`output`] | JSON report types printed by the CLI |
//!
//! # Design Decisions
//!
//! ## Clamp, Don't Validate
//!
//! Crop edits come from drag gestures, and fast pointer movement routinely
//! produces coordinates outside `[0,1]`. Returning errors for those would
//! make every caller handle a failure that isn't one, so every operation is
//! total: out-of-range values clamp, non-finite values are dropped.
//!
//! ## Bounded Search Over Convergence
//!
//! The scale search stops after ten trials no matter what. Encoded size is
//! not monotone enough in pixel count to guarantee convergence, and each
//! trial is a full resample + encode — the iteration cap bounds worst-case
//! latency instead of chasing a fixed point.
//!
//! ## JPEG-Only Output
//!
//! The production backend encodes JPEG: it is the only lossy format the pure
//! Rust `image` stack encodes with a quality knob. The search itself is
//! format-agnostic — it only ever looks at byte counts and the backend's
//! reported MIME type.

pub mod crop;
pub mod imaging;
pub mod naming;
pub mod output;
