//! Normalized crop-rectangle editing.
//!
//! A crop is four normalized coordinates in `[0,1]` — fractions of the image
//! width/height — so the same rectangle applies to any rendition of the
//! photo. [`CropEngine`] owns the rectangle for one editing session and
//! applies edge drags and translations with *total clamping*: drag gestures
//! produce noisy, out-of-range coordinates mid-movement, and rejecting them
//! would make the UI stutter. Every input is clamped into validity instead.
//!
//! Two normalization rules shape the state:
//!
//! - Opposing edges never get closer than [`MIN_GAP`], so the rectangle can
//!   never degenerate to a line.
//! - A rectangle covering the full image is not a crop. Any edit that drives
//!   all four edges to their extremes collapses the stored state to `None`.
//!
//! The engine is a pure value-transition state machine: no I/O, no interior
//! mutability, single-caller only.

use serde::{Deserialize, Serialize};

/// Minimum normalized distance between opposing edges.
pub const MIN_GAP: f64 = 0.1;

/// The full-image rectangle. Never stored — see [`CropEngine::resize`].
const FULL_BOUNDS: CropRect = CropRect {
    left: 0.0,
    top: 0.0,
    right: 1.0,
    bottom: 1.0,
};

/// A crop rectangle in normalized coordinates.
///
/// Invariant (maintained by [`CropEngine`], not by construction):
/// `0 <= left <= right - MIN_GAP` and `0 <= top <= bottom - MIN_GAP`,
/// with `right <= 1` and `bottom <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CropRect {
    /// Map the normalized rectangle onto an image of the given pixel size.
    ///
    /// # Returns
    /// * `(x, y, width, height)` — integer pixel bounds, each dimension at
    ///   least 1 px and fully inside the image.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let width = width.max(1);
        let height = height.max(1);

        let x0 = ((self.left * width as f64).round() as u32).min(width - 1);
        let y0 = ((self.top * height as f64).round() as u32).min(height - 1);
        let x1 = ((self.right * width as f64).round() as u32).clamp(x0 + 1, width);
        let y1 = ((self.bottom * height as f64).round() as u32).clamp(y0 + 1, height);

        (x0, y0, x1 - x0, y1 - y0)
    }

    fn is_full_bounds(&self) -> bool {
        self.left <= 0.0 && self.top <= 0.0 && self.right >= 1.0 && self.bottom >= 1.0
    }
}

/// Which edge a resize drag targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Which axis a translation drag moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Crop state for one editing session.
///
/// `None` means "no crop" (the full image). The engine never stores the
/// explicit full-bounds rectangle; edits that reach it collapse to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropEngine {
    current: Option<CropRect>,
}

impl CropEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drag one edge to a proposed absolute coordinate.
    ///
    /// The value is clamped into `[0,1]` and held [`MIN_GAP`] away from the
    /// opposing edge — never rejected. Operates on the full-image rectangle
    /// when no crop exists yet, so the first resize implicitly creates one.
    /// If the resulting rectangle covers the full image, the crop is cleared.
    ///
    /// Non-finite coordinates (a dropped drag sample) are ignored.
    pub fn resize(&mut self, edge: Edge, value: f64) {
        if !value.is_finite() {
            return;
        }

        let mut rect = self.current.unwrap_or(FULL_BOUNDS);
        match edge {
            Edge::Left => rect.left = value.clamp(0.0, rect.right - MIN_GAP),
            Edge::Right => rect.right = value.clamp(rect.left + MIN_GAP, 1.0),
            Edge::Top => rect.top = value.clamp(0.0, rect.bottom - MIN_GAP),
            Edge::Bottom => rect.bottom = value.clamp(rect.top + MIN_GAP, 1.0),
        }

        self.current = if rect.is_full_bounds() { None } else { Some(rect) };
    }

    /// Drag the rectangle's center to a proposed absolute coordinate along
    /// one axis.
    ///
    /// Both edges move together; when the span would leave `[0,1]`, the whole
    /// span is translated back in-bounds rather than clamping each edge on
    /// its own. The span width therefore never changes — that is what
    /// distinguishes a move from a resize.
    ///
    /// A no-op when no crop exists: there is nothing to move.
    pub fn translate(&mut self, axis: Axis, value: f64) {
        if !value.is_finite() {
            return;
        }
        let Some(mut rect) = self.current else {
            return;
        };

        match axis {
            Axis::Horizontal => {
                let movement = value - (rect.left + rect.right) / 2.0;
                (rect.left, rect.right) = shift_span(rect.left, rect.right, movement);
            }
            Axis::Vertical => {
                let movement = value - (rect.top + rect.bottom) / 2.0;
                (rect.top, rect.bottom) = shift_span(rect.top, rect.bottom, movement);
            }
        }

        self.current = Some(rect);
    }

    /// Clear the crop. Also the right call whenever the source image changes.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// The rectangle to render: the current crop, or full bounds when unset.
    ///
    /// Rendering always needs *some* rectangle; persistence does not. Use
    /// [`stored`](Self::stored) for "what counts as a committed crop".
    pub fn effective(&self) -> CropRect {
        self.current.unwrap_or(FULL_BOUNDS)
    }

    /// The committed crop, if any.
    pub fn stored(&self) -> Option<CropRect> {
        self.current
    }

    /// Resynchronize with an externally-held committed crop (e.g. the user
    /// cancelled an edit session).
    ///
    /// Resets, then re-applies the rectangle through the four resize clamps
    /// in left, right, top, bottom order. For any rectangle satisfying the
    /// class invariant this reproduces it exactly; anything else is clamped
    /// into validity, and full bounds normalizes to `None`.
    pub fn set_committed(&mut self, rect: Option<CropRect>) {
        self.reset();
        if let Some(rect) = rect {
            self.resize(Edge::Left, rect.left);
            self.resize(Edge::Right, rect.right);
            self.resize(Edge::Top, rect.top);
            self.resize(Edge::Bottom, rect.bottom);
        }
    }
}

/// Translate a span by `movement`, pushing it back in-bounds as a pair.
fn shift_span(lo: f64, hi: f64, movement: f64) -> (f64, f64) {
    let (lo, hi) = (lo + movement, hi + movement);
    let correction = if lo < 0.0 {
        -lo
    } else if hi > 1.0 {
        1.0 - hi
    } else {
        0.0
    };
    (lo + correction, hi + correction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, right: f64, bottom: f64) -> CropRect {
        CropRect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Assert the class invariant from the module docs. The gap check gets a
    /// small epsilon: clamp bounds are computed in floating point, so e.g.
    /// `1.0 - (1.0 - MIN_GAP)` lands one ulp short of `MIN_GAP`.
    fn assert_valid(r: &CropRect) {
        assert!(r.left >= 0.0 && r.right <= 1.0, "x out of range: {r:?}");
        assert!(r.top >= 0.0 && r.bottom <= 1.0, "y out of range: {r:?}");
        assert!(r.right - r.left >= MIN_GAP - 1e-12, "x gap violated: {r:?}");
        assert!(r.bottom - r.top >= MIN_GAP - 1e-12, "y gap violated: {r:?}");
    }

    // =========================================================================
    // resize
    // =========================================================================

    #[test]
    fn first_resize_creates_crop_from_full_bounds() {
        let mut engine = CropEngine::new();
        engine.resize(Edge::Left, 0.3);
        assert_eq!(engine.stored(), Some(rect(0.3, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn resize_clamps_out_of_range_values() {
        let mut engine = CropEngine::new();
        engine.resize(Edge::Left, -5.0);
        engine.resize(Edge::Bottom, 0.5);
        engine.resize(Edge::Right, 7.0);
        // left clamped to 0, right to 1 → x axis back at full bounds, but the
        // bottom edge keeps the rect alive
        assert_eq!(engine.stored(), Some(rect(0.0, 0.0, 1.0, 0.5)));
    }

    #[test]
    fn resize_enforces_min_gap() {
        let mut engine = CropEngine::new();
        engine.resize(Edge::Right, 0.8);
        engine.resize(Edge::Left, 0.75); // within MIN_GAP of right
        assert!((engine.stored().unwrap().left - 0.7).abs() < 1e-12);

        engine.resize(Edge::Bottom, 0.4);
        engine.resize(Edge::Top, 0.39);
        let r = engine.stored().unwrap();
        assert!((r.top - 0.3).abs() < 1e-12);
    }

    #[test]
    fn resize_ignores_non_finite_values() {
        let mut engine = CropEngine::new();
        engine.resize(Edge::Left, 0.2);
        engine.resize(Edge::Left, f64::NAN);
        engine.resize(Edge::Right, f64::INFINITY);
        engine.resize(Edge::Top, f64::NEG_INFINITY);
        assert_eq!(engine.stored(), Some(rect(0.2, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn invariant_holds_under_arbitrary_resize_sequences() {
        let noisy = [
            (Edge::Left, 0.97),
            (Edge::Right, -3.0),
            (Edge::Top, f64::NAN),
            (Edge::Bottom, 0.01),
            (Edge::Left, 1e9),
            (Edge::Top, 0.5),
            (Edge::Right, 0.500001),
            (Edge::Bottom, f64::INFINITY),
            (Edge::Left, -0.0),
        ];

        let mut engine = CropEngine::new();
        for (edge, value) in noisy {
            engine.resize(edge, value);
            assert_valid(&engine.effective());
        }
    }

    #[test]
    fn resizing_back_to_full_bounds_clears_the_crop() {
        let mut engine = CropEngine::new();
        engine.resize(Edge::Left, 0.2);
        engine.resize(Edge::Top, 0.2);
        engine.resize(Edge::Right, 0.8);
        engine.resize(Edge::Bottom, 0.8);
        assert!(engine.stored().is_some());

        engine.resize(Edge::Left, 0.0);
        engine.resize(Edge::Top, -0.1);
        engine.resize(Edge::Right, 1.0);
        assert!(engine.stored().is_some()); // bottom still at 0.8
        engine.resize(Edge::Bottom, 1.2);
        assert_eq!(engine.stored(), None);
    }

    // =========================================================================
    // translate
    // =========================================================================

    #[test]
    fn translate_moves_center_and_preserves_span() {
        let mut engine = CropEngine::new();
        engine.set_committed(Some(rect(0.2, 0.2, 0.5, 0.5)));

        engine.translate(Axis::Horizontal, 0.5);
        let r = engine.stored().unwrap();
        assert!((r.left - 0.35).abs() < 1e-12);
        assert!((r.right - 0.65).abs() < 1e-12);
        assert!((r.right - r.left - 0.3).abs() < 1e-12);
    }

    #[test]
    fn translate_clamps_the_pair_at_boundaries() {
        let mut engine = CropEngine::new();
        engine.set_committed(Some(rect(0.2, 0.2, 0.5, 0.5)));

        // Center dragged far right: span slides to the edge, width unchanged
        engine.translate(Axis::Horizontal, 0.9);
        let r = engine.stored().unwrap();
        assert!((r.left - 0.7).abs() < 1e-12);
        assert!((r.right - 1.0).abs() < 1e-12);

        engine.translate(Axis::Vertical, -2.0);
        let r = engine.stored().unwrap();
        assert!((r.top - 0.0).abs() < 1e-12);
        assert!((r.bottom - 0.3).abs() < 1e-12);
    }

    #[test]
    fn translate_without_a_crop_is_a_no_op() {
        let mut engine = CropEngine::new();
        engine.translate(Axis::Horizontal, 0.9);
        engine.translate(Axis::Vertical, 0.1);
        assert_eq!(engine.stored(), None);
    }

    #[test]
    fn translate_ignores_non_finite_values() {
        let mut engine = CropEngine::new();
        engine.set_committed(Some(rect(0.2, 0.2, 0.5, 0.5)));
        engine.translate(Axis::Horizontal, f64::NAN);
        assert_eq!(engine.stored(), Some(rect(0.2, 0.2, 0.5, 0.5)));
    }

    // =========================================================================
    // reset / accessors
    // =========================================================================

    #[test]
    fn reset_clears_unconditionally() {
        let mut engine = CropEngine::new();
        engine.resize(Edge::Left, 0.4);
        engine.reset();
        assert_eq!(engine.stored(), None);
    }

    #[test]
    fn effective_falls_back_to_full_bounds() {
        let engine = CropEngine::new();
        assert_eq!(engine.stored(), None);
        assert_eq!(engine.effective(), rect(0.0, 0.0, 1.0, 1.0));
    }

    // =========================================================================
    // set_committed
    // =========================================================================

    #[test]
    fn set_committed_round_trips_valid_rects() {
        let cases = [
            rect(0.25, 0.25, 0.75, 0.75),
            rect(0.0, 0.0, 0.5, 1.0),   // two edges at their extremes
            rect(0.0, 0.0, 1.0, 0.5),   // collapses mid-sequence, recovers
            rect(0.5, 0.125, 1.0, 1.0), // trailing edges at their extremes
            rect(0.9, 0.0, 1.0, 0.1),   // minimum-size corner rect
        ];

        for r in cases {
            let mut engine = CropEngine::new();
            // Prior session state must not leak into the committed value
            engine.resize(Edge::Right, 0.2);
            engine.set_committed(Some(r));
            assert_eq!(engine.stored(), Some(r), "round trip failed for {r:?}");
        }
    }

    #[test]
    fn set_committed_none_resets() {
        let mut engine = CropEngine::new();
        engine.resize(Edge::Left, 0.4);
        engine.set_committed(None);
        assert_eq!(engine.stored(), None);
    }

    #[test]
    fn set_committed_full_bounds_normalizes_to_none() {
        let mut engine = CropEngine::new();
        engine.set_committed(Some(rect(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(engine.stored(), None);
    }

    #[test]
    fn set_committed_clamps_invalid_rects_into_validity() {
        let mut engine = CropEngine::new();
        engine.set_committed(Some(rect(0.5, -1.0, 0.55, 2.0)));
        let r = engine.stored().unwrap();
        assert_valid(&r);
        assert_eq!(r.left, 0.5);
        assert_eq!(r.right, 0.6); // pushed out to MIN_GAP
    }

    // =========================================================================
    // pixel_bounds
    // =========================================================================

    #[test]
    fn pixel_bounds_maps_to_image_pixels() {
        let r = rect(0.25, 0.25, 0.75, 0.75);
        assert_eq!(r.pixel_bounds(640, 480), (160, 120, 320, 240));
    }

    #[test]
    fn pixel_bounds_full_rect_covers_image() {
        let r = rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(r.pixel_bounds(640, 480), (0, 0, 640, 480));
    }

    #[test]
    fn pixel_bounds_never_degenerates_to_zero() {
        // On a 1x1 image every rect resolves to the single pixel
        let r = rect(0.3, 0.3, 0.5, 0.5);
        assert_eq!(r.pixel_bounds(1, 1), (0, 0, 1, 1));
    }
}
