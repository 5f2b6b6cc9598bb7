//! Parameter types for the compression pipeline.
//!
//! These structs describe *what* to aim for, not *how* to get there. They are
//! the interface between callers (CLI, upload flow) and the scale search in
//! [`compress`](super::compress).

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Byte budget for one compression call.
///
/// Supplied fresh per call, never mutated. `max_resolution` caps the longer
/// edge *before* the scale search starts, so huge sources don't burn search
/// trials just getting down to a sensible size. A zero `target_bytes` is a
/// caller contract violation: the search will run all its trials and report
/// that nothing fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionTarget {
    /// Upper bound, in bytes, for the encoded output.
    pub target_bytes: usize,
    /// Optional cap on the longer edge, in pixels.
    pub max_resolution: Option<u32>,
}

impl CompressionTarget {
    pub fn new(target_bytes: usize) -> Self {
        Self {
            target_bytes,
            max_resolution: None,
        }
    }

    pub fn with_max_resolution(mut self, max_resolution: u32) -> Self {
        self.max_resolution = Some(max_resolution);
        self
    }
}
