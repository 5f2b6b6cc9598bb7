//! Byte-budget image compression — pure Rust, zero external dependencies.
//!
//! | Concern | Module |
//! |---|---|
//! | **Backend seam** | [`backend`] — [`RasterBackend`] trait + shared types |
//! | **Parameters** | `params` — [`Quality`], [`CompressionTarget`] |
//! | **Scale search** | [`compress`] — bounded best-fit search |
//! | **Production backend** | [`rust_backend`] — `image` crate decode/crop/encode |
//! | **Composition** | [`operations`] — crop + compress + fallback contract |

pub mod backend;
pub mod compress;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, Encoded, PixelRegion, RasterBackend};
pub use compress::{CompressedFile, compress_image};
pub use operations::{PrepareResult, prepare_photo};
pub use params::{CompressionTarget, Quality};
pub use rust_backend::RustBackend;
