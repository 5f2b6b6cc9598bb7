//! Centralized output-file naming.
//!
//! The compressor re-encodes to whatever lossy format the backend speaks, so
//! the output name keeps the original stem but swaps the extension to match
//! the encoded MIME subtype. One module owns this so the CLI and the library
//! can't drift apart on naming.

/// Rename a file for its encoded MIME type.
///
/// The extension becomes the MIME subtype; a name without an extension gets
/// one appended:
/// - `"photo.png"` + `"image/webp"` → `"photo.webp"`
/// - `"photo"` + `"image/jpeg"` → `"photo.jpeg"`
pub fn file_name_for_mime(original: &str, mime_type: &str) -> String {
    let subtype = mime_type.rsplit_once('/').map_or(mime_type, |(_, s)| s);
    match original.rsplit_once('.') {
        // Empty stem means a dotfile-style name, not an extension
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.{subtype}"),
        _ => format!("{original}.{subtype}"),
    }
}
