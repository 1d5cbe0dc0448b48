//! Source image decoding.

/// Image decoding into premultiplied bitmaps.
pub mod decode;
