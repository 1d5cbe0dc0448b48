//! Thumbkit composes video thumbnails deterministically on the CPU.
//!
//! A thumbnail is a fixed stack of layers painted onto an opaque black canvas:
//!
//! - a background screenshot, scaled to the canvas width and centered vertically
//! - an optional translucent color overlay
//! - an optional bold white title, word-wrapped in the lower-left corner
//!
//! Build a [`RenderRequest`] (directly or from a [`ThumbnailForm`]) and call [`render`]. The
//! same request always produces the same pixels.
//!
//! The [`remote`] module shapes the multipart submission for the remote generator and
//! interprets its responses; it performs no I/O itself.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Source image decoding.
pub mod assets;
/// User-facing form settings and uploads.
pub mod form;
/// Remote generator request/response shaping.
pub mod remote;
/// Deterministic compositing.
pub mod render;
/// The compositor's input.
pub mod request;
/// Title text handling.
pub mod text;

pub use crate::foundation::color::{Rgb8, Tint};
pub use crate::foundation::core::{Canvas, CanvasSize, MAX_CANVAS_HEIGHT, MAX_CANVAS_WIDTH};
pub use crate::foundation::error::{ThumbError, ThumbResult};

pub use crate::assets::decode::{Bitmap, decode_image, decode_image_file};
pub use crate::form::{FormFiles, ThumbnailForm, Upload};
pub use crate::remote::{GenerateResponse, interpret_response, submission_fields};
pub use crate::render::compositor::render;
pub use crate::request::RenderRequest;
pub use crate::text::font::TitleFont;
