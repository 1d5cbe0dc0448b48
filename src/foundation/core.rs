use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Largest accepted canvas width in pixels.
pub const MAX_CANVAS_WIDTH: u32 = 3840;
/// Largest accepted canvas height in pixels.
pub const MAX_CANVAS_HEIGHT: u32 = 2160;

/// Validated output canvas dimensions in pixels.
///
/// Both sides are at least 1; width is at most [`MAX_CANVAS_WIDTH`] and height at most
/// [`MAX_CANVAS_HEIGHT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl CanvasSize {
    /// Create a validated size.
    pub fn new(width: u32, height: u32) -> ThumbResult<Self> {
        if !(1..=MAX_CANVAS_WIDTH).contains(&width) {
            return Err(ThumbError::validation(format!(
                "width must be in 1..={MAX_CANVAS_WIDTH}, got {width}"
            )));
        }
        if !(1..=MAX_CANVAS_HEIGHT).contains(&height) {
            return Err(ThumbError::validation(format!(
                "height must be in 1..={MAX_CANVAS_HEIGHT}, got {height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.height
    }

    pub(crate) fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// A painted raster: tightly packed, row-major, premultiplied RGBA8.
///
/// Canvases produced by [`crate::render()`] are fully opaque, so premultiplied and straight alpha
/// coincide for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub(crate) fn filled(size: CanvasSize, rgba8_premul: [u8; 4]) -> Self {
        Self {
            width: size.width(),
            height: size.height(),
            data: rgba8_premul.repeat(size.pixel_count()),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the canvas and return its raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Premultiplied RGBA8 value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert into a straight-alpha [`image::RgbaImage`] for encoding.
    pub fn to_rgba_image(&self) -> ThumbResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| ThumbError::render("canvas buffer does not match its dimensions"))
    }

    /// Encode the canvas as PNG at `path`, creating parent directories as needed.
    pub fn write_png(&self, path: impl AsRef<Path>) -> ThumbResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
