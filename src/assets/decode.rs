use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::core::premultiply_rgba8_in_place;
use crate::foundation::error::{ThumbError, ThumbResult};

/// Largest source side the raster backend can sample from.
pub const MAX_SOURCE_DIM: u32 = u16::MAX as u32;

/// Decoded raster source in premultiplied RGBA8 form.
///
/// Every decode origin (PNG, JPEG, WebP, in-memory buffers) ends up as this one type. Cloning is
/// cheap: pixels live behind an [`Arc`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap premultiplied RGBA8 bytes; the length must be `width * height * 4`.
    ///
    /// Sources larger than [`MAX_SOURCE_DIM`] on either side are downscaled.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ThumbResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ThumbError::decode("bitmap size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(ThumbError::decode(format!(
                "bitmap byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        if fitted_dims(width, height).is_some() {
            // Premultiplied samples resample correctly with a linear filter.
            let img = image::RgbaImage::from_raw(width, height, rgba8_premul)
                .ok_or_else(|| ThumbError::decode("bitmap buffer does not match its dimensions"))?;
            return Ok(Self::from_image_premul(fit_to_max_source(img)));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Take ownership of a straight-alpha image and premultiply it.
    ///
    /// Images larger than [`MAX_SOURCE_DIM`] on either side are downscaled first.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let mut img = fit_to_max_source(img);
        premultiply_rgba8_in_place(&mut img);
        Self::from_image_premul(img)
    }

    fn from_image_premul(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba8_premul: Arc::new(img.into_raw()),
        }
    }

    /// A bitmap filled with one straight-alpha RGBA8 color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_rgba_image(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba(rgba),
        ))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied RGBA8 sample at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decode encoded image bytes (any format enabled in `image`) into a [`Bitmap`].
///
/// Sources larger than [`MAX_SOURCE_DIM`] on either side are downscaled with their aspect ratio
/// preserved.
pub fn decode_image(bytes: &[u8]) -> ThumbResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ThumbError::decode(format!("decode image from memory: {e}")))?;
    Ok(Bitmap::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode an image file.
pub fn decode_image_file(path: impl AsRef<Path>) -> ThumbResult<Bitmap> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image bytes from '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Target size for a source exceeding [`MAX_SOURCE_DIM`], or `None` when it already fits.
fn fitted_dims(width: u32, height: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= MAX_SOURCE_DIM {
        return None;
    }
    let scale = f64::from(MAX_SOURCE_DIM) / f64::from(longest);
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, MAX_SOURCE_DIM);
    Some((fit(width), fit(height)))
}

fn fit_to_max_source(img: image::RgbaImage) -> image::RgbaImage {
    let (width, height) = img.dimensions();
    let Some((w, h)) = fitted_dims(width, height) else {
        return img;
    };
    tracing::debug!(width, height, to_width = w, to_height = h, "downscaling oversized source");
    image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
