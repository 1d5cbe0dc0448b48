use crate::foundation::color::Tint;
use crate::foundation::error::{ThumbError, ThumbResult};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of premultiplied `src` onto `dst`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite an equally sized premultiplied layer over `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> ThumbResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ThumbError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Blend one channel: `src * alpha + dst * (1 - alpha)`, rounded to nearest.
pub fn blend_channel(src: u8, dst: u8, alpha: f32) -> u8 {
    let v = f32::from(src) * alpha + f32::from(dst) * (1.0 - alpha);
    v.round().clamp(0.0, 255.0) as u8
}

/// Blend a flat tint over every pixel of a premultiplied RGBA8 buffer.
///
/// With `alpha == 0` this is an identity; with `alpha == 1` every pixel becomes the opaque tint
/// color.
pub fn tint_in_place(dst: &mut [u8], tint: Tint) {
    let alpha = tint.alpha();
    let [r, g, b, a] = tint.color().to_rgba8();
    for px in dst.chunks_exact_mut(4) {
        px[0] = blend_channel(r, px[0], alpha);
        px[1] = blend_channel(g, px[1], alpha);
        px[2] = blend_channel(b, px[2], alpha);
        px[3] = blend_channel(a, px[3], alpha);
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
