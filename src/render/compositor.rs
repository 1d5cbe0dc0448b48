use std::sync::Arc;

use crate::assets::decode::Bitmap;
use crate::foundation::core::{Canvas, CanvasSize};
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::render::composite::{over_in_place, tint_in_place};
use crate::render::geometry::{TitleMetrics, place_background};
use crate::request::RenderRequest;
use crate::text::font::TitleFont;
use crate::text::layout::TextLayoutEngine;
use crate::text::title::layout_title;

/// Color every render starts from.
pub const BASE_FILL: [u8; 4] = [0, 0, 0, 255];

/// Paint `request` onto a fresh canvas.
///
/// Layers are painted in a fixed order: opaque black base, background image, overlay tint,
/// title. The function is pure: the same request always yields the same bytes.
///
/// Nothing here fails for a validated request. A layer that cannot be painted (for example a
/// title without a font) is skipped and reported through `tracing`.
#[tracing::instrument(
    skip(request),
    fields(width = request.size().width(), height = request.size().height())
)]
pub fn render(request: &RenderRequest) -> Canvas {
    let size = request.size();
    let mut canvas = Canvas::filled(size, BASE_FILL);

    if let Some(background) = request.background()
        && let Err(e) = paint_background(&mut canvas, size, background)
    {
        tracing::warn!(error = %e, "background layer skipped");
    }

    if let Some(overlay) = request.overlay() {
        if overlay.is_invisible() {
            tracing::debug!("overlay alpha is 0; layer skipped");
        } else {
            tracing::debug!(color = %overlay.color().to_hex(), alpha = overlay.alpha(), "overlay");
            tint_in_place(canvas.data_mut(), overlay);
        }
    }

    if let Some(title) = request.title().filter(|t| !t.trim().is_empty()) {
        match request.title_font() {
            Some(font) => {
                if let Err(e) = paint_title(&mut canvas, size, title, font) {
                    tracing::warn!(error = %e, "title layer skipped");
                }
            }
            None => tracing::warn!("title set without a title font; layer skipped"),
        }
    }

    canvas
}

fn paint_background(canvas: &mut Canvas, size: CanvasSize, bg: &Bitmap) -> ThumbResult<()> {
    let Some(placement) = place_background(size, bg.width(), bg.height()) else {
        tracing::debug!(
            src_width = bg.width(),
            src_height = bg.height(),
            "degenerate background; placement skipped"
        );
        return Ok(());
    };
    tracing::debug!(
        y = placement.y,
        height = placement.height,
        "background placement"
    );

    let pixmap = pixmap_from_premul_bytes(bg.rgba8_premul(), bg.width(), bg.height())?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    let transform = placement.transform(bg.width(), bg.height());
    let layer = rasterize_layer(size, |ctx| {
        ctx.set_transform(transform);
        ctx.set_paint(paint);
        ctx.fill_rect(&kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(bg.width()),
            f64::from(bg.height()),
        ));
    })?;

    over_in_place(canvas.data_mut(), layer.data_as_u8_slice())
}

fn paint_title(
    canvas: &mut Canvas,
    size: CanvasSize,
    title: &str,
    font: &TitleFont,
) -> ThumbResult<()> {
    let metrics = TitleMetrics::for_canvas(size);
    let mut engine = TextLayoutEngine::new(font, metrics.font_size)?;
    let layout = layout_title(size, title, &mut engine);
    tracing::debug!(
        lines = layout.lines.len(),
        font_size = metrics.font_size,
        family = engine.family(),
        "title layout"
    );

    let font_data = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::new(font.shared_bytes()),
        font.index(),
    );

    let layer = rasterize_layer(size, |ctx| {
        ctx.set_transform(kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));

        for line in &layout.lines {
            let shaped = engine.layout_line(&line.text);
            for shaped_line in shaped.lines() {
                let line_baseline = shaped_line.metrics().baseline;
                for item in shaped_line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: line.x + g.x,
                        y: line.baseline_y + (g.y - line_baseline),
                    });
                    ctx.glyph_run(&font_data)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
    })?;

    over_in_place(canvas.data_mut(), layer.data_as_u8_slice())
}

/// Draw into a transparent canvas-sized pixmap.
fn rasterize_layer(
    size: CanvasSize,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) -> ThumbResult<vello_cpu::Pixmap> {
    let width: u16 = size
        .width()
        .try_into()
        .map_err(|_| ThumbError::render("surface width exceeds u16"))?;
    let height: u16 = size
        .height()
        .try_into()
        .map_err(|_| ThumbError::render("surface height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    draw(&mut ctx);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ThumbResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ThumbError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ThumbError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ThumbError::render("bitmap byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
