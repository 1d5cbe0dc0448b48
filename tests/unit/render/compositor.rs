use super::*;
use crate::foundation::color::{Rgb8, Tint};
use crate::render::composite::blend_channel;

fn size(w: u32, h: u32) -> CanvasSize {
    CanvasSize::new(w, h).unwrap()
}

fn assert_px_close(actual: [u8; 4], expected: [u8; 4], tol: u8) {
    for i in 0..4 {
        assert!(
            actual[i].abs_diff(expected[i]) <= tol,
            "pixel {actual:?} differs from {expected:?} by more than {tol}"
        );
    }
}

fn two_band_bitmap(w: u32, h: u32, top: [u8; 4], bottom: [u8; 4]) -> Bitmap {
    let img = image::RgbaImage::from_fn(w, h, |_, y| {
        image::Rgba(if y < h / 2 { top } else { bottom })
    });
    Bitmap::from_rgba_image(img)
}

#[test]
fn empty_request_is_solid_black() {
    let canvas = render(&RenderRequest::new(size(64, 36)));
    assert_eq!((canvas.width(), canvas.height()), (64, 36));
    assert!(canvas.data().chunks_exact(4).all(|px| px == BASE_FILL));
}

#[test]
fn sixteen_by_nine_background_fills_canvas() {
    let bg = Bitmap::solid(16, 9, [30, 60, 90, 255]);
    let canvas = render(&RenderRequest::new(size(128, 72)).with_background(bg));
    for px in canvas.data().chunks_exact(4) {
        assert_px_close([px[0], px[1], px[2], px[3]], [30, 60, 90, 255], 1);
    }
}

#[test]
fn wide_background_leaves_black_bands() {
    // 4:1 on 128x72 places a 32px tall strip at y = 20.
    let bg = Bitmap::solid(40, 10, [200, 10, 10, 255]);
    let canvas = render(&RenderRequest::new(size(128, 72)).with_background(bg));

    assert_eq!(canvas.pixel(64, 5), Some(BASE_FILL));
    assert_eq!(canvas.pixel(64, 66), Some(BASE_FILL));
    assert_px_close(canvas.pixel(64, 36).unwrap(), [200, 10, 10, 255], 1);
}

#[test]
fn tall_background_is_cropped_around_center() {
    // 100x200 on 100x100: source rows 50..150 are visible.
    let bg = two_band_bitmap(100, 200, [255, 0, 0, 255], [0, 0, 255, 255]);
    let canvas = render(&RenderRequest::new(size(100, 100)).with_background(bg));

    assert_px_close(canvas.pixel(50, 10).unwrap(), [255, 0, 0, 255], 1);
    assert_px_close(canvas.pixel(50, 90).unwrap(), [0, 0, 255, 255], 1);
}

#[test]
fn transparent_background_shows_base_fill() {
    let bg = Bitmap::solid(16, 9, [255, 255, 255, 0]);
    let canvas = render(&RenderRequest::new(size(32, 18)).with_background(bg));
    assert!(canvas.data().chunks_exact(4).all(|px| px == BASE_FILL));
}

#[test]
fn degenerate_background_is_skipped() {
    let bg = Bitmap::from_premul_rgba8(0, 10, Vec::new()).unwrap();
    let canvas = render(&RenderRequest::new(size(16, 9)).with_background(bg));
    assert_eq!(canvas, render(&RenderRequest::new(size(16, 9))));
}

#[test]
fn zero_alpha_overlay_matches_no_overlay() {
    let bg = two_band_bitmap(16, 9, [10, 200, 40, 255], [90, 90, 90, 255]);
    let base = RenderRequest::new(size(64, 36)).with_background(bg);

    let without = render(&base);
    let with_zero = render(&base.clone().with_overlay(Tint::new(Rgb8::new(142, 0, 82), 0.0)));
    assert_eq!(with_zero, without);
}

#[test]
fn full_alpha_overlay_replaces_everything() {
    let bg = two_band_bitmap(16, 9, [10, 200, 40, 255], [90, 90, 90, 255]);
    let canvas = render(
        &RenderRequest::new(size(64, 36))
            .with_background(bg)
            .with_overlay(Tint::from_hex("#8e0052", 1.0)),
    );
    assert!(
        canvas
            .data()
            .chunks_exact(4)
            .all(|px| px == [142, 0, 82, 255])
    );
}

#[test]
fn overlay_shifts_each_channel_by_alpha() {
    let bg = two_band_bitmap(16, 9, [10, 200, 40, 255], [250, 250, 250, 255]);
    let base = RenderRequest::new(size(64, 36)).with_background(bg);
    let tint = Tint::from_hex("#8e0052", 0.15);

    let plain = render(&base);
    let tinted = render(&base.clone().with_overlay(tint));

    for (p, t) in plain.data().chunks_exact(4).zip(tinted.data().chunks_exact(4)) {
        assert_eq!(t[0], blend_channel(142, p[0], 0.15));
        assert_eq!(t[1], blend_channel(0, p[1], 0.15));
        assert_eq!(t[2], blend_channel(82, p[2], 0.15));
        assert_eq!(t[3], 255);
    }
}

#[test]
fn border_tint_is_not_painted() {
    let req = RenderRequest::new(size(16, 9));
    let with_border = req.clone().with_border(Tint::from_hex("#ffffff", 1.0));
    assert_eq!(render(&with_border), render(&req));
}

#[test]
fn title_without_font_is_skipped() {
    let req = RenderRequest::new(size(64, 36));
    let titled = req.clone().with_title("Hello world");
    assert_eq!(render(&titled), render(&req));
}

#[test]
fn blank_title_is_skipped_even_with_font() {
    let Ok(font) = TitleFont::resolve_system(&[]) else {
        return;
    };
    let req = RenderRequest::new(size(64, 36));
    let titled = req.clone().with_title("   ").with_title_font(font);
    assert_eq!(render(&titled), render(&req));
}

#[test]
fn title_paints_white_pixels_near_the_anchor() {
    // Needs an installed font; hosts without one have nothing to draw with.
    let Ok(font) = TitleFont::resolve_system(&[]) else {
        return;
    };
    let canvas = render(
        &RenderRequest::new(size(640, 360))
            .with_title("HELLO")
            .with_title_font(font),
    );
    let metrics = TitleMetrics::for_canvas(size(640, 360));

    // Glyphs sit above the first baseline, starting at the left padding.
    let top = (metrics.anchor_y - metrics.font_size) as u32;
    let bottom = metrics.anchor_y as u32;
    let mut bright = 0usize;
    for y in top..bottom {
        for x in metrics.anchor_x as u32..640 {
            if canvas.pixel(x, y).unwrap()[0] > 200 {
                bright += 1;
            }
        }
    }
    assert!(bright > 0, "expected title glyph coverage");

    // Nothing is drawn left of the padding.
    for y in 0..360 {
        for x in 0..(metrics.anchor_x as u32).saturating_sub(2) {
            assert_eq!(canvas.pixel(x, y), Some(BASE_FILL));
        }
    }
}

#[test]
fn render_is_deterministic() {
    let bg = two_band_bitmap(37, 23, [12, 34, 56, 255], [200, 100, 50, 128]);
    let mut req = RenderRequest::new(size(97, 61))
        .with_background(bg)
        .with_overlay(Tint::from_hex("#8e0052", 0.33))
        .with_title("Deterministic output please");
    if let Ok(font) = TitleFont::resolve_system(&[]) {
        req = req.with_title_font(font);
    }

    let a = render(&req);
    let b = render(&req);
    assert_eq!(a, b);
}

#[test]
fn oversized_bitmap_background_is_painted() {
    // Taller than a raster surface side; the bitmap is fitted at construction.
    let bg = Bitmap::solid(2, 70_000, [200, 10, 10, 255]);
    let canvas = render(&RenderRequest::new(size(1400, 720)).with_background(bg));
    assert_px_close(canvas.pixel(700, 360).unwrap(), [200, 10, 10, 255], 1);
}
