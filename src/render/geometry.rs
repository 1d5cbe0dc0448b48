use crate::foundation::core::CanvasSize;

/// Title font size relative to canvas height.
pub const TITLE_FONT_SCALE: f64 = 0.12;
/// Title line height relative to canvas height.
pub const TITLE_LINE_HEIGHT_SCALE: f64 = 0.13;
/// Horizontal title padding relative to canvas width.
pub const TITLE_PADDING_SCALE: f64 = 0.05;

/// Destination rectangle of the background image, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Left edge (always 0 under width-fit scaling).
    pub x: f64,
    /// Top edge; negative when the image is cropped vertically.
    pub y: f64,
    /// Placed width (always the canvas width).
    pub width: f64,
    /// Placed height, preserving the source aspect ratio.
    pub height: f64,
}

impl Placement {
    /// Horizontal scale from source pixels to canvas pixels.
    pub fn scale_x(&self, src_width: u32) -> f64 {
        self.width / f64::from(src_width)
    }

    /// Vertical scale from source pixels to canvas pixels.
    pub fn scale_y(&self, src_height: u32) -> f64 {
        self.height / f64::from(src_height)
    }

    /// Map source pixel space onto the placed rectangle.
    pub fn transform(&self, src_width: u32, src_height: u32) -> kurbo::Affine {
        kurbo::Affine::translate((self.x, self.y))
            * kurbo::Affine::scale_non_uniform(self.scale_x(src_width), self.scale_y(src_height))
    }
}

/// Fit a `src_width`×`src_height` image to the canvas width and center it vertically.
///
/// Returns `None` for a degenerate source (zero width or height) instead of producing
/// non-finite geometry.
pub fn place_background(canvas: CanvasSize, src_width: u32, src_height: u32) -> Option<Placement> {
    if src_width == 0 || src_height == 0 {
        return None;
    }

    let canvas_w = f64::from(canvas.width());
    let canvas_h = f64::from(canvas.height());
    let width = canvas_w;
    let height = width * (f64::from(src_height) / f64::from(src_width));

    Some(Placement {
        x: (canvas_w - width) / 2.0,
        y: (canvas_h - height) / 2.0,
        width,
        height,
    })
}

/// Pixel metrics of the title text block for a canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleMetrics {
    /// Bold font size in pixels.
    pub font_size: f32,
    /// Horizontal padding applied on both sides.
    pub padding: f32,
    /// Widest a line may measure before it wraps.
    pub max_width: f32,
    /// Left edge of every line.
    pub anchor_x: f32,
    /// Baseline of the first line.
    pub anchor_y: f32,
    /// Baseline-to-baseline distance.
    pub line_height: f32,
}

impl TitleMetrics {
    /// Metrics for `canvas`.
    ///
    /// The first baseline sits at `height - 2 * padding` where padding derives from the width;
    /// further lines go below it.
    pub fn for_canvas(canvas: CanvasSize) -> Self {
        let w = f64::from(canvas.width());
        let h = f64::from(canvas.height());
        let padding = (w * TITLE_PADDING_SCALE).round();

        Self {
            font_size: (h * TITLE_FONT_SCALE).round() as f32,
            padding: padding as f32,
            max_width: (w - 2.0 * padding) as f32,
            anchor_x: padding as f32,
            anchor_y: (h - 2.0 * padding) as f32,
            line_height: (h * TITLE_LINE_HEIGHT_SCALE).round() as f32,
        }
    }

    /// Baseline of line `index` (0-based).
    pub fn baseline(&self, index: usize) -> f32 {
        self.anchor_y + self.line_height * index as f32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
