use crate::foundation::core::CanvasSize;
use crate::render::geometry::TitleMetrics;
use crate::text::wrap::{TextMeasure, wrap_words};

/// A wrapped title line positioned on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleLine {
    /// Line text.
    pub text: String,
    /// Left edge in canvas pixels.
    pub x: f32,
    /// Alphabetic baseline in canvas pixels.
    pub baseline_y: f32,
    /// Measured width in pixels.
    pub width: f32,
}

/// Positioned title lines plus the metrics they were computed with.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleLayout {
    /// Canvas-derived metrics.
    pub metrics: TitleMetrics,
    /// Lines in drawing order, top to bottom.
    pub lines: Vec<TitleLine>,
}

/// Wrap `title` to the canvas title width and assign baselines.
///
/// `measure` must measure at [`TitleMetrics::font_size`] for the canvas. Line `i` sits at
/// `anchor_y + i * line_height`; nothing is clipped, so long titles can run past the bottom edge.
pub fn layout_title<M: TextMeasure + ?Sized>(
    canvas: CanvasSize,
    title: &str,
    measure: &mut M,
) -> TitleLayout {
    let metrics = TitleMetrics::for_canvas(canvas);
    let lines = wrap_words(title, metrics.max_width, measure)
        .into_iter()
        .enumerate()
        .map(|(i, line)| TitleLine {
            text: line.text,
            x: metrics.anchor_x,
            baseline_y: metrics.baseline(i),
            width: line.width,
        })
        .collect();

    TitleLayout { metrics, lines }
}

#[cfg(test)]
#[path = "../../tests/unit/text/title.rs"]
mod tests;
