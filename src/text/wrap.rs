/// Measures the rendered advance width of a single line of text, in pixels.
pub trait TextMeasure {
    /// Width of `text` laid out on one line with no wrapping.
    fn measure(&mut self, text: &str) -> f32;
}

/// Font-free width estimate: every character advances by `0.55 * font_size`.
///
/// Useful when no font is installed and for exercising line breaking without font files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimateMeasure {
    /// Font size in pixels.
    pub font_size: f32,
}

impl EstimateMeasure {
    /// Average advance relative to the font size.
    pub const ADVANCE_PER_EM: f32 = 0.55;

    /// Estimator for `font_size` pixels.
    pub fn new(font_size: f32) -> Self {
        Self { font_size }
    }
}

impl TextMeasure for EstimateMeasure {
    fn measure(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.font_size * Self::ADVANCE_PER_EM
    }
}

/// One line produced by [`wrap_words`] with the width it measured at.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedLine {
    /// Words joined by single spaces.
    pub text: String,
    /// Measured width in pixels.
    pub width: f32,
}

/// Greedy word wrap.
///
/// Words are appended to the current line while the candidate fits in `max_width`. A word that
/// overflows starts a new line unless the current line is still empty, so a single word wider
/// than `max_width` stays on a line of its own.
pub fn wrap_words<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    measure: &mut M,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0f32;

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_owned()
        } else {
            format!("{line} {word}")
        };
        let candidate_width = measure.measure(&candidate);

        if candidate_width > max_width && !line.is_empty() {
            lines.push(WrappedLine {
                text: std::mem::replace(&mut line, word.to_owned()),
                width: line_width,
            });
            line_width = measure.measure(&line);
        } else {
            line = candidate;
            line_width = candidate_width;
        }
    }

    if !line.is_empty() {
        lines.push(WrappedLine {
            text: line,
            width: line_width,
        });
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
