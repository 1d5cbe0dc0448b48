use crate::foundation::error::{ThumbError, ThumbResult};
use crate::text::font::TitleFont;
use crate::text::wrap::TextMeasure;

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextBrushRgba8 {
    /// Opaque white, the title color.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Shapes single lines of bold text in one font at one size.
///
/// The engine owns its Parley contexts; each render builds its own engine so no state is shared
/// between renders.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    size_px: f32,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("family", &self.family)
            .field("size_px", &self.size_px)
            .finish()
    }
}

impl TextLayoutEngine {
    /// Register `font` with a fresh Parley context and shape at `size_px`.
    pub fn new(font: &TitleFont, size_px: f32) -> ThumbResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThumbError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::new(font.shared_bytes()), None);
        let family_id = families
            .iter()
            .find(|(_, faces)| faces.iter().any(|f| f.index() == font.index()))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| ThumbError::font("no font families registered from font bytes"))?;

        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThumbError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            size_px,
        })
    }

    /// Family name Parley resolved for the registered face.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Lay out `text` as one unwrapped line.
    pub fn layout_line(&mut self, text: &str) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::WHITE));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, text: &str) -> f32 {
        self.layout_line(text).width()
    }
}
