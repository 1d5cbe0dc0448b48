use crate::assets::decode::Bitmap;
use crate::foundation::color::Tint;
use crate::foundation::core::CanvasSize;
use crate::text::font::TitleFont;

/// Everything one call to [`crate::render()`] needs.
///
/// Built once per preview/export with the `with_*` methods and then only read. All inputs are
/// already validated: the size by [`CanvasSize::new`], colors by [`Tint`].
#[derive(Clone, Debug, Default)]
pub struct RenderRequest {
    size: CanvasSize,
    background: Option<Bitmap>,
    title: Option<String>,
    title_font: Option<TitleFont>,
    overlay: Option<Tint>,
    border: Option<Tint>,
}

impl RenderRequest {
    /// A request with nothing but a canvas size.
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Set the background bitmap.
    pub fn with_background(mut self, background: Bitmap) -> Self {
        self.background = Some(background);
        self
    }

    /// Set the title text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the face used to shape and draw the title.
    pub fn with_title_font(mut self, font: TitleFont) -> Self {
        self.title_font = Some(font);
        self
    }

    /// Set the full-canvas overlay tint.
    pub fn with_overlay(mut self, overlay: Tint) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Set the border/edge tint. Carried for the remote generator; the preview does not paint it.
    pub fn with_border(mut self, border: Tint) -> Self {
        self.border = Some(border);
        self
    }

    /// Canvas size.
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Background bitmap, if any.
    pub fn background(&self) -> Option<&Bitmap> {
        self.background.as_ref()
    }

    /// Title text, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Title face, if any.
    pub fn title_font(&self) -> Option<&TitleFont> {
        self.title_font.as_ref()
    }

    /// Overlay tint, if any.
    pub fn overlay(&self) -> Option<Tint> {
        self.overlay
    }

    /// Border tint, if any.
    pub fn border(&self) -> Option<Tint> {
        self.border
    }
}
