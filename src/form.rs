use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assets::decode::Bitmap;
use crate::foundation::color::{Rgb8, Tint};
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::request::RenderRequest;
use crate::text::font::TitleFont;

/// Longest accepted title, in Unicode scalar values.
pub const MAX_TITLE_CHARS: usize = 120;
/// Accepted generation strength range.
pub const STRENGTH_RANGE: std::ops::RangeInclusive<u8> = 1..=3;
/// Default tint color for both the overlay and the border.
pub const DEFAULT_TINT_HEX: &str = "#8e0052";

/// User-facing thumbnail settings, as edited in a form or stored as JSON.
///
/// Every field has a default, so `{}` is a valid form. Keys are camelCase:
///
/// ```json
/// { "title": "Boss fight", "overlayHex": "#8e0052", "overlayAlpha": 0.15, "width": 1280 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ThumbnailForm {
    /// Generation style understood by the remote generator (for example `game`).
    pub style: String,
    /// Generation strength, 1 to 3.
    pub strength: u8,
    /// Border/edge tint color, `#RRGGBB`.
    pub border_hex: String,
    /// Border/edge tint alpha in `[0, 1]`.
    pub border_alpha: f64,
    /// Overlay tint color, `#RRGGBB`; `None` disables the overlay.
    pub overlay_hex: Option<String>,
    /// Overlay tint alpha in `[0, 1]`.
    pub overlay_alpha: f64,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Title text.
    pub title: Option<String>,
    /// Free-form season label.
    #[serde(deserialize_with = "string_or_number")]
    pub season: Option<String>,
    /// Free-form episode label.
    #[serde(deserialize_with = "string_or_number")]
    pub episode: Option<String>,
}

impl Default for ThumbnailForm {
    fn default() -> Self {
        Self {
            style: "game".to_string(),
            strength: 1,
            border_hex: DEFAULT_TINT_HEX.to_string(),
            border_alpha: 1.0,
            overlay_hex: Some(DEFAULT_TINT_HEX.to_string()),
            overlay_alpha: 0.15,
            width: 1280,
            height: 720,
            title: None,
            season: Some("1".to_string()),
            episode: Some("1".to_string()),
        }
    }
}

impl ThumbnailForm {
    /// Parse a form from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ThumbResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ThumbError::serde(format!("parse thumbnail form JSON: {e}")))
    }

    /// Parse a form from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open thumbnail form JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field against its accepted range or format.
    pub fn validate(&self) -> ThumbResult<()> {
        if self.style.trim().is_empty() {
            return Err(ThumbError::validation("style must be non-empty"));
        }
        if !STRENGTH_RANGE.contains(&self.strength) {
            return Err(ThumbError::validation(format!(
                "strength must be in {}..={}, got {}",
                STRENGTH_RANGE.start(),
                STRENGTH_RANGE.end(),
                self.strength
            )));
        }

        Rgb8::parse_hex(&self.border_hex)
            .map_err(|e| ThumbError::validation(format!("borderHex: {e}")))?;
        check_alpha("borderAlpha", self.border_alpha)?;
        if let Some(hex) = &self.overlay_hex {
            Rgb8::parse_hex(hex).map_err(|e| ThumbError::validation(format!("overlayHex: {e}")))?;
        }
        check_alpha("overlayAlpha", self.overlay_alpha)?;

        CanvasSize::new(self.width, self.height)?;

        if let Some(title) = &self.title {
            let n = title.chars().count();
            if n > MAX_TITLE_CHARS {
                return Err(ThumbError::validation(format!(
                    "title must be at most {MAX_TITLE_CHARS} characters, got {n}"
                )));
            }
        }
        Ok(())
    }

    /// Validate and build the compositor request.
    ///
    /// A blank title becomes "no title"; a missing overlay color becomes "no overlay". The
    /// border tint is always carried.
    pub fn to_request(
        &self,
        background: Option<Bitmap>,
        title_font: Option<TitleFont>,
    ) -> ThumbResult<RenderRequest> {
        self.validate()?;

        let mut req = RenderRequest::new(CanvasSize::new(self.width, self.height)?)
            .with_border(Tint::from_hex(&self.border_hex, self.border_alpha as f32));
        if let Some(bg) = background {
            req = req.with_background(bg);
        }
        if let Some(hex) = &self.overlay_hex {
            req = req.with_overlay(Tint::from_hex(hex, self.overlay_alpha as f32));
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            req = req.with_title(title);
        }
        if let Some(font) = title_font {
            req = req.with_title_font(font);
        }
        Ok(req)
    }
}

fn check_alpha(field: &str, alpha: f64) -> ThumbResult<()> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(ThumbError::validation(format!(
            "{field} must be in [0, 1], got {alpha}"
        )));
    }
    Ok(())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|r| match r {
        Repr::Str(s) => s,
        Repr::Int(n) => n.to_string(),
        Repr::Float(x) => x.to_string(),
    }))
}

/// An uploaded file: its name and raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    /// File name reported to the remote generator.
    pub file_name: String,
    /// Raw (still encoded) bytes.
    pub bytes: Arc<Vec<u8>>,
}

impl Upload {
    /// Wrap in-memory bytes.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: Arc::new(bytes),
        }
    }

    /// Read a file, using its file name as the upload name.
    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read upload '{}'", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

/// Optional file uploads that accompany a form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFiles {
    /// Screenshot used as the background.
    pub screenshot: Option<Upload>,
    /// Channel logo.
    pub logo: Option<Upload>,
    /// Game logo.
    pub game_logo: Option<Upload>,
}

#[cfg(test)]
#[path = "../tests/unit/form.rs"]
mod tests;
