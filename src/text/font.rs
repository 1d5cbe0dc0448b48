use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Family preference for titles, approximating `Inter, system-ui, sans-serif`.
pub const TITLE_FAMILIES: &[&str] = &[
    "Inter",
    "Segoe UI",
    "Roboto",
    "Helvetica Neue",
    "Noto Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
];

/// Owned font face used to shape and draw the title.
///
/// Resolution (file system access, system font discovery) happens before rendering; the
/// compositor only ever sees bytes.
#[derive(Clone)]
pub struct TitleFont {
    bytes: Arc<Vec<u8>>,
    index: u32,
    family: String,
}

impl std::fmt::Debug for TitleFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .finish()
    }
}

impl PartialEq for TitleFont {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.bytes == other.bytes
    }
}

impl TitleFont {
    /// Wrap raw font bytes (TTF/OTF, or a TTC with `index` selecting the face).
    pub fn from_bytes(bytes: Vec<u8>, index: u32) -> ThumbResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        let face = db
            .faces()
            .find(|f| f.index == index)
            .ok_or_else(|| ThumbError::font(format!("no font face at index {index}")))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| ThumbError::font("font face has no family name"))?;

        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            family,
        })
    }

    /// Read a font file, picking its boldest upright face.
    ///
    /// A collection (TTC) with a bold member yields that member. A file holding only a regular
    /// face is drawn regular: glyphs are never synthetically emboldened.
    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        let index = boldest_face_index(&bytes).unwrap_or(0);
        Self::from_bytes(bytes, index)
    }

    /// Pick a bold sans-serif face from installed fonts plus any fonts found in `extra_dirs`.
    ///
    /// Families in [`TITLE_FAMILIES`] are tried in order, then the generic sans-serif family,
    /// then any face at all.
    pub fn resolve_system(extra_dirs: &[PathBuf]) -> ThumbResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            load_fonts_from_dir(&mut db, dir);
        }

        let mut families: Vec<usvg::fontdb::Family<'_>> = TITLE_FAMILIES
            .iter()
            .map(|&name| usvg::fontdb::Family::Name(name))
            .collect();
        families.push(usvg::fontdb::Family::SansSerif);

        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight::BOLD,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };

        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| ThumbError::font("no fonts installed or found in font dirs"))?;

        let family = db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| ThumbError::font(format!("font data for '{family}' is unreadable")))?;

        tracing::debug!(%family, index, bytes = bytes.len(), "resolved title font");
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            family,
        })
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn shared_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }

    /// Face index inside [`TitleFont::bytes`].
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Primary family name reported by the face.
    pub fn family(&self) -> &str {
        &self.family
    }
}

/// Index of the face closest to bold weight, preferring upright faces, then lower indices.
fn boldest_face_index(bytes: &[u8]) -> Option<u32> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.to_vec());
    db.faces()
        .min_by_key(|f| {
            (
                f.style != usvg::fontdb::Style::Normal,
                f.weight.0.abs_diff(usvg::fontdb::Weight::BOLD.0),
                f.index,
            )
        })
        .map(|f| f.index)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font dir is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
