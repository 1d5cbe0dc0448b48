/// Convenience result alias used across the crate.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Top-level error type for request construction, asset preparation and I/O.
///
/// The compositor itself never returns this type; see [`crate::render()`].
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// Input did not satisfy a range or format constraint.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes could not be decoded into a bitmap.
    #[error("decode error: {0}")]
    Decode(String),

    /// No usable font face could be resolved or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Internal raster failure while painting a layer.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, usually I/O with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build a [`ThumbError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThumbError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ThumbError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ThumbError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ThumbError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
