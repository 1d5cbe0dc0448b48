use serde::{Deserialize, Serialize};

use crate::foundation::error::{ThumbError, ThumbResult};

/// Opaque sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    pub fn parse_hex(s: &str) -> ThumbResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ThumbError::validation(format!(
                "hex color must be #RRGGBB (case-insensitive), got \"{s}\""
            )));
        }

        let byte = |i: usize| -> ThumbResult<u8> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ThumbError::validation(format!("invalid hex byte in \"{s}\"")))
        };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?))
    }

    /// Parse like [`Rgb8::parse_hex`], falling back to black for malformed input.
    pub fn from_hex_or_black(s: &str) -> Self {
        Self::parse_hex(s).unwrap_or(Self::BLACK)
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as an opaque RGBA8 quadruple.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A flat color layer blended over the canvas at a constant alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    color: Rgb8,
    alpha: f32,
}

impl Tint {
    /// Construct a tint; `alpha` is clamped to `[0, 1]` and NaN becomes `0`.
    pub fn new(color: Rgb8, alpha: f32) -> Self {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self { color, alpha }
    }

    /// Construct from a hex string, using black when the string is malformed.
    pub fn from_hex(hex: &str, alpha: f32) -> Self {
        Self::new(Rgb8::from_hex_or_black(hex), alpha)
    }

    /// Tint color.
    pub fn color(self) -> Rgb8 {
        self.color
    }

    /// Blend alpha in `[0, 1]`.
    pub fn alpha(self) -> f32 {
        self.alpha
    }

    /// `true` when painting this tint would leave the canvas unchanged.
    pub fn is_invisible(self) -> bool {
        self.alpha <= 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
