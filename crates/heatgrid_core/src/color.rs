//! Colors
//!
//! Channels are stored as normalized `f32` values in sRGB. Interpolation works
//! directly on those channels, which is what browser color interpolators do
//! for plain RGB ramps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a hex color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("hex color must have 3 or 6 digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digit {0:?} in color")]
    InvalidDigit(char),
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb8(r, g, b)
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }

        let mut nibbles = Vec::with_capacity(6);
        for c in digits.chars() {
            let v = c.to_digit(16).ok_or(ColorParseError::InvalidDigit(c))?;
            nibbles.push(v);
        }

        let hex = match nibbles.len() {
            3 => nibbles
                .iter()
                .fold(0u32, |acc, &n| (acc << 8) | (n << 4) | n),
            6 => nibbles.iter().fold(0u32, |acc, &n| (acc << 4) | n),
            n => return Err(ColorParseError::InvalidLength(n)),
        };
        Ok(Self::from_hex(hex))
    }

    /// Channel-wise linear interpolation; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        [channel_u8(self.r), channel_u8(self.g), channel_u8(self.b)]
    }

    pub fn to_hex_string(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// CSS functional notation, e.g. `rgb(69, 117, 180)`.
    pub fn to_css(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        if self.a >= 1.0 {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {})", self.a.clamp(0.0, 1.0))
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn channel_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_hex(s)
    }
}
