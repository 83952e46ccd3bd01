use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An ARGB color, 8 bits per channel.
///
/// Alpha is not premultiplied; `0x00000000` is fully transparent black and
/// `0xFFFFFFFF` is opaque white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Unpack from a `0xAARRGGBB` word.
    pub const fn from_argb_u32(value: u32) -> Self {
        Self {
            a: (value >> 24) as u8,
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` word.
    pub const fn to_argb_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Per-channel linear blend towards `to`.
    ///
    /// `fraction` 0.0 returns `self`, 1.0 returns `to` bit-exactly. Values
    /// outside `[0, 1]` are clamped.
    pub fn lerp(self, to: Color, fraction: f32) -> Color {
        let fraction = fraction.clamp(0.0, 1.0);
        Color {
            a: blend_channel(self.a, to.a, fraction),
            r: blend_channel(self.r, to.r, fraction),
            g: blend_channel(self.g, to.g, fraction),
            b: blend_channel(self.b, to.b, fraction),
        }
    }
}

fn blend_channel(from: u8, to: u8, fraction: f32) -> u8 {
    (from as f32 + fraction * (to as f32 - from as f32)).round() as u8
}

/// Errors that can occur when parsing a color from text.
#[derive(thiserror::Error, Debug)]
pub enum ColorParseError {
    #[error("invalid hex color '{0}': expected 6 or 8 hex digits")]
    InvalidLength(String),

    #[error("invalid hex color '{0}': {1}")]
    InvalidDigit(String, std::num::ParseIntError),
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `#RRGGBB` or `#AARRGGBB`; the leading `#` is optional.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| ColorParseError::InvalidDigit(input.to_string(), e))?;
        match digits.len() {
            6 => Ok(Color::from_argb_u32(0xFF00_0000 | value)),
            8 => Ok(Color::from_argb_u32(value)),
            _ => Err(ColorParseError::InvalidLength(input.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb_u32())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
