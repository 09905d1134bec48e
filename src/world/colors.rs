//! Color definitions for density tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TierColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TierColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for TierColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl From<TierColor> for String {
    fn from(color: TierColor) -> Self {
        color.hex()
    }
}

impl TryFrom<String> for TierColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TierColor::from_hex(&value).ok_or_else(|| format!("invalid color: {}", value))
    }
}

// Density tiers (green → amber → red)
pub const DENSITY_LOW: TierColor = TierColor::rgb(0x22, 0xc5, 0x5e);
pub const DENSITY_MID: TierColor = TierColor::rgb(0xea, 0xb3, 0x08);
pub const DENSITY_HIGH: TierColor = TierColor::rgb(0xef, 0x44, 0x44);
