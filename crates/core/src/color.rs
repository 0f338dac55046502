//! RGB colors for the ambient light strip and message text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseColorError;

/// 24-bit color. Serialized as `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::from_hex(0x000000);
    pub const WHITE: Rgb = Rgb::from_hex(0xFFFFFF);
    pub const RED: Rgb = Rgb::from_hex(0xFF0000);
    pub const ORANGE: Rgb = Rgb::from_hex(0xFF7F00);
    pub const YELLOW: Rgb = Rgb::from_hex(0xFFFF00);
    pub const GREEN: Rgb = Rgb::from_hex(0x00FF00);
    pub const BLUE: Rgb = Rgb::from_hex(0x0000FF);
    pub const INDIGO: Rgb = Rgb::from_hex(0x4B0082);
    pub const VIOLET: Rgb = Rgb::from_hex(0x9400D3);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value; the top byte is ignored.
    pub const fn from_hex(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Accepts `#RRGGBB` or `RRGGBB` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb::from_hex)
            .map_err(|_| ParseColorError(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_and_without_hash() {
        assert_eq!("#FF7F00".parse::<Rgb>().unwrap(), Rgb::ORANGE);
        assert_eq!("9400d3".parse::<Rgb>().unwrap(), Rgb::VIOLET);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("#FFF".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
        assert!("".parse::<Rgb>().is_err());
    }

    #[test]
    fn display_is_upper_hex() {
        assert_eq!(Rgb::INDIGO.to_string(), "#4B0082");
        assert_eq!(Rgb::new(1, 2, 3).to_hex(), 0x010203);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgb::YELLOW).unwrap();
        assert_eq!(json, "\"#FFFF00\"");
        let back: Rgb = serde_json::from_str("\"#0000ff\"").unwrap();
        assert_eq!(back, Rgb::BLUE);
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }
}
