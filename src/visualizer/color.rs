// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fmt;
use std::str::FromStr;

use crate::error::OverlayError;

/// Color type for overlay drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Red color.
    pub const RED: Color = Color(255, 0, 0);
    /// Green color.
    pub const GREEN: Color = Color(0, 255, 0);
    /// Blue color.
    pub const BLUE: Color = Color(0, 0, 255);
    /// Aqua, the default keypoint color.
    pub const AQUA: Color = Color(0, 255, 255);
    /// White color.
    pub const WHITE: Color = Color(255, 255, 255);
    /// Black color.
    pub const BLACK: Color = Color(0, 0, 0);

    /// Create a new color from RGB values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// `#rrggbb` form, as used in SVG attributes.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parses `#rrggbb` or one of the named constants (`aqua`, `red`, ...).
impl FromStr for Color {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let named = match s.to_ascii_lowercase().as_str() {
            "red" => Some(Self::RED),
            "green" | "lime" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            "aqua" | "cyan" => Some(Self::AQUA),
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let invalid = || OverlayError::ConfigError(format!("invalid color '{s}'"));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[cfg(feature = "annotate")]
impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb([c.0, c.1, c.2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Color::AQUA.to_hex(), "#00ffff");
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color(255, 128, 0));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!("Red".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("aqua".parse::<Color>().unwrap(), Color::AQUA);
    }

    #[test]
    fn test_invalid_colors() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("salmon".parse::<Color>().is_err());
    }
}
