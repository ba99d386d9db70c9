//! 8-bit sRGB color, the form colors take in palette files and responses.

use std::fmt;
use std::str::FromStr;

use super::srgb::Srgb;
use crate::error::ParseColorError;

/// An 8-bit-per-channel sRGB color.
///
/// Formats as lowercase `#rrggbb`; parses `#rrggbb`, `rrggbb`, `#rgb` and
/// `rgb` case-insensitively, so `Rgb8::from_str(x)?.to_string()` reproduces
/// any well-formed 6-digit `x` up to letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Snap every channel down to a multiple of `step`.
    ///
    /// Used to merge near-identical shades before counting frequencies.
    /// A `step` of 0 or 1 leaves the color unchanged.
    #[inline]
    pub fn quantize(self, step: u8) -> Self {
        if step <= 1 {
            return self;
        }
        Self::new(
            self.r / step * step,
            self.g / step * step,
            self.b / step * step,
        )
    }

    /// Position of this color in the normalized coordinate space used by
    /// [`ColorIndex`](crate::ColorIndex).
    #[inline]
    pub fn to_point(self) -> [f32; 3] {
        let srgb = Srgb::from(self);
        [srgb.r, srgb.g, srgb.b]
    }
}

impl From<Rgb8> for Srgb {
    fn from(c: Rgb8) -> Self {
        Srgb::from_u8(c.r, c.g, c.b)
    }
}

impl From<Srgb> for Rgb8 {
    fn from(c: Srgb) -> Self {
        Rgb8::from_bytes(c.to_bytes())
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength(s.chars().count()));
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            len => Err(ParseColorError::InvalidLength(len)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_is_case_insensitive() {
        for hex in ["#112233", "#abcdef", "#ABCDEF", "#00Ff7f", "#000000", "#ffffff"] {
            let color: Rgb8 = hex.parse().unwrap();
            assert_eq!(color.to_string(), hex.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_round_trip_every_grey() {
        for v in 0..=255u8 {
            let hex = format!("#{v:02x}{v:02x}{v:02x}");
            assert_eq!(hex.parse::<Rgb8>().unwrap().to_string(), hex);
        }
    }

    #[test]
    fn test_shorthand_and_bare() {
        assert_eq!("#f00".parse::<Rgb8>().unwrap(), Rgb8::new(255, 0, 0));
        assert_eq!("ABC".parse::<Rgb8>().unwrap(), Rgb8::new(0xAA, 0xBB, 0xCC));
        assert_eq!(" 102030 ".parse::<Rgb8>().unwrap(), Rgb8::new(16, 32, 48));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "#GGGGGG".parse::<Rgb8>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Rgb8>(),
            Err(ParseColorError::InvalidLength(4))
        ));
        assert!(matches!(
            "".parse::<Rgb8>(),
            Err(ParseColorError::InvalidLength(0))
        ));
        // Multi-byte input must not panic on slicing
        assert!("#ééé".parse::<Rgb8>().is_err());
    }

    #[test]
    fn test_quantize() {
        let c = Rgb8::new(255, 6, 3);
        assert_eq!(c.quantize(4), Rgb8::new(252, 4, 0));
        assert_eq!(c.quantize(1), c);
        assert_eq!(c.quantize(0), c);
    }

    #[test]
    fn test_to_point_is_normalized() {
        assert_eq!(Rgb8::WHITE.to_point(), [1.0, 1.0, 1.0]);
        assert_eq!(Rgb8::BLACK.to_point(), [0.0, 0.0, 0.0]);
    }
}
