//! sRGB color type
//!
//! sRGB is the standard color space for display and storage of images.
//! It applies a gamma curve to linear light values for perceptual uniformity.

use std::str::FromStr;

use super::rgb8::Rgb8;
use crate::error::ParseColorError;

/// A color in sRGB color space.
///
/// Values are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-corrected, 0.0..=1.0)
    pub r: f32,
    /// Green channel (gamma-corrected, 0.0..=1.0)
    pub g: f32,
    /// Blue channel (gamma-corrected, 0.0..=1.0)
    pub b: f32,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use wcag_palette::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to a byte array [R, G, B].
    ///
    /// Rounds and clamps values to the 0..=255 range.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Coordinates of this color as a point for nearest-neighbor queries.
    #[inline]
    pub fn to_point(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string, see [`Rgb8`] for accepted forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Rgb8>().map(Srgb::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_constructors() {
        let color = Srgb::from_u8(255, 128, 0);
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.b, 0.0);

        assert_eq!(Srgb::from_u8(0, 0, 0).to_bytes(), [0, 0, 0]);
        assert_eq!(Srgb::from_u8(127, 127, 127).to_bytes(), [127, 127, 127]);
        assert_eq!(Srgb::from_u8(255, 255, 255).to_bytes(), [255, 255, 255]);
    }

    #[test]
    fn test_to_bytes_clamps() {
        assert_eq!(Srgb::new(1.5, -0.2, 0.5).to_bytes(), [255, 0, 128]);
    }

    #[test]
    fn test_hex_parsing() {
        let white: Srgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Srgb::new(1.0, 1.0, 1.0));
        let red: Srgb = "#f00".parse().unwrap();
        assert_eq!(red, Srgb::new(1.0, 0.0, 0.0));
        assert!("#FFFF".parse::<Srgb>().is_err());
    }
}
