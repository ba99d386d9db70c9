//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! WCAG relative luminance is a weighted sum of linear channels.

use super::srgb::Srgb;

/// sRGB channel value at or below which the transfer function is linear.
///
/// WCAG 2.x specifies 0.03928 (from an early sRGB draft) rather than the
/// IEC 61966-2-1 value of 0.04045. The two agree on every 8-bit input.
const WCAG_LINEAR_KNEE: f64 = 0.03928;

/// A color in linear RGB color space.
///
/// Channels are kept in f64: contrast ratios are compared against a hard
/// 4.5 threshold and must match a reference computation exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// WCAG relative luminance: `0.2126 R + 0.7152 G + 0.0722 B`.
    ///
    /// 0.0 for black, 1.0 for white.
    #[inline]
    pub fn relative_luminance(self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

#[inline]
fn srgb_to_linear(c: f64) -> f64 {
    let c = c.clamp(0.0, 1.0);
    if c <= WCAG_LINEAR_KNEE {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r as f64),
            g: srgb_to_linear(srgb.g as f64),
            b: srgb_to_linear(srgb.b as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_extremes() {
        let black = LinearRgb::from(Srgb::from_u8(0, 0, 0));
        let white = LinearRgb::from(Srgb::from_u8(255, 255, 255));
        assert_eq!(black.relative_luminance(), 0.0);
        assert!((white.relative_luminance() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_gamma_values() {
        // sRGB 0.5 -> linear ~0.214
        let mid = LinearRgb::from(Srgb::new(0.5, 0.5, 0.5));
        assert!((mid.r - 0.214).abs() < 0.001, "got {}", mid.r);

        // Below the knee the curve is a straight line
        let dark = LinearRgb::from(Srgb::new(0.03, 0.03, 0.03));
        assert!((dark.r - 0.03 / 12.92).abs() < 1e-9);
    }

    #[test]
    fn test_green_dominates_luminance() {
        let red = LinearRgb::from(Srgb::from_u8(255, 0, 0)).relative_luminance();
        let green = LinearRgb::from(Srgb::from_u8(0, 255, 0)).relative_luminance();
        let blue = LinearRgb::from(Srgb::from_u8(0, 0, 255)).relative_luminance();
        assert!(green > red && red > blue);
    }

    #[test]
    fn test_monotonicity() {
        let mut prev = srgb_to_linear(0.0);
        for i in 1..=1000 {
            let curr = srgb_to_linear(i as f64 / 1000.0);
            assert!(curr >= prev, "srgb_to_linear not monotonic at {i}");
            prev = curr;
        }
    }
}
