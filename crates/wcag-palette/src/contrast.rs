//! WCAG 2.x contrast ratio.

use crate::color::{LinearRgb, Srgb};

/// Minimum contrast ratio for WCAG AA normal-size text.
pub const AA_THRESHOLD: f64 = 4.5;

/// Contrast ratio between two colors, `(L_light + 0.05) / (L_dark + 0.05)`.
///
/// Symmetric in its arguments. Ranges from 1.0 (identical luminance) to
/// 21.0 (black on white).
pub fn contrast_ratio(a: Srgb, b: Srgb) -> f64 {
    let la = LinearRgb::from(a).relative_luminance();
    let lb = LinearRgb::from(b).relative_luminance();
    let (light, dark) = if la >= lb { (la, lb) } else { (lb, la) };
    (light + 0.05) / (dark + 0.05)
}

/// True if the pair is readable as normal-size text under WCAG AA.
#[inline]
pub fn passes_aa(a: Srgb, b: Srgb) -> bool {
    contrast_ratio(a, b) >= AA_THRESHOLD
}
