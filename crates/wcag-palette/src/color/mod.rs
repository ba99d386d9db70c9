//! Color types and conversion utilities
//!
//! - [`Rgb8`]: 8-bit sRGB triple. Hashable, used as the key for contrast pairs
//!   and printed as lowercase `#rrggbb`.
//! - [`Srgb`]: normalized sRGB (0.0..=1.0). The coordinate space of the
//!   nearest-color index.
//! - [`LinearRgb`]: linear light, from which WCAG relative luminance is taken.
//!
//! # Example
//!
//! ```
//! use wcag_palette::{LinearRgb, Rgb8, Srgb};
//!
//! let teal: Rgb8 = "#008080".parse().unwrap();
//! let srgb = Srgb::from(teal);
//! let luminance = LinearRgb::from(srgb).relative_luminance();
//! assert!(luminance > 0.0 && luminance < 1.0);
//! assert_eq!(teal.to_string(), "#008080");
//! ```

mod linear_rgb;
mod rgb8;
mod srgb;

pub use linear_rgb::LinearRgb;
pub use rgb8::Rgb8;
pub use srgb::Srgb;
