//! wcag-palette: readable color pairs for text-on-image synthesis
//!
//! Palettes of hex colors go in; out comes a [`ContrastTable`] holding every
//! pair of colors that passes WCAG AA, plus a frozen nearest-neighbor
//! [`ColorIndex`] over the paired colors so an arbitrary observed color can
//! be mapped to known ones cheaply.
//!
//! ```
//! use wcag_palette::{ContrastTableBuilder, Rgb8, Srgb, contrast_ratio};
//!
//! let mut builder = ContrastTableBuilder::new();
//! let palette: Vec<Rgb8> = ["#ffffff", "#1d3557", "#a8dadc"]
//!     .iter()
//!     .map(|h| h.parse().unwrap())
//!     .collect();
//! builder.add_palette(&palette);
//! let table = builder.build();
//!
//! // Nearest known colors to a mid blue, then the most readable partner.
//! let observed = Srgb::from_u8(40, 60, 90);
//! let best = table
//!     .index()
//!     .nearest(observed.to_point(), 10)
//!     .iter()
//!     .flat_map(|n| table.partners(n.color).iter().copied())
//!     .max_by(|a, b| {
//!         contrast_ratio(observed, Srgb::from(*a))
//!             .total_cmp(&contrast_ratio(observed, Srgb::from(*b)))
//!     });
//! assert_eq!(best, Some(Rgb8::WHITE));
//! ```
//!
//! The crate has no dependencies.

pub mod color;
pub mod contrast;
pub mod error;
pub mod index;
pub mod table;

pub use color::{LinearRgb, Rgb8, Srgb};
pub use contrast::{contrast_ratio, passes_aa, AA_THRESHOLD};
pub use error::ParseColorError;
pub use index::{ColorIndex, ColorIndexBuilder, Neighbor};
pub use table::{ContrastTable, ContrastTableBuilder};
