pub mod compositor;
pub mod encode;
pub mod text_layout;

pub use compositor::{Compositor, CompositorOptions};
pub use text_layout::{FitOptions, FittedText, TextLayout, TextLayouter};
