pub mod catalog;
pub mod config;
pub mod filters;
pub mod font;
pub mod payload;

pub use catalog::{Catalog, LanguageWords, MAX_WORD_CHARS};
pub use config::AppConfig;
pub use filters::GenerationFilters;
pub use font::{FontDescriptor, FontFamilyEntry, FontManifest, FontVariantEntry, FontWeight};
pub use payload::{GenerationPayload, GenerationResult, RenderedSample};
