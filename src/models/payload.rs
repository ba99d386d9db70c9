use std::path::{Path, PathBuf};
use wcag_palette::Rgb8;

use super::FontDescriptor;

/// One sampled combination of assets, borrowed from the catalog.
#[derive(Debug, Clone)]
pub struct GenerationPayload<'c> {
    pub background: &'c Path,
    pub script: &'c str,
    pub language: &'c str,
    pub font: &'c FontDescriptor,
    /// Words joined by a space or a line break
    pub phrase: String,
}

/// Output of the compositor for one payload.
#[derive(Debug, Clone)]
pub struct RenderedSample {
    pub image_png: Vec<u8>,
    pub mask_png: Vec<u8>,
    pub text_color: Rgb8,
    pub image_path: Option<PathBuf>,
    pub mask_path: Option<PathBuf>,
}

/// Everything a caller gets back from one successful generation.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub image_png: Vec<u8>,
    pub mask_png: Vec<u8>,
    pub text: String,
    pub text_color: Rgb8,
    pub font_face: String,
    pub family: String,
    pub category: String,
    pub style: String,
    pub italic: bool,
    pub weight: u16,
    pub script: String,
    pub language: String,
    pub image_path: Option<PathBuf>,
    pub mask_path: Option<PathBuf>,
}

impl GenerationResult {
    pub fn new(payload: GenerationPayload<'_>, sample: RenderedSample) -> Self {
        let font = payload.font;
        Self {
            image_png: sample.image_png,
            mask_png: sample.mask_png,
            text: payload.phrase,
            text_color: sample.text_color,
            font_face: font.full_name.clone(),
            family: font.family.clone(),
            category: font.category.clone(),
            style: font.style.clone(),
            italic: font.is_italic(),
            weight: font.weight,
            script: payload.script.to_string(),
            language: payload.language.to_string(),
            image_path: sample.image_path,
            mask_path: sample.mask_path,
        }
    }
}
