use rand::seq::SliceRandom;
use rand::Rng;
use resvg::usvg::fontdb;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wcag_palette::ContrastTable;

use super::FontDescriptor;
use crate::error::AssetLoadError;

/// Longest accepted word, counted in Unicode scalar values
pub const MAX_WORD_CHARS: usize = 30;

/// Words of one script, keyed by language
pub type LanguageWords = BTreeMap<String, Vec<String>>;

/// Every asset the generator draws from.
///
/// Built once by [`crate::assets::AssetLoader`] and read-only afterwards,
/// except for [`Catalog::shuffle`] which needs exclusive access.
pub struct Catalog {
    backgrounds: Vec<PathBuf>,
    fonts: BTreeMap<String, Vec<FontDescriptor>>,
    words: BTreeMap<String, LanguageWords>,
    contrast: ContrastTable,
    fontdb: Arc<fontdb::Database>,
}

impl Catalog {
    /// Fails unless there is at least one background and at least one
    /// script with both words and fonts.
    pub fn new(
        backgrounds: Vec<PathBuf>,
        fonts: BTreeMap<String, Vec<FontDescriptor>>,
        words: BTreeMap<String, LanguageWords>,
        contrast: ContrastTable,
        fontdb: Arc<fontdb::Database>,
    ) -> Result<Self, AssetLoadError> {
        if backgrounds.is_empty() {
            return Err(AssetLoadError::Empty("backgrounds"));
        }
        let catalog = Self {
            backgrounds,
            fonts,
            words,
            contrast,
            fontdb,
        };
        if catalog.scripts().next().is_none() {
            return Err(AssetLoadError::Empty("scripts with both words and fonts"));
        }
        Ok(catalog)
    }

    pub fn backgrounds(&self) -> &[PathBuf] {
        &self.backgrounds
    }

    /// Uniformly drawn background.
    pub fn random_background<R: Rng + ?Sized>(&self, rng: &mut R) -> &Path {
        // Never empty, checked in `new`
        &self.backgrounds[rng.gen_range(0..self.backgrounds.len())]
    }

    /// Scripts that have both words and fonts, in sorted order.
    pub fn scripts(&self) -> impl Iterator<Item = &str> + '_ {
        self.words
            .keys()
            .filter(|script| self.fonts.get(*script).is_some_and(|f| !f.is_empty()))
            .map(String::as_str)
    }

    pub fn has_script(&self, script: &str) -> bool {
        self.scripts().any(|s| s == script)
    }

    pub fn fonts(&self, script: &str) -> &[FontDescriptor] {
        self.fonts.get(script).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn languages(&self, script: &str) -> Option<&LanguageWords> {
        self.words.get(script)
    }

    pub fn words(&self, script: &str, language: &str) -> &[String] {
        self.words
            .get(script)
            .and_then(|languages| languages.get(language))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contrast(&self) -> &ContrastTable {
        &self.contrast
    }

    pub fn fontdb(&self) -> &Arc<fontdb::Database> {
        &self.fontdb
    }

    pub fn font_count(&self) -> usize {
        self.fonts.values().map(Vec::len).sum()
    }

    pub fn word_count(&self) -> usize {
        self.words
            .values()
            .flat_map(|languages| languages.values())
            .map(Vec::len)
            .sum()
    }

    /// Reorder backgrounds, per-script fonts and per-language words in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.backgrounds.shuffle(rng);
        for fonts in self.fonts.values_mut() {
            fonts.shuffle(rng);
        }
        for languages in self.words.values_mut() {
            for words in languages.values_mut() {
                words.shuffle(rng);
            }
        }
        tracing::debug!("Shuffled catalog");
    }
}
