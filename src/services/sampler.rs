use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::FilterError;
use crate::models::{AppConfig, Catalog, FontDescriptor, GenerationFilters, GenerationPayload};

/// Draws random, filter-constrained payloads from a catalog.
#[derive(Debug, Clone)]
pub struct PayloadSampler {
    max_phrase_words: usize,
    default_scripts: Vec<String>,
}

impl PayloadSampler {
    pub fn new(max_phrase_words: usize, default_scripts: Vec<String>) -> Self {
        Self {
            max_phrase_words: max_phrase_words.max(1),
            default_scripts,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.max_phrase_words, config.default_scripts.clone())
    }

    pub fn sample<'c, R: Rng + ?Sized>(
        &self,
        catalog: &'c Catalog,
        filters: &GenerationFilters,
        rng: &mut R,
    ) -> Result<GenerationPayload<'c>, FilterError> {
        let background = catalog.random_background(rng);

        let script = self.pick_script(catalog, filters, rng)?;

        let languages: Vec<(&'c String, &'c Vec<String>)> = catalog
            .languages(script)
            .into_iter()
            .flatten()
            .filter(|(language, words)| !words.is_empty() && filters.allows_language(language))
            .collect();
        let (language, words) =
            languages
                .choose(rng)
                .copied()
                .ok_or_else(|| FilterError::NoMatchingLanguages {
                    script: script.to_string(),
                })?;

        let fonts: Vec<&'c FontDescriptor> = catalog
            .fonts(script)
            .iter()
            .filter(|font| filters.allows_font(font))
            .collect();
        let font = fonts
            .choose(rng)
            .copied()
            .ok_or_else(|| FilterError::NoMatchingFonts {
                script: script.to_string(),
            })?;

        let phrase = self.build_phrase(words, rng);

        tracing::debug!(
            background = %background.display(),
            script,
            language = %language,
            font = %font.full_name,
            phrase = %phrase,
            "Sampled payload"
        );

        Ok(GenerationPayload {
            background,
            script,
            language: language.as_str(),
            font,
            phrase,
        })
    }

    fn pick_script<'c, R: Rng + ?Sized>(
        &self,
        catalog: &'c Catalog,
        filters: &GenerationFilters,
        rng: &mut R,
    ) -> Result<&'c str, FilterError> {
        let available: Vec<&'c str> = match filters.requested_scripts() {
            Some(requested) => {
                let available: Vec<&str> = catalog
                    .scripts()
                    .filter(|s| requested.iter().any(|r| r.as_str() == *s))
                    .collect();
                if available.is_empty() {
                    return Err(FilterError::NoMatchingScripts {
                        requested: requested.to_vec(),
                    });
                }
                available
            }
            None => {
                let defaults: Vec<&str> = catalog
                    .scripts()
                    .filter(|s| self.default_scripts.iter().any(|d| d.as_str() == *s))
                    .collect();
                if defaults.is_empty() {
                    catalog.scripts().collect()
                } else {
                    defaults
                }
            }
        };

        available
            .choose(rng)
            .copied()
            .ok_or_else(|| FilterError::NoMatchingScripts {
                requested: Vec::new(),
            })
    }

    /// One word, then keep appending with probability 1/2 per step.
    fn build_phrase<R: Rng + ?Sized>(&self, words: &[String], rng: &mut R) -> String {
        let mut phrase = String::new();
        if let Some(first) = words.choose(rng) {
            phrase.push_str(first);
        }

        let mut count = 1;
        while count < self.max_phrase_words && rng.gen_bool(0.5) {
            let Some(word) = words.choose(rng) else {
                break;
            };
            phrase.push(if rng.gen_bool(0.5) { ' ' } else { '\n' });
            phrase.push_str(word);
            count += 1;
        }
        phrase
    }
}
