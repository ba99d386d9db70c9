use rand::Rng;
use std::sync::Arc;

use super::{ContrastEngine, PayloadSampler};
use crate::error::GenerateError;
use crate::models::{AppConfig, Catalog, GenerationFilters, GenerationResult};
use crate::rendering::{Compositor, CompositorOptions};

/// Runs sampler and compositor with a bounded retry policy.
pub struct Generator {
    catalog: Arc<Catalog>,
    sampler: PayloadSampler,
    compositor: Compositor,
    neighbors: usize,
    max_attempts: u32,
}

impl Generator {
    pub fn new(catalog: Arc<Catalog>, config: &AppConfig) -> Self {
        let compositor = Compositor::new(
            catalog.fontdb().clone(),
            CompositorOptions::from_config(config),
        );
        Self {
            sampler: PayloadSampler::from_config(config),
            compositor,
            neighbors: config.neighbors,
            max_attempts: config.max_attempts.max(1),
            catalog,
        }
    }

    /// Generate one sample.
    ///
    /// Filter errors are returned at once. Render errors trigger a fresh
    /// sample and render, up to `max_attempts` in total.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        filters: &GenerationFilters,
        rng: &mut R,
    ) -> Result<GenerationResult, GenerateError> {
        let engine = ContrastEngine::new(self.catalog.contrast(), self.neighbors);
        let mut attempt = 1;

        loop {
            let payload = self.sampler.sample(&self.catalog, filters, rng)?;

            match self.compositor.render(&payload, &engine, rng) {
                Ok(sample) => {
                    tracing::debug!(attempt, script = payload.script, "Generated sample");
                    return Ok(GenerationResult::new(payload, sample));
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        background = %payload.background.display(),
                        font = %payload.font.full_name,
                        error = %e,
                        "Render failed"
                    );
                    if attempt >= self.max_attempts {
                        return Err(GenerateError::RetriesExhausted {
                            attempts: attempt,
                            last: e,
                        });
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// [`Generator::generate`] with the thread-local RNG.
    pub fn generate_random(
        &self,
        filters: &GenerationFilters,
    ) -> Result<GenerationResult, GenerateError> {
        self.generate(filters, &mut rand::thread_rng())
    }
}
