use image::RgbImage;
use rand::Rng;
use resvg::usvg::fontdb;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wcag_palette::{Rgb8, Srgb};

use super::encode::{encode_gray8, encode_rgb8};
use super::text_layout::{FitOptions, TextLayouter};
use crate::error::RenderError;
use crate::models::{AppConfig, GenerationPayload, RenderedSample};
use crate::services::ContrastEngine;

/// Channel step used to merge near-identical shades before counting
const QUANTIZE_STEP: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositorOptions {
    pub fit: FitOptions,
    /// Write every sample here when set
    pub output_dir: Option<PathBuf>,
}

impl CompositorOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            fit: FitOptions {
                padding: config.padding,
                font_divisors: config.font_divisors.clone(),
                max_iterations: config.max_layout_iterations,
            },
            output_dir: config.save_to_disk.then(|| config.output_dir.clone()),
        }
    }
}

/// Renders a sampled payload into an (image, mask) pair.
pub struct Compositor {
    layouter: TextLayouter,
    options: CompositorOptions,
}

impl Compositor {
    pub fn new(fontdb: Arc<fontdb::Database>, options: CompositorOptions) -> Self {
        Self {
            layouter: TextLayouter::new(fontdb),
            options,
        }
    }

    /// Render one payload. Failures are returned, never retried here.
    pub fn render<R: Rng + ?Sized>(
        &self,
        payload: &GenerationPayload<'_>,
        engine: &ContrastEngine<'_>,
        rng: &mut R,
    ) -> Result<RenderedSample, RenderError> {
        let background = image::open(payload.background)
            .map_err(|source| RenderError::Background {
                path: payload.background.to_path_buf(),
                source,
            })?
            .to_rgb8();
        let (bg_width, bg_height) = background.dimensions();

        let fitted = self.layouter.fit(
            &payload.phrase,
            payload.font,
            bg_width,
            bg_height,
            &self.options.fit,
            rng,
        )?;
        let (width, height) = (fitted.roi_width, fitted.roi_height);

        // The fit is strict, so both ranges are non-empty
        let left = rng.gen_range(0..bg_width - width);
        let top = rng.gen_range(0..bg_height - height);
        let mut crop = image::imageops::crop_imm(&background, left, top, width, height).to_image();

        let coverage = fitted
            .layout
            .coverage(width, height, self.options.fit.padding)?;

        let observed = dominant_color(&crop, &coverage).ok_or(RenderError::EmptyMask)?;
        let text_color = engine
            .resolve_text_color(Srgb::from(observed))
            .ok_or_else(|| RenderError::NoContrastCandidate(observed.to_string()))?;

        blend(&mut crop, &coverage, text_color);

        let image_png = encode_rgb8(width, height, crop.as_raw())?;
        let mask_png = encode_gray8(width, height, &coverage)?;

        let (image_path, mask_path) = match &self.options.output_dir {
            Some(dir) => {
                let (image_path, mask_path) = save_sample(dir, &image_png, &mask_png)?;
                (Some(image_path), Some(mask_path))
            }
            None => (None, None),
        };

        tracing::debug!(
            background = %payload.background.display(),
            left,
            top,
            width,
            height,
            font_size = fitted.layout.font_size(),
            observed = %observed,
            text_color = %text_color,
            "Rendered sample"
        );

        Ok(RenderedSample {
            image_png,
            mask_png,
            text_color,
            image_path,
            mask_path,
        })
    }
}

/// Most frequent quantized color among pixels with non-zero coverage.
///
/// Ties go to the smallest color so the result does not depend on hash order.
pub fn dominant_color(image: &RgbImage, coverage: &[u8]) -> Option<Rgb8> {
    let mut counts: HashMap<Rgb8, u32> = HashMap::new();
    for (pixel, &alpha) in image.pixels().zip(coverage) {
        if alpha > 0 {
            *counts
                .entry(Rgb8::from_bytes(pixel.0).quantize(QUANTIZE_STEP))
                .or_default() += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(a, count_a), (b, count_b)| count_a.cmp(count_b).then_with(|| b.cmp(a)))
        .map(|(color, _)| color)
}

/// Alpha-blend `color` over `image` with per-pixel `coverage`.
pub fn blend(image: &mut RgbImage, coverage: &[u8], color: Rgb8) {
    let text = color.to_bytes();
    for (pixel, &alpha) in image.pixels_mut().zip(coverage) {
        let a = alpha as u32;
        if a == 0 {
            continue;
        }
        for (channel, &fg) in pixel.0.iter_mut().zip(&text) {
            *channel = ((fg as u32 * a + *channel as u32 * (255 - a) + 127) / 255) as u8;
        }
    }
}

fn save_sample(
    dir: &Path,
    image_png: &[u8],
    mask_png: &[u8],
) -> Result<(PathBuf, PathBuf), RenderError> {
    std::fs::create_dir_all(dir)?;
    let id = uuid::Uuid::new_v4();
    let image_path = dir.join(format!("{id}.png"));
    let mask_path = dir.join(format!("{id}-mask.png"));
    write_pair(&image_path, &mask_path, image_png, mask_png)?;

    tracing::debug!(path = %image_path.display(), "Saved sample");
    Ok((image_path, mask_path))
}

/// Write both files, or neither: the image is removed if the mask fails.
fn write_pair(
    image_path: &Path,
    mask_path: &Path,
    image_png: &[u8],
    mask_png: &[u8],
) -> Result<(), RenderError> {
    std::fs::write(image_path, image_png)?;
    if let Err(e) = std::fs::write(mask_path, mask_png) {
        if let Err(cleanup) = std::fs::remove_file(image_path) {
            tracing::warn!(path = %image_path.display(), error = %cleanup, "Failed to remove partial sample");
        }
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_dominant_color_uses_covered_pixels_only() {
        let mut image = RgbImage::from_pixel(4, 1, Rgb([200, 10, 10]));
        image.put_pixel(3, 0, Rgb([13, 14, 15]));
        // Only the last pixel is covered, and only faintly
        let coverage = [0, 0, 0, 1];

        assert_eq!(dominant_color(&image, &coverage), Some(Rgb8::new(12, 12, 12)));
    }

    #[test]
    fn test_dominant_color_quantizes_before_counting() {
        let mut image = RgbImage::new(3, 1);
        image.put_pixel(0, 0, Rgb([100, 100, 100]));
        image.put_pixel(1, 0, Rgb([101, 102, 103]));
        image.put_pixel(2, 0, Rgb([50, 50, 50]));

        assert_eq!(
            dominant_color(&image, &[255, 255, 255]),
            Some(Rgb8::new(100, 100, 100))
        );
    }

    #[test]
    fn test_dominant_color_tie_picks_smallest() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([200, 0, 0]));
        image.put_pixel(1, 0, Rgb([8, 0, 0]));

        assert_eq!(dominant_color(&image, &[255, 255]), Some(Rgb8::new(8, 0, 0)));
    }

    #[test]
    fn test_dominant_color_empty_mask() {
        let image = RgbImage::new(2, 2);
        assert_eq!(dominant_color(&image, &[0, 0, 0, 0]), None);
    }

    #[test]
    fn test_blend() {
        let mut image = RgbImage::from_pixel(3, 1, Rgb([0, 0, 0]));
        blend(&mut image, &[0, 255, 128], Rgb8::WHITE);

        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(2, 0).0, [128, 128, 128]);
    }

    #[test]
    fn test_options_from_config() {
        let config = AppConfig {
            save_to_disk: true,
            padding: 12,
            ..Default::default()
        };
        let options = CompositorOptions::from_config(&config);
        assert_eq!(options.fit.padding, 12);
        assert_eq!(options.fit.font_divisors, vec![5, 7, 10]);
        assert_eq!(options.output_dir, Some(PathBuf::from("generated_images")));

        let options = CompositorOptions::from_config(&AppConfig::default());
        assert_eq!(options.output_dir, None);
    }

    #[test]
    fn test_save_sample_writes_pair() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let (image_path, mask_path) = save_sample(&out, b"image", b"mask").unwrap();
        assert_eq!(std::fs::read(&image_path).unwrap(), b"image");
        assert_eq!(std::fs::read(&mask_path).unwrap(), b"mask");
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn test_failed_mask_write_removes_image() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("sample.png");
        // A directory in place of the mask file makes the second write fail
        let mask_path = dir.path().join("sample-mask.png");
        std::fs::create_dir(&mask_path).unwrap();

        let result = write_pair(&image_path, &mask_path, b"image", b"mask");
        assert!(matches!(result, Err(RenderError::Io(_))));
        assert!(!image_path.exists());
    }
}
