//! Phrase layout through usvg: build a small SVG text document, let usvg
//! shape it with the catalog's font database, then measure or rasterize it.

use rand::seq::SliceRandom;
use rand::Rng;
use resvg::usvg::{self, fontdb, Transform};
use std::fmt::Write as _;
use std::sync::Arc;
use tiny_skia::Pixmap;

use crate::error::{LayoutError, RenderError};
use crate::models::FontDescriptor;

/// Line advance for multi-line phrases, in em
const LINE_HEIGHT_EM: f32 = 1.2;

/// Lays phrases out with a shared font database.
#[derive(Clone)]
pub struct TextLayouter {
    fontdb: Arc<fontdb::Database>,
}

/// A shaped phrase and its tight bounding box.
pub struct TextLayout {
    tree: usvg::Tree,
    bbox: usvg::Rect,
    font_size: u32,
}

/// Result of the font-size search: a layout plus the padded region it needs.
pub struct FittedText {
    pub layout: TextLayout,
    pub roi_width: u32,
    pub roi_height: u32,
}

/// Knobs for [`TextLayouter::fit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitOptions {
    pub padding: u32,
    pub font_divisors: Vec<u32>,
    pub max_iterations: u32,
}

impl TextLayouter {
    pub fn new(fontdb: Arc<fontdb::Database>) -> Self {
        Self { fontdb }
    }

    pub fn layout(
        &self,
        phrase: &str,
        font: &FontDescriptor,
        font_size: u32,
    ) -> Result<TextLayout, RenderError> {
        let svg = text_svg(phrase, font, font_size);
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        if tree.root().children().is_empty() {
            return Err(LayoutError::EmptyText.into());
        }
        let bbox = tree.root().abs_bounding_box();
        if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            return Err(LayoutError::EmptyText.into());
        }

        Ok(TextLayout {
            tree,
            bbox,
            font_size,
        })
    }

    /// Find a font size at which the phrase plus padding fits strictly inside
    /// a `bg_width` x `bg_height` background.
    ///
    /// Starts from `bg_height / divisor` for a random divisor and shrinks by
    /// bumping the divisor, at most `max_iterations` times.
    pub fn fit<R: Rng + ?Sized>(
        &self,
        phrase: &str,
        font: &FontDescriptor,
        bg_width: u32,
        bg_height: u32,
        options: &FitOptions,
        rng: &mut R,
    ) -> Result<FittedText, RenderError> {
        let Some(&start) = options.font_divisors.choose(rng) else {
            return Err(LayoutError::NoFit { iterations: 0 }.into());
        };
        let mut divisor = start.max(1);

        for _ in 0..options.max_iterations {
            let font_size = bg_height / divisor;
            if font_size < 1 {
                return Err(LayoutError::FontTooSmall {
                    width: bg_width,
                    height: bg_height,
                }
                .into());
            }

            let layout = self.layout(phrase, font, font_size)?;
            let roi_width = layout.width().saturating_add(options.padding.saturating_mul(2));
            let roi_height = layout.height().saturating_add(options.padding.saturating_mul(2));
            if roi_width < bg_width && roi_height < bg_height {
                tracing::trace!(font_size, divisor, roi_width, roi_height, "Phrase fits");
                return Ok(FittedText {
                    layout,
                    roi_width,
                    roi_height,
                });
            }
            divisor += 1;
        }

        Err(LayoutError::NoFit {
            iterations: options.max_iterations,
        }
        .into())
    }
}

impl TextLayout {
    pub fn width(&self) -> u32 {
        self.bbox.width().ceil() as u32
    }

    pub fn height(&self) -> u32 {
        self.bbox.height().ceil() as u32
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Rasterize the phrase in white with its bounding box at
    /// (`padding`, `padding`) and return per-pixel coverage (0..=255).
    pub fn coverage(&self, width: u32, height: u32, padding: u32) -> Result<Vec<u8>, RenderError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;

        let transform = Transform::from_translate(
            padding as f32 - self.bbox.x(),
            padding as f32 - self.bbox.y(),
        );
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        Ok(pixmap.data().chunks_exact(4).map(|px| px[3]).collect())
    }
}

/// SVG document with one `tspan` per line of `phrase`.
fn text_svg(phrase: &str, font: &FontDescriptor, font_size: u32) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"><text x="0" y="0" font-family="{}" font-size="{}" font-weight="{}" font-style="{}" fill="#ffffff">"##,
        escape_xml(&font.family),
        font_size,
        font.weight,
        if font.is_italic() { "italic" } else { "normal" },
    );
    for (i, line) in phrase.split('\n').enumerate() {
        let dy = if i == 0 { 0.0 } else { LINE_HEIGHT_EM };
        let _ = write!(
            svg,
            r#"<tspan x="0" dy="{dy}em">{}</tspan>"#,
            escape_xml(line)
        );
    }
    svg.push_str("</text></svg>");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
