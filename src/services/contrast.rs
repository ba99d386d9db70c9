use wcag_palette::{contrast_ratio, ContrastTable, Rgb8, Srgb};

/// Picks a readable text color for an observed background color.
///
/// The observed color is mapped to its `k` nearest known palette colors;
/// among all their recorded partners the one with the highest contrast
/// against the observed color wins.
pub struct ContrastEngine<'a> {
    table: &'a ContrastTable,
    neighbors: usize,
}

impl<'a> ContrastEngine<'a> {
    pub fn new(table: &'a ContrastTable, neighbors: usize) -> Self {
        Self {
            table,
            neighbors: neighbors.max(1),
        }
    }

    /// `None` only when the table holds no colors.
    pub fn resolve_text_color(&self, observed: Srgb) -> Option<Rgb8> {
        let mut best: Option<(Rgb8, f64)> = None;

        for neighbor in self.table.index().nearest(observed.to_point(), self.neighbors) {
            for &partner in self.table.partners(neighbor.color) {
                let ratio = contrast_ratio(observed, Srgb::from(partner));
                // Strictly greater keeps the first candidate on ties
                if best.map_or(true, |(_, r)| ratio > r) {
                    best = Some((partner, ratio));
                }
            }
        }

        if let Some((color, ratio)) = best {
            tracing::trace!(
                observed = %Rgb8::from(observed),
                text_color = %color,
                ratio,
                "Resolved text color"
            );
        }
        best.map(|(color, _)| color)
    }
}
