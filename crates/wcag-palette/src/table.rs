//! Symmetric table of readable color pairs, built from palettes.

use std::collections::{BTreeSet, HashMap};

use crate::color::{Rgb8, Srgb};
use crate::contrast::passes_aa;
use crate::index::{ColorIndex, ColorIndexBuilder};

/// Collects AA-passing pairs palette by palette.
#[derive(Debug, Default)]
pub struct ContrastTableBuilder {
    partners: HashMap<Rgb8, BTreeSet<Rgb8>>,
    palettes: usize,
}

impl ContrastTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every ordered pair of distinct colors within `palette` and
    /// record the ones that pass WCAG AA, in both directions.
    ///
    /// Returns how many ordered pairs passed.
    pub fn add_palette(&mut self, palette: &[Rgb8]) -> usize {
        self.palettes += 1;

        let mut unique: Vec<Rgb8> = Vec::with_capacity(palette.len());
        for &c in palette {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }

        let mut passed = 0;
        for &a in &unique {
            for &b in &unique {
                if a == b || !passes_aa(Srgb::from(a), Srgb::from(b)) {
                    continue;
                }
                self.partners.entry(a).or_default().insert(b);
                self.partners.entry(b).or_default().insert(a);
                passed += 1;
            }
        }
        passed
    }

    /// Number of palettes fed in so far.
    pub fn palettes(&self) -> usize {
        self.palettes
    }

    /// Freeze into a [`ContrastTable`]. Every color that has at least one
    /// partner becomes a point in the index.
    pub fn build(self) -> ContrastTable {
        let mut keys: Vec<Rgb8> = self.partners.keys().copied().collect();
        keys.sort_unstable();

        let mut index = ColorIndexBuilder::new();
        index.extend(keys);

        let partners = self
            .partners
            .into_iter()
            .map(|(color, set)| (color, set.into_iter().collect()))
            .collect();

        ContrastTable {
            partners,
            index: index.build(),
        }
    }
}

/// Readable color pairs plus a nearest-color index over every paired color.
#[derive(Debug, Clone, Default)]
pub struct ContrastTable {
    partners: HashMap<Rgb8, Vec<Rgb8>>,
    index: ColorIndex,
}

impl ContrastTable {
    /// Colors recorded as readable against `color`, sorted. Empty for colors
    /// that never appeared in a passing pair.
    pub fn partners(&self, color: Rgb8) -> &[Rgb8] {
        self.partners.get(&color).map_or(&[], Vec::as_slice)
    }

    pub fn index(&self) -> &ColorIndex {
        &self.index
    }

    /// Number of distinct paired colors.
    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// Every recorded ordered pair.
    pub fn pairs(&self) -> impl Iterator<Item = (Rgb8, Rgb8)> + '_ {
        self.partners
            .iter()
            .flat_map(|(&a, bs)| bs.iter().map(move |&b| (a, b)))
    }

    pub fn pair_count(&self) -> usize {
        self.partners.values().map(Vec::len).sum()
    }
}
