//! Frozen nearest-neighbor index over colors.
//!
//! Colors are accumulated in a [`ColorIndexBuilder`] and frozen into a
//! [`ColorIndex`], a balanced k-d tree stored implicitly in one `Vec`: every
//! subrange `lo..hi` keeps its median (on the axis for that depth) at
//! `lo + (hi - lo) / 2`, with smaller coordinates to the left. Once built the
//! index is never mutated, so it can be shared across threads freely.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::color::Rgb8;

const DIMS: usize = 3;

#[derive(Debug, Clone, Copy)]
struct Entry {
    point: [f32; DIMS],
    color: Rgb8,
}

/// One result of a [`ColorIndex::nearest`] query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub color: Rgb8,
    /// Euclidean distance in normalized sRGB space.
    pub distance: f32,
}

/// Accumulates colors before freezing them into a [`ColorIndex`].
#[derive(Debug, Default)]
pub struct ColorIndexBuilder {
    colors: Vec<Rgb8>,
    seen: HashSet<Rgb8>,
}

impl ColorIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a color. Returns `false` if it was already present.
    pub fn insert(&mut self, color: Rgb8) -> bool {
        if self.seen.insert(color) {
            self.colors.push(color);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Freeze the accumulated colors into a queryable index.
    pub fn build(self) -> ColorIndex {
        let mut entries: Vec<Entry> = self
            .colors
            .into_iter()
            .map(|color| Entry {
                point: color.to_point(),
                color,
            })
            .collect();
        build_subtree(&mut entries, 0);
        ColorIndex { entries }
    }
}

impl Extend<Rgb8> for ColorIndexBuilder {
    fn extend<T: IntoIterator<Item = Rgb8>>(&mut self, iter: T) {
        for color in iter {
            self.insert(color);
        }
    }
}

fn build_subtree(entries: &mut [Entry], depth: usize) {
    if entries.len() <= 1 {
        return;
    }
    let axis = depth % DIMS;
    let mid = entries.len() / 2;
    entries.select_nth_unstable_by(mid, |a, b| a.point[axis].total_cmp(&b.point[axis]));
    let (left, rest) = entries.split_at_mut(mid);
    build_subtree(left, depth + 1);
    build_subtree(&mut rest[1..], depth + 1);
}

/// Immutable k-d tree answering "k closest colors" queries.
#[derive(Debug, Clone, Default)]
pub struct ColorIndex {
    entries: Vec<Entry>,
}

impl ColorIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All indexed colors, in tree order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.entries.iter().map(|e| e.color)
    }

    pub fn contains(&self, color: Rgb8) -> bool {
        self.nearest(color.to_point(), 1)
            .first()
            .is_some_and(|n| n.color == color)
    }

    /// The `k` indexed colors closest to `query`, nearest first.
    ///
    /// `query` is in the same normalized space as [`Rgb8::to_point`]. Returns
    /// fewer than `k` results only when the index holds fewer than `k` colors.
    pub fn nearest(&self, query: [f32; DIMS], k: usize) -> Vec<Neighbor> {
        if k == 0 || self.entries.is_empty() {
            return Vec::new();
        }
        let mut heap = BinaryHeap::with_capacity(k + 1);
        self.search(0, self.entries.len(), 0, &query, k, &mut heap);
        heap.into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                color: self.entries[c.slot].color,
                distance: c.dist_sq.sqrt(),
            })
            .collect()
    }

    fn search(
        &self,
        lo: usize,
        hi: usize,
        depth: usize,
        query: &[f32; DIMS],
        k: usize,
        heap: &mut BinaryHeap<Candidate>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let entry = &self.entries[mid];

        let candidate = Candidate {
            dist_sq: distance_sq(&entry.point, query),
            slot: mid,
        };
        if heap.len() < k {
            heap.push(candidate);
        } else if heap.peek().is_some_and(|worst| candidate < *worst) {
            heap.pop();
            heap.push(candidate);
        }

        let axis = depth % DIMS;
        let diff = query[axis] - entry.point[axis];
        let (near, far) = if diff < 0.0 {
            ((lo, mid), (mid + 1, hi))
        } else {
            ((mid + 1, hi), (lo, mid))
        };

        self.search(near.0, near.1, depth + 1, query, k, heap);

        let worst = heap.peek().map_or(f32::INFINITY, |c| c.dist_sq);
        if heap.len() < k || diff * diff < worst {
            self.search(far.0, far.1, depth + 1, query, k, heap);
        }
    }
}

#[inline]
fn distance_sq(a: &[f32; DIMS], b: &[f32; DIMS]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Max-heap entry: the worst candidate so far sits on top.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    dist_sq: f32,
    slot: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist_sq
            .total_cmp(&other.dist_sq)
            .then(self.slot.cmp(&other.slot))
    }
}
