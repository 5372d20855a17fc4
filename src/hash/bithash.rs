use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::Hasher;

use crate::hash::index::{HashIndex, PointHasher};
use crate::point::Point;
use crate::r#type::{HashKey, IndexableNum};

/// Hashes a point by combining the raw bit patterns of its coordinates.
///
/// No boundary or normalization is involved, so hashing is cheap. The price
/// is that tolerance stops at the bucket door: a coordinate that drifted by
/// less than the comparison tolerance still flips bits, landing the point in
/// a different bucket than the original.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitPatternHasher;

impl<const D: usize, N: IndexableNum> PointHasher<D, N> for BitPatternHasher {
    fn hash_point(&self, point: &Point<D, N>) -> HashKey {
        let mut state = DefaultHasher::new();
        for d in 0..D {
            state.write(bytemuck::bytes_of(&point[d]));
        }
        state.finish() as HashKey
    }
}

/// A hash index keyed on coordinate bit patterns.
///
/// Use this only where identical points are guaranteed to be bit-identical;
/// see [`BitPatternHasher`].
pub type BitHash<const D: usize, N> = HashIndex<D, N, BitPatternHasher>;

impl<const D: usize, N: IndexableNum> BitHash<D, N> {
    /// Create an empty bit-pattern hash index.
    pub fn new() -> Self {
        HashIndex::with_hasher(BitPatternHasher)
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.map = HashMap::new();
    }
}

impl<const D: usize, N: IndexableNum> Default for BitHash<D, N> {
    fn default() -> Self {
        Self::new()
    }
}
