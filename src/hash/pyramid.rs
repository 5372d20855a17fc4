use std::cmp::Ordering;
use std::collections::HashMap;

use crate::boundary::Boundary;
use crate::hash::index::{HashIndex, PointHasher};
use crate::point::Point;
use crate::r#type::{as_f64, compare, HashKey, IndexableNum};

/// Upper bound of the one-dimensional key space shared by all pyramids.
///
/// This exceeds the exact-integer range of an `f32`, so the derived bucket
/// interval is computed and kept in `f64` regardless of the element type.
pub const MAX_BUCKET_NUMBER: f64 = 3.0e10;

/// The original Pyramid-technique mapping from a point to a one-dimensional
/// pyramid value.
///
/// Coordinates are normalized into `[0, 1]` against the boundary, and the
/// point is assigned to the pyramid of the dimension in which it sits
/// furthest from the center. The key is `(pyramid_index + height) *
/// bucket_interval`, where the first `D` pyramid indices are the "lower"
/// pyramids and the next `D` the "upper" ones.
///
/// Dimensions whose height is exactly `0.5` (the point sits on a pyramid
/// apex for that dimension) are skipped when picking the maximum, so points
/// on the extremes of the boundary don't all collapse onto the apex
/// dimension. If every dimension is skipped, dimension 0 is used.
#[derive(Debug, Clone)]
pub struct PyramidHasher<const D: usize, N: IndexableNum> {
    boundary: Boundary<D, N>,
    bucket_interval: f64,
}

impl<const D: usize, N: IndexableNum> PyramidHasher<D, N> {
    pub fn new(boundary: Boundary<D, N>) -> Self {
        let bucket_interval = (MAX_BUCKET_NUMBER / (2 * D) as f64).floor();
        Self {
            boundary,
            bucket_interval,
        }
    }

    /// Normalize a coordinate into `[0, 1]` against its dimension's interval.
    ///
    /// Coordinates outside the boundary normalize outside `[0, 1]`; they
    /// still hash to a usable key.
    #[inline]
    fn normalize(&self, coord: N, d: usize) -> f64 {
        let min = as_f64(self.boundary[d].min);
        let max = as_f64(self.boundary[d].max);
        (as_f64(coord) - min) / (max - min)
    }

    /// Distance of a normalized coordinate from the pyramid center.
    #[inline]
    fn pyramid_height(&self, coord: N, d: usize) -> f64 {
        (0.5 - self.normalize(coord, d)).abs()
    }
}

impl<const D: usize, N: IndexableNum> PointHasher<D, N> for PyramidHasher<D, N> {
    fn hash_point(&self, point: &Point<D, N>) -> HashKey {
        let mut d_max = 0;
        let mut d_max_height = -1.0f64;
        for d in 0..D {
            let height = self.pyramid_height(point[d], d);
            if compare(height, 0.5) == Ordering::Equal {
                continue;
            }
            if d_max_height < height {
                d_max = d;
                d_max_height = height;
            }
        }
        if d_max_height < 0.0 {
            // Every dimension sits on an apex.
            d_max_height = self.pyramid_height(point[0], 0);
        }

        let pyramid_index = if self.normalize(point[d_max], d_max) < 0.5 {
            d_max
        } else {
            d_max + D
        };
        ((pyramid_index as f64 + d_max_height) * self.bucket_interval) as HashKey
    }
}

/// A Pyramid-technique index: pyramid-value hashing into a one-dimensional
/// hash map of buckets.
///
/// ## Example
///
/// ```
/// use point_index::{Boundary, Interval, Point, PointIndex, PyramidTree};
///
/// let boundary = Boundary::splat(Interval::new(0.0f32, 1.0));
/// let mut tree = PyramidTree::<2, f32>::new(boundary);
/// assert!(tree.insert(&Point::new([0.3, 0.9])));
/// assert!(tree.query(&Point::new([0.3, 0.9])));
/// ```
pub type PyramidTree<const D: usize, N> = HashIndex<D, N, PyramidHasher<D, N>>;

impl<const D: usize, N: IndexableNum> PyramidTree<D, N> {
    /// Create an empty Pyramid tree covering `boundary`.
    pub fn new(boundary: Boundary<D, N>) -> Self {
        HashIndex::with_hasher(PyramidHasher::new(boundary))
    }

    /// Remove all points and rebase the index over a new boundary.
    ///
    /// The boundary is required: pyramid values are meaningless without one.
    pub fn clear(&mut self, boundary: Boundary<D, N>) {
        self.hasher = PyramidHasher::new(boundary);
        self.map = HashMap::new();
    }
}
