use std::collections::HashMap;

use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::{HashKey, IndexableNum};

/// Maps a point to the one-dimensional key of the bucket that stores it.
pub trait PointHasher<const D: usize, N: IndexableNum> {
    fn hash_point(&self, point: &Point<D, N>) -> HashKey;
}

/// All points sharing one hash key.
///
/// `sums` mirrors `points` entry for entry with each point's coordinate sum.
/// Bucket scans compare the stored sum with raw equality before testing full
/// point equality, skipping most non-matches after a single comparison. The
/// two lists must stay in lockstep through every mutation.
#[derive(Debug)]
pub(crate) struct Bucket<const D: usize, N: IndexableNum> {
    pub(crate) points: Vec<Point<D, N>>,
    pub(crate) sums: Vec<N>,
}

impl<const D: usize, N: IndexableNum> Bucket<D, N> {
    fn position_of(&self, point: &Point<D, N>, sum: N) -> Option<usize> {
        self.points
            .iter()
            .zip(self.sums.iter())
            .position(|(stored, &stored_sum)| stored_sum == sum && stored == point)
    }
}

impl<const D: usize, N: IndexableNum> Default for Bucket<D, N> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            sums: Vec::new(),
        }
    }
}

/// A hash map of point buckets, generic over the hashing scheme.
#[derive(Debug)]
pub struct HashIndex<const D: usize, N: IndexableNum, H> {
    pub(crate) hasher: H,
    pub(crate) map: HashMap<HashKey, Bucket<D, N>>,
}

impl<const D: usize, N: IndexableNum, H> HashIndex<D, N, H> {
    pub(crate) fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            map: HashMap::new(),
        }
    }

    /// Total number of points currently stored.
    pub fn num_points_stored(&self) -> usize {
        self.map.values().map(|bucket| bucket.points.len()).sum()
    }

    /// Number of buckets, including any emptied by removals.
    pub fn num_buckets(&self) -> usize {
        self.map.len()
    }

    /// Mean number of points per bucket, or zero for an empty structure.
    pub fn avg_points_per_bucket(&self) -> f64 {
        if self.map.is_empty() {
            return 0.0;
        }
        self.num_points_stored() as f64 / self.num_buckets() as f64
    }

    /// Size of the smallest bucket, or zero for an empty structure.
    pub fn min_points_per_bucket(&self) -> usize {
        self.map
            .values()
            .map(|bucket| bucket.points.len())
            .min()
            .unwrap_or(0)
    }

    /// Size of the largest bucket, or zero for an empty structure.
    pub fn max_points_per_bucket(&self) -> usize {
        self.map
            .values()
            .map(|bucket| bucket.points.len())
            .max()
            .unwrap_or(0)
    }
}

impl<const D: usize, N: IndexableNum, H: PointHasher<D, N>> PointIndex<D, N>
    for HashIndex<D, N, H>
{
    fn insert(&mut self, point: &Point<D, N>) -> bool {
        let key = self.hasher.hash_point(point);
        let sum = point.sum();
        let bucket = self.map.entry(key).or_default();
        if bucket.position_of(point, sum).is_some() {
            return false;
        }
        bucket.points.push(*point);
        bucket.sums.push(sum);
        true
    }

    fn remove(&mut self, point: &Point<D, N>) -> bool {
        let key = self.hasher.hash_point(point);
        let Some(bucket) = self.map.get_mut(&key) else {
            return false;
        };
        let Some(position) = bucket.position_of(point, point.sum()) else {
            return false;
        };
        bucket.points.swap_remove(position);
        bucket.sums.swap_remove(position);
        true
    }

    fn query(&self, point: &Point<D, N>) -> bool {
        let key = self.hasher.hash_point(point);
        self.map
            .get(&key)
            .is_some_and(|bucket| bucket.position_of(point, point.sum()).is_some())
    }
}
