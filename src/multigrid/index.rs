use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tinyvec::TinyVec;

use crate::boundary::Boundary;
use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::{as_f64, HashKey, IndexableNum};

/// Default number of grid intervals each dimension is cut into.
pub const DEFAULT_INTERVALS_PER_DIMENSION: f64 = 1.0e9;

/// Default number of point indices a leaf holds before converting into the
/// next level's hash map.
pub const DEFAULT_BUCKET_SIZE: usize = 8;

/// One node of the multigrid: either a leaf holding indices into the point
/// pool, or the hash map of the next dimension's partition.
///
/// Only leaves hold indices. There is no merge transition; a leaf that became
/// internal stays internal until the index is cleared.
#[derive(Debug)]
pub(crate) enum MultigridNode {
    Leaf(TinyVec<[usize; DEFAULT_BUCKET_SIZE]>),
    Internal(HashMap<HashKey, MultigridNode>),
}

impl MultigridNode {
    fn leaf_with(index: usize) -> Self {
        let mut indices = TinyVec::new();
        indices.push(index);
        Self::Leaf(indices)
    }
}

impl Default for MultigridNode {
    fn default() -> Self {
        Self::Leaf(TinyVec::new())
    }
}

/// The shared point pool with its free-index stack.
///
/// A slot whose index sits on the free stack holds stale data; only the leaf
/// that owns an index may read through it. The stack is LIFO, so the most
/// recently vacated slot is reused first. The pool is never compacted:
/// indices stored in leaves must stay valid.
#[derive(Debug)]
pub(crate) struct PointStore<const D: usize, N: IndexableNum> {
    pub(crate) points: Vec<Point<D, N>>,
    pub(crate) free_indices: Vec<usize>,
}

impl<const D: usize, N: IndexableNum> Default for PointStore<D, N> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            free_indices: Vec::new(),
        }
    }
}

impl<const D: usize, N: IndexableNum> PointStore<D, N> {
    fn alloc(&mut self, point: Point<D, N>) -> usize {
        match self.free_indices.pop() {
            Some(index) => {
                self.points[index] = point;
                index
            }
            None => {
                self.points.push(point);
                self.points.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) {
        self.free_indices.push(index);
    }

    fn num_stored(&self) -> usize {
        self.points.len() - self.free_indices.len()
    }
}

/// Normalizes one coordinate at a time into its grid interval.
#[derive(Debug, Clone)]
struct GridHasher<const D: usize, N: IndexableNum> {
    boundary: Boundary<D, N>,
    intervals_per_dimension: f64,
}

impl<const D: usize, N: IndexableNum> GridHasher<D, N> {
    #[inline]
    fn key(&self, point: &Point<D, N>, d: usize) -> HashKey {
        let min = as_f64(self.boundary[d].min);
        let max = as_f64(self.boundary[d].max);
        let normalized = (as_f64(point[d]) - min) / (max - min);
        (normalized * self.intervals_per_dimension) as HashKey
    }
}

/// A multigrid tree over a fixed boundary.
///
/// ## Example
///
/// ```
/// use point_index::{Boundary, Interval, Multigrid, Point, PointIndex};
///
/// let boundary = Boundary::splat(Interval::new(0.0f32, 1.0));
/// let mut grid = Multigrid::<3, f32>::new(boundary);
/// assert!(grid.insert(&Point::new([0.1, 0.2, 0.3])));
/// assert!(grid.query(&Point::new([0.1, 0.2, 0.3])));
/// assert!(grid.remove(&Point::new([0.1, 0.2, 0.3])));
/// ```
#[derive(Debug)]
pub struct Multigrid<const D: usize, N: IndexableNum> {
    hasher: GridHasher<D, N>,
    bucket_size: usize,
    pub(crate) root: HashMap<HashKey, MultigridNode>,
    pub(crate) store: PointStore<D, N>,
}

impl<const D: usize, N: IndexableNum> Multigrid<D, N> {
    /// Create an empty multigrid covering `boundary` with the default grid
    /// resolution and bucket size.
    pub fn new(boundary: Boundary<D, N>) -> Self {
        Self::with_parameters(
            boundary,
            DEFAULT_INTERVALS_PER_DIMENSION,
            DEFAULT_BUCKET_SIZE,
        )
    }

    /// Create an empty multigrid with an explicit per-dimension interval
    /// count and leaf bucket size.
    pub fn with_parameters(
        boundary: Boundary<D, N>,
        intervals_per_dimension: f64,
        bucket_size: usize,
    ) -> Self {
        Self {
            hasher: GridHasher {
                boundary,
                intervals_per_dimension,
            },
            bucket_size,
            root: HashMap::new(),
            store: PointStore::default(),
        }
    }

    /// Remove all points and rebase the grid over a new boundary.
    ///
    /// The boundary is required: grid cells are meaningless without one.
    pub fn clear(&mut self, boundary: Boundary<D, N>) {
        self.hasher.boundary = boundary;
        self.root = HashMap::new();
        self.store = PointStore::default();
    }

    /// Total number of points currently stored.
    pub fn num_points_stored(&self) -> usize {
        self.store.num_stored()
    }

    /// Number of leaf buckets across all levels.
    pub fn num_buckets(&self) -> usize {
        self.root.values().map(count_leaves).sum()
    }

    /// Mean number of points per leaf bucket, or zero for an empty grid.
    pub fn avg_points_per_bucket(&self) -> f64 {
        let buckets = self.num_buckets();
        if buckets == 0 {
            return 0.0;
        }
        self.num_points_stored() as f64 / buckets as f64
    }

    /// Size of the smallest leaf bucket, or zero for an empty grid.
    pub fn min_points_per_bucket(&self) -> usize {
        let mut min = usize::MAX;
        for node in self.root.values() {
            for_each_leaf(node, &mut |len| min = min.min(len));
        }
        if min == usize::MAX {
            0
        } else {
            min
        }
    }

    /// Size of the largest leaf bucket, or zero for an empty grid.
    pub fn max_points_per_bucket(&self) -> usize {
        let mut max = 0;
        for node in self.root.values() {
            for_each_leaf(node, &mut |len| max = max.max(len));
        }
        max
    }
}

impl<const D: usize, N: IndexableNum> PointIndex<D, N> for Multigrid<D, N> {
    fn insert(&mut self, point: &Point<D, N>) -> bool {
        let key = self.hasher.key(point, 0);
        match self.root.entry(key) {
            Entry::Vacant(slot) => {
                let index = self.store.alloc(*point);
                slot.insert(MultigridNode::leaf_with(index));
                true
            }
            Entry::Occupied(slot) => insert_into_node(
                &self.hasher,
                self.bucket_size,
                &mut self.store,
                slot.into_mut(),
                point,
                1,
            ),
        }
    }

    fn remove(&mut self, point: &Point<D, N>) -> bool {
        let key = self.hasher.key(point, 0);
        let Some(mut current) = self.root.get_mut(&key) else {
            return false;
        };
        let mut level = 1;
        loop {
            match current {
                MultigridNode::Leaf(indices) => {
                    let Some(position) = indices
                        .iter()
                        .position(|&index| self.store.points[index] == *point)
                    else {
                        return false;
                    };
                    let index = indices.swap_remove(position);
                    self.store.release(index);
                    return true;
                }
                MultigridNode::Internal(children) => {
                    let key = self.hasher.key(point, level);
                    match children.get_mut(&key) {
                        Some(child) => {
                            current = child;
                            level += 1;
                        }
                        None => return false,
                    }
                }
            }
        }
    }

    fn query(&self, point: &Point<D, N>) -> bool {
        let key = self.hasher.key(point, 0);
        let mut current = self.root.get(&key);
        let mut level = 1;
        while let Some(node) = current {
            match node {
                MultigridNode::Leaf(indices) => {
                    return indices
                        .iter()
                        .any(|&index| self.store.points[index] == *point);
                }
                MultigridNode::Internal(children) => {
                    let key = self.hasher.key(point, level);
                    current = children.get(&key);
                    level += 1;
                }
            }
        }
        false
    }
}

/// Recursive insert below the root map. `level` is the dimension `node`'s
/// children are partitioned by.
fn insert_into_node<const D: usize, N: IndexableNum>(
    hasher: &GridHasher<D, N>,
    bucket_size: usize,
    store: &mut PointStore<D, N>,
    node: &mut MultigridNode,
    point: &Point<D, N>,
    level: usize,
) -> bool {
    match node {
        MultigridNode::Internal(children) => {
            let key = hasher.key(point, level);
            return match children.entry(key) {
                Entry::Vacant(slot) => {
                    let index = store.alloc(*point);
                    slot.insert(MultigridNode::leaf_with(index));
                    true
                }
                Entry::Occupied(slot) => insert_into_node(
                    hasher,
                    bucket_size,
                    store,
                    slot.into_mut(),
                    point,
                    level + 1,
                ),
            };
        }
        MultigridNode::Leaf(indices) => {
            if indices
                .iter()
                .any(|&index| store.points[index] == *point)
            {
                return false;
            }
            // Past the last dimension there is nothing left to discriminate
            // by, so the leaf grows beyond its bucket size.
            if indices.len() < bucket_size || level >= D {
                let index = store.alloc(*point);
                indices.push(index);
                return true;
            }
        }
    }

    // Overfull leaf below the maximum depth: convert it into the next
    // level's hash map, then place the pending point.
    split_leaf(hasher, bucket_size, store, node, level);
    let index = store.alloc(*point);
    place_index(hasher, bucket_size, store, node, index, level);
    true
}

/// Convert a leaf into an internal node, redistributing its stored indices
/// by the `level` coordinate. Indices move; point slots are untouched.
fn split_leaf<const D: usize, N: IndexableNum>(
    hasher: &GridHasher<D, N>,
    bucket_size: usize,
    store: &PointStore<D, N>,
    node: &mut MultigridNode,
    level: usize,
) {
    let MultigridNode::Leaf(indices) = node else {
        return;
    };
    let stored = std::mem::take(indices);
    *node = MultigridNode::Internal(HashMap::new());
    for index in stored {
        place_index(hasher, bucket_size, store, node, index, level);
    }
}

/// Descend to the leaf that owns `index`'s point and append the index,
/// splitting further levels as needed.
fn place_index<const D: usize, N: IndexableNum>(
    hasher: &GridHasher<D, N>,
    bucket_size: usize,
    store: &PointStore<D, N>,
    node: &mut MultigridNode,
    index: usize,
    level: usize,
) {
    match node {
        MultigridNode::Leaf(indices) => {
            if indices.len() < bucket_size || level >= D {
                indices.push(index);
                return;
            }
        }
        MultigridNode::Internal(children) => {
            let key = hasher.key(&store.points[index], level);
            let child = children.entry(key).or_default();
            place_index(hasher, bucket_size, store, child, index, level + 1);
            return;
        }
    }

    split_leaf(hasher, bucket_size, store, node, level);
    place_index(hasher, bucket_size, store, node, index, level);
}

fn count_leaves(node: &MultigridNode) -> usize {
    match node {
        MultigridNode::Leaf(_) => 1,
        MultigridNode::Internal(children) => children.values().map(count_leaves).sum(),
    }
}

fn for_each_leaf(node: &MultigridNode, visit: &mut impl FnMut(usize)) {
    match node {
        MultigridNode::Leaf(indices) => visit(indices.len()),
        MultigridNode::Internal(children) => {
            for child in children.values() {
                for_each_leaf(child, visit);
            }
        }
    }
}
