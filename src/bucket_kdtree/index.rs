use std::mem;

use crate::bucket_kdtree::strategies;
use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::IndexableNum;

/// Maximum number of points a leaf bucket may hold before it splits.
pub const BUCKET_MAX: usize = 8;

/// Subtree point count below which an internal node merges its children back
/// into a single leaf.
pub const MERGE_THRESHOLD: usize = BUCKET_MAX / 2;

#[derive(Debug)]
pub(crate) enum NodeKind<const D: usize, N: IndexableNum> {
    Leaf {
        points: Vec<Point<D, N>>,
    },
    Internal {
        cutting_dimension: usize,
        cutting_value: N,
        left: Box<BucketNode<D, N>>,
        right: Box<BucketNode<D, N>>,
    },
}

/// A bucket kd-tree node tracking the number of points in its subtree.
///
/// The count makes merge decisions O(1): an internal node knows the size of
/// the leaf a collapse would produce without walking its children.
#[derive(Debug)]
pub(crate) struct BucketNode<const D: usize, N: IndexableNum> {
    pub(crate) total_points: usize,
    pub(crate) kind: NodeKind<D, N>,
}

impl<const D: usize, N: IndexableNum> BucketNode<D, N> {
    fn empty_leaf() -> Self {
        Self {
            total_points: 0,
            kind: NodeKind::Leaf { points: Vec::new() },
        }
    }

    fn leaf_with(points: Vec<Point<D, N>>) -> Self {
        Self {
            total_points: points.len(),
            kind: NodeKind::Leaf { points },
        }
    }

    fn insert(&mut self, point: &Point<D, N>) -> bool {
        let overfull = match &mut self.kind {
            NodeKind::Internal {
                cutting_dimension,
                cutting_value,
                left,
                right,
            } => {
                let child = if point[*cutting_dimension] < *cutting_value {
                    left
                } else {
                    right
                };
                if !child.insert(point) {
                    return false;
                }
                None
            }
            NodeKind::Leaf { points } => {
                if points.iter().any(|stored| stored == point) {
                    return false;
                }
                if points.len() < BUCKET_MAX {
                    points.push(*point);
                    None
                } else {
                    Some(mem::take(points))
                }
            }
        };
        if let Some(points) = overfull {
            self.split_and_insert(points, point);
        }
        self.total_points += 1;
        true
    }

    /// Replace this (full) leaf with an internal node over two fresh leaves,
    /// then route the pending point into the side its coordinate selects.
    fn split_and_insert(&mut self, points: Vec<Point<D, N>>, point: &Point<D, N>) {
        let cutting_dimension = strategies::dimension_with_highest_range(&points);
        let cutting_value = strategies::average_of_dimension(cutting_dimension, &points);

        let mut left_points = Vec::new();
        let mut right_points = Vec::new();
        for stored in points {
            if stored[cutting_dimension] < cutting_value {
                left_points.push(stored);
            } else {
                right_points.push(stored);
            }
        }

        self.kind = NodeKind::Internal {
            cutting_dimension,
            cutting_value,
            left: Box::new(Self::leaf_with(left_points)),
            right: Box::new(Self::leaf_with(right_points)),
        };
        if let NodeKind::Internal {
            cutting_dimension,
            cutting_value,
            left,
            right,
        } = &mut self.kind
        {
            let child = if point[*cutting_dimension] < *cutting_value {
                left
            } else {
                right
            };
            // Never a duplicate: the pending point was absent from the leaf
            // this node just replaced. The child may split again, recomputing
            // the plane from its smaller point set.
            child.insert(point);
        }
    }

    fn remove(&mut self, point: &Point<D, N>) -> bool {
        let removed = match &mut self.kind {
            NodeKind::Leaf { points } => match points.iter().position(|stored| stored == point) {
                Some(position) => {
                    points.swap_remove(position);
                    true
                }
                None => false,
            },
            NodeKind::Internal {
                cutting_dimension,
                cutting_value,
                left,
                right,
            } => {
                let child = if point[*cutting_dimension] < *cutting_value {
                    left
                } else {
                    right
                };
                child.remove(point)
            }
        };
        if removed {
            self.total_points -= 1;
            self.attempt_merge();
        }
        removed
    }

    /// Collapse both children into this node when the subtree has shrunk
    /// below [`MERGE_THRESHOLD`].
    ///
    /// The threshold arithmetic guarantees both children are leaves by then:
    /// an internal child would itself have merged the moment its own count
    /// dropped below the threshold.
    fn attempt_merge(&mut self) {
        if self.total_points >= MERGE_THRESHOLD {
            return;
        }
        let merged = match &mut self.kind {
            NodeKind::Internal { left, right, .. } => {
                match (&mut left.kind, &mut right.kind) {
                    (
                        NodeKind::Leaf { points: left_points },
                        NodeKind::Leaf {
                            points: right_points,
                        },
                    ) => {
                        let mut points = mem::take(left_points);
                        points.append(right_points);
                        points
                    }
                    _ => return,
                }
            }
            NodeKind::Leaf { .. } => return,
        };
        self.kind = NodeKind::Leaf { points: merged };
    }
}

/// A bucket kd-tree: leaves hold up to [`BUCKET_MAX`] points, internal nodes
/// carry an adaptively chosen cutting plane.
///
/// The root starts as an empty leaf. Splits pick the dimension with the
/// widest value range (ties to the lowest index) and cut at its mean; merges
/// trigger when an internal node's subtree drops below [`MERGE_THRESHOLD`]
/// points.
#[derive(Debug, Default)]
pub struct BucketKDTree<const D: usize, N: IndexableNum> {
    pub(crate) root: BucketNode<D, N>,
}

impl<const D: usize, N: IndexableNum> BucketKDTree<D, N> {
    /// Create an empty bucket kd-tree.
    pub fn new() -> Self {
        Self {
            root: BucketNode::empty_leaf(),
        }
    }

    /// Remove all points from the tree.
    pub fn clear(&mut self) {
        self.root = BucketNode::empty_leaf();
    }

    /// Total number of points stored in the tree.
    pub fn total_points(&self) -> usize {
        self.root.total_points
    }
}

impl<const D: usize, N: IndexableNum> PointIndex<D, N> for BucketKDTree<D, N> {
    fn insert(&mut self, point: &Point<D, N>) -> bool {
        self.root.insert(point)
    }

    fn remove(&mut self, point: &Point<D, N>) -> bool {
        self.root.remove(point)
    }

    fn query(&self, point: &Point<D, N>) -> bool {
        let mut current = &self.root;
        loop {
            match &current.kind {
                NodeKind::Leaf { points } => {
                    return points.iter().any(|stored| stored == point);
                }
                NodeKind::Internal {
                    cutting_dimension,
                    cutting_value,
                    left,
                    right,
                } => {
                    current = if point[*cutting_dimension] < *cutting_value {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

impl<const D: usize, N: IndexableNum> Default for BucketNode<D, N> {
    fn default() -> Self {
        Self::empty_leaf()
    }
}
