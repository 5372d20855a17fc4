//! Exact-match multi-dimensional point index structures.
//!
//! This crate stores `D`-dimensional points (`D` fixed at compile time) of a
//! numeric element type and answers `insert`, `remove`, and `query` by exact
//! point identity, where "exact" means componentwise equality within a small
//! absolute tolerance for float element types. It is not a spatial engine:
//! there are no range, window, or nearest-neighbor queries.
//!
//! Five structures share the [`PointIndex`] contract but differ sharply in
//! representation:
//!
//! - [`KDTree`]: a point kd-tree, one point per node, cutting dimensions
//!   cycling with depth.
//! - [`BucketKDTree`]: leaves bucket up to [`bucket_kdtree::BUCKET_MAX`]
//!   points, cutting planes are chosen adaptively, and shrunken subtrees
//!   merge back into leaves.
//! - [`PyramidTree`]: Pyramid-technique hashing of points into a
//!   one-dimensional hash map of buckets; requires a [`Boundary`].
//! - [`Multigrid`]: per-dimension recursive hash partitioning into a tree of
//!   hash maps; requires a [`Boundary`].
//! - [`BitHash`]: hashing over raw coordinate bit patterns; fastest, but
//!   blind to floating-point drift.

pub mod boundary;
pub mod bucket_kdtree;
pub mod dataset;
pub mod error;
pub mod hash;
pub mod kdtree;
pub mod multigrid;
pub mod point;
pub mod r#trait;
pub mod r#type;
pub mod util;

pub use boundary::{Boundary, Interval};
pub use bucket_kdtree::BucketKDTree;
pub use dataset::Dataset;
pub use error::{PointIndexError, Result};
pub use hash::{BitHash, HashIndex, PointHasher, PyramidTree};
pub use kdtree::KDTree;
pub use multigrid::Multigrid;
pub use point::Point;
pub use r#trait::PointIndex;
pub use r#type::{compare, HashKey, IndexableNum};

#[cfg(test)]
pub(crate) mod test;
