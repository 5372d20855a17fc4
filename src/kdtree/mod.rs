//! A point kd-tree, after Bentley's 1975 "Multidimensional binary search
//! trees used for associative searching".
//!
//! Each node stores exactly one point, and the cutting dimension cycles with
//! depth: a node at depth `k` partitions its descendants on coordinate
//! `k mod D`. Removal replaces an internal node's point with the minimum of
//! its right subtree along the node's cutting dimension.
//!
//! ## Example
//!
//! ```
//! use point_index::{KDTree, Point, PointIndex};
//!
//! let mut tree = KDTree::<2, f32>::new();
//! assert!(tree.insert(&Point::new([0.5, 0.5])));
//! assert!(tree.insert(&Point::new([0.25, 0.75])));
//! assert!(!tree.insert(&Point::new([0.25, 0.75])));
//!
//! assert!(tree.query(&Point::new([0.25, 0.75])));
//! assert!(tree.remove(&Point::new([0.5, 0.5])));
//! assert!(!tree.query(&Point::new([0.5, 0.5])));
//! ```

mod index;

pub use index::KDTree;
