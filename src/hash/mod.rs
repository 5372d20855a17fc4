//! Hash-based index structures.
//!
//! [`HashIndex`] hashes every point to a one-dimensional [`HashKey`] and
//! stores it in a bucket keyed by that value. How points are hashed is left
//! to a [`PointHasher`]; two are provided:
//!
//! - [`PyramidHasher`] implements the Pyramid-technique mapping from
//!   Berchtold et al.'s 1998 paper, with a hash map standing in for the
//!   original B+-tree as the one-dimensional structure. [`PyramidTree`] is
//!   the resulting index.
//! - [`BitPatternHasher`] hashes the raw bit patterns of the coordinates.
//!   [`BitHash`], the resulting index, is typically the fastest structure
//!   here but offers no tolerance: a point whose bits drifted will hash into
//!   a different bucket even when it compares equal to a stored point.
//!
//! [`HashKey`]: crate::HashKey

mod bithash;
mod index;
mod pyramid;

pub use bithash::{BitHash, BitPatternHasher};
pub use index::{HashIndex, PointHasher};
pub use pyramid::{PyramidHasher, PyramidTree, MAX_BUCKET_NUMBER};
