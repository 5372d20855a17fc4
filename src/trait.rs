use crate::point::Point;
use crate::r#type::IndexableNum;

/// Exact-match operations shared by every index structure in this crate.
///
/// Presence checks use tolerant [`Point`] equality. None of the operations
/// perform I/O or fail; the `bool` results carry the only outcome.
///
/// `clear` is deliberately *not* part of this trait: the kd-tree variants
/// clear without arguments, while the boundary-based indexes
/// ([`PyramidTree`][crate::PyramidTree], [`Multigrid`][crate::Multigrid])
/// require a new [`Boundary`][crate::Boundary] to stay meaningful.
pub trait PointIndex<const D: usize, N: IndexableNum> {
    /// Insert a point.
    ///
    /// Returns `true` if the point was newly stored and `false` if an equal
    /// point was already present (in which case nothing changes).
    fn insert(&mut self, point: &Point<D, N>) -> bool;

    /// Remove a point.
    ///
    /// Returns `true` if an equal point was found and removed, `false`
    /// otherwise.
    fn remove(&mut self, point: &Point<D, N>) -> bool;

    /// Return whether an equal point is currently stored.
    fn query(&self, point: &Point<D, N>) -> bool;
}
