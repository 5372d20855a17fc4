use std::cmp::Ordering;
use std::fmt::Debug;

use num_traits::{Num, NumCast, ToPrimitive};

/// One-dimensional key type used by the hash-based index structures.
///
/// All hash-based indexes key their buckets with this type, so a point's
/// bucket label is always an integer regardless of the element type.
pub type HashKey = i64;

/// Numeric types usable as point coordinates.
pub trait IndexableNum:
    Num + NumCast + ToPrimitive + PartialOrd + Debug + Send + Sync + bytemuck::Pod
{
    /// Absolute tolerance under which two values compare as equal.
    ///
    /// Zero for integer types, so integer comparison stays exact.
    const EPSILON: Self;
}

impl IndexableNum for f32 {
    const EPSILON: Self = 1.0e-7;
}

impl IndexableNum for f64 {
    const EPSILON: Self = 1.0e-7;
}

impl IndexableNum for i32 {
    const EPSILON: Self = 0;
}

impl IndexableNum for u32 {
    const EPSILON: Self = 0;
}

impl IndexableNum for i64 {
    const EPSILON: Self = 0;
}

impl IndexableNum for u64 {
    const EPSILON: Self = 0;
}

/// Widen a coordinate to `f64` for normalization arithmetic.
///
/// `NaN` propagates into the hash instead of panicking; hashing a `NaN`
/// coordinate is implementation-defined but must not fault.
#[inline]
pub(crate) fn as_f64<N: IndexableNum>(value: N) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Three-valued comparison of `a` against `b`, treating values within
/// [`IndexableNum::EPSILON`] of each other as equal.
///
/// Index traversal logic deliberately does *not* use this: cutting-plane
/// decisions use the raw `<`/`>=` operators so that a point always routes to
/// the same side. Only point equality is tolerant.
#[inline]
pub fn compare<N: IndexableNum>(a: N, b: N) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let diff = if a < b { b - a } else { a - b };
    if diff < N::EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compare_is_tolerant_for_floats() {
        assert_eq!(compare(0.0f32, 0.0f32), Ordering::Equal);
        assert_eq!(compare(1.0f32, 0.0f32), Ordering::Greater);
        assert_eq!(compare(-1.0f32, 0.0f32), Ordering::Less);
        assert_eq!(compare(0.5f32, 0.5f32 + 5.0e-8), Ordering::Equal);
        assert_eq!(compare(0.5f32, 0.5f32 + 2.0e-7), Ordering::Less);
    }

    #[test]
    fn compare_is_exact_for_integers() {
        assert_eq!(compare(3i32, 3i32), Ordering::Equal);
        assert_eq!(compare(3i32, 4i32), Ordering::Less);
        assert_eq!(compare(4u64, 3u64), Ordering::Greater);
    }
}
