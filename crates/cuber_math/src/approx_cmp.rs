//! Comparisons that tolerate floating-point error up to [`EPSILON`].

pub use approx::AbsDiffEq;
use cgmath::{InnerSpace, Vector3};
use num_traits::Zero;

use crate::{EPSILON, Float};

/// Returns whether two values are within `EPSILON` of each other. Equal
/// infinities compare equal.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    a == b || approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Returns whether `x` is farther than `EPSILON` from zero.
pub fn is_approx_nonzero<T: AbsDiffEq<Epsilon = Float> + Zero>(x: &T) -> bool {
    !approx_eq(x, &T::zero())
}

/// Returns whether two vectors are perpendicular, or either one is zero.
pub fn is_approx_perpendicular(a: Vector3<Float>, b: Vector3<Float>) -> bool {
    !is_approx_nonzero(&a.dot(b))
}
