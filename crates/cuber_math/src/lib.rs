//! Axis, sign, and ray primitives for simulating NxNxN cubes.

pub use {approx, cgmath, num_traits as num};

/// Floating-point type used for geometry.
pub type Float = f32;

/// Small floating-point value used for comparisons and tiny offsets.
pub const EPSILON: Float = 0.000001;

/// Angle of a quarter turn, in radians.
pub const QUARTER_TURN: Float = std::f32::consts::FRAC_PI_2;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = 0.0001)
    };
}

pub mod approx_cmp;
pub mod axis;
pub mod ray;
pub mod sign;

pub use axis::{Axis, SignedAxis};
pub use ray::{Plane, Ray};
pub use sign::Sign;

/// Structs, traits, and constants.
pub mod prelude {
    pub use cgmath::{
        InnerSpace, Point2, Point3, Quaternion, Rotation, Rotation3, Vector2, Vector3,
    };

    pub use crate::approx_cmp::*;
    pub use crate::axis::{Axis, SignedAxis};
    pub use crate::ray::{Plane, Ray};
    pub use crate::sign::Sign;
    pub use crate::{EPSILON, Float, QUARTER_TURN, quarter_turns, snap_to_quarter_turns};
}

/// Rounds an angle (in radians) to the nearest multiple of a quarter turn.
pub fn snap_to_quarter_turns(angle: Float) -> Float {
    quarter_turns(angle) as Float * QUARTER_TURN
}

/// Returns the number of quarter turns nearest to an angle (in radians).
pub fn quarter_turns(angle: Float) -> i32 {
    (angle / QUARTER_TURN).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turn_snapping() {
        assert_eq!(quarter_turns(0.0), 0);
        assert_eq!(quarter_turns(0.7), 0);
        assert_eq!(quarter_turns(0.8), 1);
        assert_eq!(quarter_turns(-0.8), -1);
        assert_eq!(quarter_turns(3.0), 2);
        assert_approx_eq!(snap_to_quarter_turns(-1.4), -QUARTER_TURN);
        assert_approx_eq!(snap_to_quarter_turns(4.8), 3.0 * QUARTER_TURN);
    }
}
