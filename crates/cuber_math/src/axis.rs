//! Coordinate axes and signed axis directions.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use cgmath::Vector3;

use crate::{Float, Sign};

/// 3-dimensional axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Axis {
    /// Returns an iterator over all axes.
    pub fn iter() -> impl Clone + Iterator<Item = Axis> {
        [Axis::X, Axis::Y, Axis::Z].into_iter()
    }

    /// Returns the lowercase symbol for the axis.
    pub const fn symbol(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
    /// Returns the axis with the given lowercase symbol.
    pub fn from_symbol(c: char) -> Option<Axis> {
        match c {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<Float> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// Returns the component of `v` along this axis.
    pub fn component(self, v: Vector3<Float>) -> Float {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Returns the coordinate of a flat cube index along this axis, given the
    /// cube order. Indices are laid out as `z*n*n + y*n + x`.
    pub const fn coordinate_of_index(self, index: usize, order: usize) -> usize {
        match self {
            Axis::X => index % order,
            Axis::Y => (index % (order * order)) / order,
            Axis::Z => index / (order * order),
        }
    }

    /// Returns the signed axis pointing along this one in the given
    /// direction.
    pub const fn signed(self, sign: Sign) -> SignedAxis {
        SignedAxis { axis: self, sign }
    }
}

/// Signed axis direction, such as `+x` or `-z`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignedAxis {
    /// Unsigned axis.
    pub axis: Axis,
    /// Direction along the axis.
    pub sign: Sign,
}
impl Neg for SignedAxis {
    type Output = SignedAxis;

    fn neg(self) -> Self::Output {
        self.axis.signed(-self.sign)
    }
}
impl From<Axis> for SignedAxis {
    fn from(axis: Axis) -> Self {
        axis.signed(Sign::Pos)
    }
}
impl fmt::Display for SignedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            Sign::Neg => write!(f, "-{}", self.axis),
            Sign::Pos => write!(f, "{}", self.axis),
        }
    }
}
impl FromStr for SignedAxis {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (Sign::Neg, rest),
            None => (Sign::Pos, s),
        };
        let mut chars = rest.chars();
        match (chars.next().and_then(Axis::from_symbol), chars.next()) {
            (Some(axis), None) => Ok(axis.signed(sign)),
            _ => Err(()),
        }
    }
}
impl SignedAxis {
    /// Returns an iterator over all six signed axes, positive axes first.
    pub fn iter() -> impl Clone + Iterator<Item = SignedAxis> {
        Sign::iter().flat_map(|sign| Axis::iter().map(move |axis| axis.signed(sign)))
    }

    /// Returns the unit vector pointing along this signed axis.
    pub fn vector(self) -> Vector3<Float> {
        self.axis.unit_vec3() * self.sign.float()
    }
}
