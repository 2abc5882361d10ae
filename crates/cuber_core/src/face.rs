//! Faces of the cube.

use std::fmt;

use cgmath::Vector3;
use cuber_math::prelude::*;
use strum::EnumIter;

/// Face of the cube, named by its notation letter.
#[derive(EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    /// Right (`+x`).
    #[default]
    R = 0,
    /// Left (`-x`).
    L = 1,
    /// Up (`+y`).
    U = 2,
    /// Down (`-y`).
    D = 3,
    /// Front (`+z`).
    F = 4,
    /// Back (`-z`).
    B = 5,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl From<SignedAxis> for Face {
    fn from(axis: SignedAxis) -> Self {
        use Face::*;

        match (axis.axis, axis.sign) {
            (Axis::X, Sign::Pos) => R,
            (Axis::X, Sign::Neg) => L,
            (Axis::Y, Sign::Pos) => U,
            (Axis::Y, Sign::Neg) => D,
            (Axis::Z, Sign::Pos) => F,
            (Axis::Z, Sign::Neg) => B,
        }
    }
}
impl Face {
    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }
    /// Returns which side of the cube the face is on.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }
    /// Returns the outward-pointing axis of the face.
    pub fn signed_axis(self) -> SignedAxis {
        self.axis().signed(self.sign())
    }
    /// Returns the outward-pointing unit normal of the face.
    pub fn vector(self) -> Vector3<Float> {
        self.signed_axis().vector()
    }
    /// Returns the face on the other side of the cube.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::from(-self.signed_axis())
    }

    /// Returns the face whose normal is closest to `v`.
    pub fn nearest(v: Vector3<Float>) -> Self {
        let [x, y, z] = [v.x.abs(), v.y.abs(), v.z.abs()];
        let axis = if x >= y && x >= z {
            Axis::X
        } else if y >= z {
            Axis::Y
        } else {
            Axis::Z
        };
        Self::from(axis.signed(Sign::of(axis.component(v))))
    }

    /// Returns the uppercase notation letter for the face.
    pub fn symbol(self) -> char {
        use Face::*;

        match self {
            R => 'R',
            L => 'L',
            U => 'U',
            D => 'D',
            F => 'F',
            B => 'B',
        }
    }
    /// Returns the face for an uppercase or lowercase notation letter.
    pub fn from_symbol(c: char) -> Option<Self> {
        use Face::*;

        match c.to_ascii_uppercase() {
            'R' => Some(R),
            'L' => Some(L),
            'U' => Some(U),
            'D' => Some(D),
            'F' => Some(F),
            'B' => Some(B),
            _ => None,
        }
    }
    /// Returns the full name of the face, such as `Right`.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            R => "Right",
            L => "Left",
            U => "Up",
            D => "Down",
            F => "Front",
            B => "Back",
        }
    }

    /// Returns the slice move letter for the center slice parallel to this
    /// face, and whether a twist of this face in the same direction is the
    /// inverse of that slice move.
    ///
    /// `M` follows `L`, `E` follows `D`, and `S` follows `F`.
    pub fn slice(self) -> (char, bool) {
        use Face::*;

        match self {
            R => ('M', true),
            L => ('M', false),
            U => ('E', true),
            D => ('E', false),
            F => ('S', false),
            B => ('S', true),
        }
    }
    /// Returns the face whose direction the slice move letter (`M`, `E`, or
    /// `S`, in either case) follows.
    pub fn from_slice_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'M' => Some(Face::L),
            'E' => Some(Face::D),
            'S' => Some(Face::F),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_face_axes() {
        for face in Face::iter() {
            assert_eq!(Face::from(face.signed_axis()), face);
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.opposite().axis(), face.axis());
            assert_ne!(face.opposite().sign(), face.sign());
            assert_eq!(Face::nearest(face.vector() * 0.9), face);
            assert_eq!(Face::from_symbol(face.symbol()), Some(face));
            assert_eq!(
                Face::from_symbol(face.symbol().to_ascii_lowercase()),
                Some(face),
            );
        }
        assert_eq!(Face::from_symbol('M'), None);
        assert_eq!(Face::R.opposite(), Face::L);
        assert_eq!(Face::B.name(), "Back");
        assert!(Face::iter().map(Face::name).all_unique());
    }

    #[test]
    fn test_slice_table() {
        for c in ['M', 'E', 'S'] {
            let face = Face::from_slice_symbol(c).expect("slice face");
            assert_eq!(face.slice(), (c, false));
            assert_eq!(face.opposite().slice(), (c, true));
        }
    }
}
