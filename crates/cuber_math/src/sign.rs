//! Sign enum.

use std::ops::Neg;

use crate::Float;

/// Positive or negative.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    #[default]
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Sign {
    /// Returns the sign of a number, treating zero as positive.
    pub fn of(x: Float) -> Sign {
        if x < 0.0 { Sign::Neg } else { Sign::Pos }
    }

    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i32 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0 or
    /// 1.0).
    pub const fn float(self) -> Float {
        self.int() as Float
    }

    /// Returns an iterator over all signs.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Pos, Sign::Neg].into_iter()
    }
}
