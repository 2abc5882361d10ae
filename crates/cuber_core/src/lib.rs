//! Move algebra for NxNxN cubes.
//!
//! A [`Cube`] owns `N^3` cubelets and a [`GroupTable`] of every twistable
//! group: single layers, contiguous layer ranges, slices, and whole-cube
//! rotations. Groups are addressed by standard cube notation (`R`, `Rw`,
//! `2-3Rw`, `M`, `x`, ...) and twisted through a hold/twist/drop lifecycle
//! that keeps the slot map consistent.

#[macro_use]
extern crate lazy_static;

mod action;
mod cube;
mod cubelet;
mod errors;
mod face;
pub mod notation;
mod table;
pub mod tween;

pub use action::{MoveLog, TwistAction};
pub use cube::{Cube, GroupMut};
pub use cubelet::{Cubelet, CubeletId};
pub use errors::CubeError;
pub use face::Face;
pub use notation::{BlockType, GroupKey, LayerRange, Sentinel};
pub use table::{CubeGroup, GroupAxis, GroupId, GroupTable};

/// Smallest supported cube order.
pub const MIN_ORDER: u16 = 2;
/// Largest supported cube order.
pub const MAX_ORDER: u16 = 9;
/// Order of a standard cube.
pub const DEFAULT_ORDER: u16 = 3;

/// One third of the width of the whole cube, in world units. A cube of any
/// order is `3 * CUBELET_SIZE` wide.
pub const CUBELET_SIZE: cuber_math::Float = 64.0;
