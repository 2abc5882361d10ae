//! Table of every twistable group on a cube.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use cgmath::{One, Rad};
use cuber_math::prelude::*;

use crate::notation::{self, BlockType, GroupKey, LayerRange, Sentinel};
use crate::{CubeletId, TwistAction};

/// Index of a group in a [`GroupTable`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

/// Axis about which a group twists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GroupAxis {
    /// Coordinate axis.
    Signed(SignedAxis),
    /// Diagonal axis `(1, 1, 1)`, used by block-type and sentinel groups.
    /// Twisting about it is recorded but does not move any cubelets.
    Diagonal,
}
impl GroupAxis {
    /// Returns the (not necessarily normalized) vector along the axis.
    pub fn vector(self) -> Vector3<Float> {
        match self {
            GroupAxis::Signed(axis) => axis.vector(),
            GroupAxis::Diagonal => Vector3::new(1.0, 1.0, 1.0),
        }
    }
    /// Returns the coordinate axis, if there is one.
    pub fn signed(self) -> Option<SignedAxis> {
        match self {
            GroupAxis::Signed(axis) => Some(axis),
            GroupAxis::Diagonal => None,
        }
    }
}

/// Named, twistable subset of the cube's slots.
///
/// A group is idle until it is held. While held it owns the cubelets that
/// were in its slots, and its angle is the displayed rotation of those
/// cubelets.
#[derive(Debug, Clone)]
pub struct CubeGroup {
    key: GroupKey,
    axis: GroupAxis,
    /// Slot indices, shared with every other group covering the same slots.
    indices: Arc<[usize]>,

    pub(crate) members: Vec<CubeletId>,
    pub(crate) angle: Float,
    pub(crate) held: bool,
}
impl CubeGroup {
    fn new(key: GroupKey, axis: GroupAxis, indices: Arc<[usize]>) -> Self {
        Self {
            key,
            axis,
            indices,
            members: vec![],
            angle: 0.0,
            held: false,
        }
    }

    /// Returns the canonical key of the group.
    pub fn key(&self) -> GroupKey {
        self.key
    }
    /// Returns the twist axis of the group.
    pub fn axis(&self) -> GroupAxis {
        self.axis
    }
    /// Returns the slot indices covered by the group.
    pub fn indices(&self) -> &Arc<[usize]> {
        &self.indices
    }
    /// Returns the cubelets held by the group, which is empty when idle.
    pub fn members(&self) -> &[CubeletId] {
        &self.members
    }
    /// Returns the current rotation angle of the group, in radians.
    pub fn angle(&self) -> Float {
        self.angle
    }
    /// Returns whether the group is held.
    pub fn is_held(&self) -> bool {
        self.held
    }
    /// Returns the current rotation of the group.
    pub fn pose(&self) -> Quaternion<Float> {
        match self.axis {
            GroupAxis::Signed(axis) => Quaternion::from_axis_angle(axis.vector(), Rad(self.angle)),
            GroupAxis::Diagonal => Quaternion::one(),
        }
    }

    /// Returns the notation for twisting the group by `times` quarter turns,
    /// counterclockwise if `reverse` is true.
    pub fn action(&self, order: u16, reverse: bool, times: u32) -> TwistAction {
        notation::format_action(order, self.key, reverse, times)
    }

    pub(crate) fn reset(&mut self) {
        self.members.clear();
        self.angle = 0.0;
        self.held = false;
    }
}

/// Every group on a cube of a particular order, indexed by key.
///
/// For each signed axis and contiguous layer range there is exactly one
/// group. Groups for negative axes share their slot list with the group for
/// the same layers on the positive axis.
#[derive(Debug, Clone)]
pub struct GroupTable {
    order: u16,
    groups: Vec<CubeGroup>,
    by_key: HashMap<GroupKey, GroupId>,
}
impl Index<GroupId> for GroupTable {
    type Output = CubeGroup;

    fn index(&self, index: GroupId) -> &Self::Output {
        &self.groups[index.0 as usize]
    }
}
impl IndexMut<GroupId> for GroupTable {
    fn index_mut(&mut self, index: GroupId) -> &mut Self::Output {
        &mut self.groups[index.0 as usize]
    }
}
impl GroupTable {
    /// Builds the group table for a cube of the given order, where `existing`
    /// lists the slot indices of the cubelets visible from outside.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside the cube.
    pub fn new(order: u16, existing: impl IntoIterator<Item = usize>) -> Self {
        let n = order as usize;

        // Slot indices of each single layer, by axis and 0-indexed layer.
        let mut layers: [Vec<Vec<usize>>; 3] = std::array::from_fn(|_| vec![vec![]; n]);
        let mut blocks: HashMap<BlockType, Vec<usize>> = HashMap::new();
        for index in existing {
            assert!(index < n * n * n, "cubelet {index} is outside a cube of order {order}");
            let mut outer_faces = 0;
            for axis in Axis::iter() {
                let layer = axis.coordinate_of_index(index, n);
                if layer == 0 {
                    outer_faces += 1;
                }
                if layer == n - 1 {
                    outer_faces += 1;
                }
                layers[axis as usize][layer].push(index);
            }
            if let Some(block) = BlockType::from_outer_face_count(outer_faces) {
                blocks.entry(block).or_default().push(index);
            }
        }

        let mut table = Self {
            order,
            groups: vec![],
            by_key: HashMap::new(),
        };

        // Every contiguous range of layers on each positive axis.
        let mut ranges = HashMap::new();
        for axis in Axis::iter() {
            for from in 1..=order {
                for to in from..=order {
                    let indices: Arc<[usize]> = layers[axis as usize][from as usize - 1..to as usize]
                        .iter()
                        .flatten()
                        .copied()
                        .collect();
                    let range = LayerRange::new(from, to, order)
                        .unwrap_or_else(|| panic!("bad layer range {from}..={to}"));
                    ranges.insert((axis, range), Arc::clone(&indices));
                    let axis = SignedAxis::from(axis);
                    table.insert(
                        GroupKey::Layers { axis, range },
                        GroupAxis::Signed(axis),
                        indices,
                    );
                }
            }
        }

        for block in [BlockType::Center, BlockType::Edge, BlockType::Corner] {
            let indices = blocks.remove(&block).unwrap_or_default();
            table.insert(GroupKey::Block(block), GroupAxis::Diagonal, indices.into());
        }

        // Negative axes twist the same slots in the opposite direction.
        let shared = |axis: Axis, range: LayerRange| -> Arc<[usize]> {
            let indices = ranges
                .get(&(axis, range))
                .unwrap_or_else(|| panic!("missing group for layers {range} on axis {axis}"));
            Arc::clone(indices)
        };
        for axis in Axis::iter() {
            for from in 1..=order {
                for to in from..=order {
                    let range = LayerRange::new(from, to, order)
                        .unwrap_or_else(|| panic!("bad layer range {from}..={to}"));
                    let signed = axis.signed(Sign::Neg);
                    table.insert(
                        GroupKey::Layers {
                            axis: signed,
                            range,
                        },
                        GroupAxis::Signed(signed),
                        shared(axis, range),
                    );
                }
            }
        }

        // Whole-cube rotations.
        for axis in Axis::iter() {
            table.insert(
                GroupKey::Rotation(axis),
                GroupAxis::Signed(SignedAxis::from(axis)),
                shared(axis, LayerRange::all(order)),
            );
        }

        for sentinel in [Sentinel::Dot, Sentinel::Tilde] {
            table.insert(GroupKey::Sentinel(sentinel), GroupAxis::Diagonal, Arc::new([]));
        }

        log::debug!("built {} groups for order {order}", table.groups.len());
        table
    }

    fn insert(&mut self, key: GroupKey, axis: GroupAxis, indices: Arc<[usize]>) {
        let id = GroupId(self.groups.len() as u32);
        self.groups.push(CubeGroup::new(key, axis, indices));
        self.by_key.insert(key, id);
    }

    /// Returns the order of the cube.
    pub fn order(&self) -> u16 {
        self.order
    }

    /// Resolves notation (or a canonical key) to a group.
    pub fn get(&self, notation: &str) -> Option<GroupId> {
        self.get_key(notation::parse_notation(self.order, notation)?)
    }
    /// Returns the group with a canonical key.
    pub fn get_key(&self, key: GroupKey) -> Option<GroupId> {
        self.by_key.get(&key).copied()
    }
    /// Returns the group twisting the given layers about an axis.
    pub fn layers(&self, axis: SignedAxis, from: u16, to: u16) -> Option<GroupId> {
        let range = LayerRange::new(from, to, self.order)?;
        self.get_key(GroupKey::Layers { axis, range })
    }
    /// Returns the whole-cube rotation about a positive axis.
    pub fn rotation(&self, axis: Axis) -> Option<GroupId> {
        self.get_key(GroupKey::Rotation(axis))
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }
    /// Returns whether the table is empty, which it never is.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
    /// Returns an iterator over every group.
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &CubeGroup)> {
        (0..).map(GroupId).zip(&self.groups)
    }
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut CubeGroup> {
        self.groups.iter_mut()
    }
}
