//! Individual cubelets.

use cgmath::{One, Rad};
use cuber_math::prelude::*;
use smallvec::SmallVec;

use crate::{Face, GroupId};

/// Stable identifier for a cubelet, equal to the slot it occupies on a solved
/// cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeletId(pub usize);

/// One of the `N^3` unit cubes making up a cube.
///
/// Interior cubelets are tracked so that every slot is occupied, but they are
/// never added to a held group and never move.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubelet {
    id: CubeletId,
    exist: bool,
    /// Offset from the center of the cube, in layers.
    vector: Vector3<Float>,
    orientation: Quaternion<Float>,
    /// Faces of the solved cube on which this cubelet has a sticker.
    stickers: SmallVec<[Face; 3]>,
    /// Stickers that have been stripped, shown blank instead of colored.
    stripped: SmallVec<[Face; 3]>,
    holder: Option<GroupId>,
}

impl Cubelet {
    /// Constructs a cubelet at its solved position in a cube of the given
    /// order.
    pub fn new(id: CubeletId, order: u16) -> Self {
        let n = order as usize;
        let center = (order as Float - 1.0) / 2.0;
        let coords = Axis::iter().map(|axis| axis.coordinate_of_index(id.0, n));

        let mut vector = Vector3::new(0.0, 0.0, 0.0);
        let mut stickers = SmallVec::new();
        for (axis, coord) in Axis::iter().zip(coords) {
            vector[axis as usize] = coord as Float - center;
            if coord == 0 {
                stickers.push(Face::from(axis.signed(Sign::Neg)));
            }
            if coord == n - 1 {
                stickers.push(Face::from(axis.signed(Sign::Pos)));
            }
        }

        Self {
            id,
            exist: !stickers.is_empty(),
            vector,
            orientation: Quaternion::one(),
            stickers,
            stripped: SmallVec::new(),
            holder: None,
        }
    }

    /// Returns the cubelet to its solved position and orientation, keeping
    /// stripped stickers.
    pub(crate) fn restore(&mut self, order: u16) {
        let stripped = std::mem::take(&mut self.stripped);
        *self = Self::new(self.id, order);
        self.stripped = stripped;
    }

    /// Returns the ID of the cubelet.
    pub fn id(&self) -> CubeletId {
        self.id
    }
    /// Returns whether the cubelet is visible from outside the cube.
    pub fn exists(&self) -> bool {
        self.exist
    }
    /// Returns the offset of the cubelet from the center of the cube, in
    /// layers.
    pub fn vector(&self) -> Vector3<Float> {
        self.vector
    }
    /// Returns the rotation of the cubelet from its solved orientation.
    pub fn orientation(&self) -> Quaternion<Float> {
        self.orientation
    }
    /// Returns the faces on which the cubelet had stickers when solved.
    pub fn stickers(&self) -> &[Face] {
        &self.stickers
    }
    /// Returns the group currently holding the cubelet.
    pub fn holder(&self) -> Option<GroupId> {
        self.holder
    }
    pub(crate) fn set_holder(&mut self, holder: Option<GroupId>) {
        self.holder = holder;
    }

    /// Returns the index of the slot that the cubelet occupies.
    pub fn index(&self, order: u16) -> usize {
        let n = order as usize;
        let center = (order as Float - 1.0) / 2.0;
        [Axis::Z, Axis::Y, Axis::X]
            .into_iter()
            .fold(0, |acc, axis| acc * n + (self.vector[axis as usize] + center).round() as usize)
    }

    /// Returns the face that the sticker originally on `face` is now facing.
    pub fn sticker_facing(&self, face: Face) -> Face {
        Face::nearest(self.orientation.rotate_vector(face.vector()))
    }
    /// Returns the face whose sticker is now facing `facing`. This is the
    /// inverse of [`Cubelet::sticker_facing()`].
    pub fn original_face(&self, facing: Face) -> Face {
        Face::nearest(self.orientation.conjugate().rotate_vector(facing.vector()))
    }

    /// Returns whether the sticker originally on `face` has been stripped.
    pub fn is_stripped(&self, face: Face) -> bool {
        self.stripped.contains(&face)
    }
    /// Strips the sticker originally on `face`, or restores it if it is
    /// already stripped. Returns whether it is now stripped, or `None` if
    /// the cubelet has no sticker there.
    pub(crate) fn toggle_strip(&mut self, face: Face) -> Option<bool> {
        if !self.stickers.contains(&face) {
            return None;
        }
        match self.stripped.iter().position(|&f| f == face) {
            Some(i) => {
                self.stripped.swap_remove(i);
                Some(false)
            }
            None => {
                self.stripped.push(face);
                Some(true)
            }
        }
    }

    /// Rotates the cubelet about an axis through the center of the cube,
    /// snapping its position back onto the grid.
    pub(crate) fn rotate(&mut self, axis: Vector3<Float>, angle: Float) {
        let rotation = Quaternion::from_axis_angle(axis.normalize(), Rad(angle));
        self.orientation = (rotation * self.orientation).normalize();
        self.vector = snap_to_grid(rotation.rotate_vector(self.vector), self.vector);
    }
}

/// Rounds a rotated position to the nearest grid point. Coordinates are
/// either all integers or all half-integers, matching `original`.
fn snap_to_grid(v: Vector3<Float>, original: Vector3<Float>) -> Vector3<Float> {
    let offset = original.x - original.x.round();
    v.map(|x| (x - offset).round() + offset)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_strip_stickers() {
        let mut cubelet = Cubelet::new(CubeletId(26), 3);
        assert_eq!(cubelet.toggle_strip(Face::R), Some(true));
        assert!(cubelet.is_stripped(Face::R));
        assert!(!cubelet.is_stripped(Face::U));
        assert_eq!(cubelet.toggle_strip(Face::L), None);

        cubelet.rotate(Vector3::unit_y(), -QUARTER_TURN);
        assert!(cubelet.is_stripped(Face::R));
        cubelet.restore(3);
        assert_eq!(cubelet.index(3), 26);
        assert!(cubelet.is_stripped(Face::R));

        assert_eq!(cubelet.toggle_strip(Face::R), Some(false));
        assert!(!cubelet.is_stripped(Face::R));
    }

    #[test]
    fn test_cubelet_layout() {
        let corner = Cubelet::new(CubeletId(0), 3);
        assert!(corner.exists());
        assert_eq!(corner.vector(), Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(corner.stickers(), &[Face::L, Face::D, Face::B]);
        assert_eq!(corner.index(3), 0);

        let core = Cubelet::new(CubeletId(13), 3);
        assert!(!core.exists());
        assert!(core.stickers().is_empty());
        assert_eq!(core.index(3), 13);

        let edge = Cubelet::new(CubeletId(1), 2);
        assert_eq!(edge.vector(), Vector3::new(0.5, -0.5, -0.5));
        assert_eq!(edge.index(2), 1);
    }

    #[test]
    fn test_cubelet_index_is_z_major() {
        // Slot 7 on a 4x4x4 is x = 3, y = 1, z = 0.
        let cubelet = Cubelet::new(CubeletId(7), 4);
        assert_eq!(cubelet.vector(), Vector3::new(1.5, -0.5, -1.5));
        assert_eq!(cubelet.index(4), 7);

        for order in 2..=5 {
            let n = order as usize;
            for i in 0..n * n * n {
                assert_eq!(Cubelet::new(CubeletId(i), order).index(order), i);
            }
        }
    }

    #[test]
    fn test_cubelet_rotation() {
        // Down-left-back corner of a 3x3x3, rotated a quarter turn clockwise
        // about +x (looking at R), moves to the front.
        let mut cubelet = Cubelet::new(CubeletId(0), 3);
        cubelet.rotate(Vector3::unit_x(), -QUARTER_TURN);
        assert_eq!(cubelet.vector(), Vector3::new(-1.0, -1.0, 1.0));
        assert_eq!(cubelet.index(3), 18);
        assert_eq!(cubelet.sticker_facing(Face::D), Face::F);
        assert_eq!(cubelet.sticker_facing(Face::B), Face::D);
        assert_eq!(cubelet.sticker_facing(Face::L), Face::L);

        for face in [Face::D, Face::B, Face::L] {
            assert_eq!(cubelet.original_face(cubelet.sticker_facing(face)), face);
        }
        assert_eq!(cubelet.original_face(Face::F), Face::D);

        for _ in 0..3 {
            cubelet.rotate(Vector3::unit_x(), -QUARTER_TURN);
        }
        assert_eq!(cubelet.index(3), 0);
        assert_eq!(cubelet.sticker_facing(Face::D), Face::D);
    }
}
