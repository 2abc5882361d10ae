//! Conversion between user-facing move notation and group keys.
//!
//! Every twistable group has a canonical key: `axis:from:to` for a contiguous
//! range of layers, a bare axis letter for whole-cube rotations, a block type
//! name, or one of the sentinels `.` and `~`. Layers are numbered from 1 to
//! `N` along each axis, starting from the negative side.
//!
//! User notation is resolved to keys with [`parse_notation()`], and a key plus
//! a direction is turned back into notation with [`format_action()`].

use std::fmt;
use std::str::FromStr;

use cuber_math::prelude::*;
use regex::Regex;

use crate::{Face, TwistAction};

/// Contiguous, non-empty range of layers along an axis, numbered from 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerRange {
    from: u16,
    to: u16,
}
impl fmt::Display for LayerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}
impl LayerRange {
    /// Constructs a layer range, or returns `None` if it is empty or extends
    /// outside a cube of the given order.
    pub fn new(from: u16, to: u16, order: u16) -> Option<Self> {
        (1 <= from && from <= to && to <= order).then_some(Self { from, to })
    }
    /// Constructs a layer range from two bounds given in either order.
    fn from_unordered(a: i32, b: i32, order: u16) -> Option<Self> {
        let from = u16::try_from(a.min(b)).ok()?;
        let to = u16::try_from(a.max(b)).ok()?;
        Self::new(from, to, order)
    }
    /// Returns the range containing every layer.
    pub fn all(order: u16) -> Self {
        Self { from: 1, to: order }
    }

    /// Returns the lowest layer in the range.
    pub fn from(self) -> u16 {
        self.from
    }
    /// Returns the highest layer in the range.
    pub fn to(self) -> u16 {
        self.to
    }
    /// Returns the number of layers in the range.
    pub fn len(self) -> u16 {
        self.to - self.from + 1
    }
    /// Returns whether the range contains `layer`.
    pub fn contains(self, layer: u16) -> bool {
        (self.from..=self.to).contains(&layer)
    }
    /// Returns whether the range covers every layer of a cube of the given
    /// order.
    pub fn is_all(self, order: u16) -> bool {
        self == Self::all(order)
    }
    /// Returns the same physical layers numbered from the opposite side.
    #[must_use]
    pub fn mirror(self, order: u16) -> Self {
        Self {
            from: order + 1 - self.to,
            to: order + 1 - self.from,
        }
    }
}

/// Category of cubelet, determined by how many outer faces it touches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockType {
    /// Cubelet with one outer face.
    Center,
    /// Cubelet with two outer faces.
    Edge,
    /// Cubelet with three outer faces.
    Corner,
}
impl BlockType {
    /// Returns the block type of a cubelet touching `count` outer faces.
    pub fn from_outer_face_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Center),
            2 => Some(Self::Edge),
            3 => Some(Self::Corner),
            _ => None,
        }
    }
    /// Returns the name used as a group key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Edge => "edge",
            Self::Corner => "corner",
        }
    }
}

/// Group that contains no cubelets and is only used as a marker in move
/// sequences.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentinel {
    /// `.`
    Dot,
    /// `~`
    Tilde,
}
impl Sentinel {
    /// Returns the symbol used as a group key.
    pub fn symbol(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Tilde => '~',
        }
    }
}

/// Canonical identifier of a group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// Contiguous range of layers, numbered from the negative side of the
    /// axis.
    Layers {
        /// Twist axis. Twisting rotates clockwise looking at the face this
        /// axis points toward.
        axis: SignedAxis,
        /// Layers in the group.
        range: LayerRange,
    },
    /// Whole-cube rotation about a positive axis.
    Rotation(Axis),
    /// Every cubelet of a block type.
    Block(BlockType),
    /// Empty marker group.
    Sentinel(Sentinel),
}
impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layers { axis, range } => write!(f, "{axis}:{range}"),
            Self::Rotation(axis) => write!(f, "{axis}"),
            Self::Block(block) => write!(f, "{}", block.name()),
            Self::Sentinel(sentinel) => write!(f, "{}", sentinel.symbol()),
        }
    }
}
impl FromStr for GroupKey {
    type Err = ();

    /// Parses a key without checking it against a particular cube order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => return Ok(Self::Rotation(Axis::X)),
            "y" => return Ok(Self::Rotation(Axis::Y)),
            "z" => return Ok(Self::Rotation(Axis::Z)),
            "center" => return Ok(Self::Block(BlockType::Center)),
            "edge" => return Ok(Self::Block(BlockType::Edge)),
            "corner" => return Ok(Self::Block(BlockType::Corner)),
            "." => return Ok(Self::Sentinel(Sentinel::Dot)),
            "~" => return Ok(Self::Sentinel(Sentinel::Tilde)),
            _ => (),
        }

        let mut parts = s.split(':');
        let axis = parts.next().ok_or(())?.parse::<SignedAxis>()?;
        let from = parse_layer(parts.next().ok_or(())?)?;
        let to = parse_layer(parts.next().ok_or(())?)?;
        if parts.next().is_some() || from == 0 || from > to {
            return Err(());
        }
        let range = LayerRange { from, to };
        Ok(Self::Layers { axis, range })
    }
}
impl GroupKey {
    /// Returns whether the key refers to a group that exists on a cube of the
    /// given order.
    pub fn is_valid_for(self, order: u16) -> bool {
        match self {
            Self::Layers { range, .. } => range.to <= order,
            Self::Rotation(_) | Self::Block(_) | Self::Sentinel(_) => true,
        }
    }
}

fn parse_layer(s: &str) -> Result<u16, ()> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(());
    }
    s.parse().map_err(|_| ())
}

/// Resolves a notation token to a group key on a cube of the given order.
///
/// Accepts, in order of precedence:
///
/// - canonical keys such as `x:1:2`, `-y:3:3`, `z`, or `corner`
/// - rotations `x`, `y`, `z` (also uppercase)
/// - faces `R`, `L`, `U`, `D`, `F`, `B`
/// - wide moves `r`, `Rw`, `RW`, `3Rw`, `2-3Rw`
/// - center slices `M`, `E`, `S` and inner slices `m`, `e`, `s`
/// - numbered layers `2R` and layer ranges `2-3R`, `2-3r`
///
/// Returns `None` if the token is not recognized or names layers outside the
/// cube.
pub fn parse_notation(order: u16, token: &str) -> Option<GroupKey> {
    if let Ok(key) = token.parse::<GroupKey>() {
        return key.is_valid_for(order).then_some(key);
    }

    let mut name = token.to_owned();
    if name.chars().skip(1).any(|c| matches!(c, 'w' | 'W')) {
        name = name.to_lowercase().replacen('w', "", 1);
    }
    if name.contains(['X', 'Y', 'Z']) {
        name = name.to_lowercase();
    }

    let mut chars = name.chars();
    match (chars.next()?, chars.next()) {
        (c, None) => parse_single_letter(order, c),
        _ => parse_layer_prefix(order, &name),
    }
}

fn parse_single_letter(order: u16, c: char) -> Option<GroupKey> {
    let n = order as i32;

    if let Some(axis) = Axis::from_symbol(c) {
        return Some(GroupKey::Rotation(axis));
    }

    if let Some(face) = Face::from_symbol(c) {
        // Outer layer for uppercase, outer two layers for lowercase.
        let depth = if c.is_ascii_uppercase() { 1 } else { 2 };
        return layers_from_face(order, face, 1, depth);
    }

    let face = Face::from_slice_symbol(c)?;
    let axis = face.signed_axis();
    let range = if c.is_ascii_uppercase() {
        // Center layer, or center two layers on even cubes.
        LayerRange::from_unordered((n + 1) / 2, (n + 2) / 2, order)?
    } else {
        // Every layer except the outer two.
        LayerRange::from_unordered(2, n - 1, order)?
    };
    Some(GroupKey::Layers { axis, range })
}

fn parse_layer_prefix(order: u16, name: &str) -> Option<GroupKey> {
    const LAYER_PREFIX_PATTERN: &str = r"^(\d*)(-?)(\d*)([LRUDFBlrudfb])$";
    // match the whole string           ^                               $
    // capture the first layer           (\d*)
    // then an optional hyphen                (-?)
    // then the last layer                        (\d*)
    // then the face letter                            ([LRUDFBlrudfb])

    lazy_static! {
        static ref LAYER_PREFIX_REGEX: Regex = Regex::new(LAYER_PREFIX_PATTERN).expect("bad regex");
    }

    let captures = LAYER_PREFIX_REGEX.captures(name)?;
    let number = |i: usize| -> Option<Option<i32>> {
        let s = captures.get(i).map_or("", |m| m.as_str());
        match s {
            "" => Some(None),
            _ => s.parse::<u16>().ok().map(|v| Some(v as i32)),
        }
    };
    let from = number(1)?.unwrap_or(0);
    let letter = name.chars().next_back()?;
    let face = Face::from_symbol(letter)?;
    let to = match number(3)?.filter(|&to| to != 0) {
        Some(to) => to,
        // Lowercase means "from the first layer up to the given one."
        None if letter.is_ascii_lowercase() => 1,
        None => from,
    };

    let n = order as i32;
    let (from, to) = match face.sign() {
        Sign::Neg => (from, to),
        Sign::Pos => (n - from + 1, n - to + 1),
    };
    let range = LayerRange::from_unordered(from, to, order)?;
    let axis = face.signed_axis();
    Some(GroupKey::Layers { axis, range })
}

fn layers_from_face(order: u16, face: Face, from: i32, to: i32) -> Option<GroupKey> {
    let n = order as i32;
    let (from, to) = match face.sign() {
        Sign::Neg => (from, to),
        Sign::Pos => (n - from + 1, n - to + 1),
    };
    let range = LayerRange::from_unordered(from, to, order)?;
    Some(GroupKey::Layers {
        axis: face.signed_axis(),
        range,
    })
}

/// Returns the notation for twisting the group with key `key` by `times`
/// quarter turns, counterclockwise if `reverse` is true.
///
/// The output is canonical: it always uses the shortest name, expressing the
/// layers from whichever side of the cube is nearer. Parsing the notation
/// returns a group with the same cubelets and, after accounting for the
/// direction of its axis, the same direction of twist.
pub fn format_action(order: u16, key: GroupKey, reverse: bool, times: u32) -> TwistAction {
    let action = |notation: String, reverse: bool| TwistAction {
        notation,
        reverse,
        times,
    };

    let GroupKey::Layers { axis, range } = key else {
        return action(key.to_string(), reverse);
    };

    // Work with doubled layer numbers so that the center is an integer.
    let n = order as i32;
    let center = n + 1;
    let distance = |layer: i32| (2 * layer - center).abs();

    // `outer` is the end of the range farthest from the center.
    let (mut outer, mut inner) = (range.from as i32, range.to as i32);
    if distance(outer) < distance(inner) {
        std::mem::swap(&mut outer, &mut inner);
    }

    // Name the layers from the side of the cube that the range is nearer.
    let mut axis = axis;
    let mut reverse = reverse;
    match axis.sign {
        Sign::Pos if 2 * outer < center => {
            axis = -axis;
            reverse = !reverse;
        }
        Sign::Neg if 2 * outer > center => {
            axis = -axis;
            reverse = !reverse;
        }
        _ => (),
    }
    if axis.sign == Sign::Pos {
        outer = n - outer + 1;
        inner = n - inner + 1;
    }

    let face = Face::from(axis);
    let (slice, primed) = face.slice();
    if outer == inner {
        if 2 * outer == center {
            action(slice.to_string(), reverse ^ primed)
        } else if outer == 1 {
            action(face.to_string(), reverse)
        } else {
            action(format!("{outer}{face}"), reverse)
        }
    } else if outer == 1 && inner == n {
        // Whole-cube rotations are named by the positive axis.
        action(axis.axis.to_string(), reverse ^ (axis.sign == Sign::Neg))
    } else if outer == 2 && inner == n - 1 {
        action(slice.to_ascii_lowercase().to_string(), reverse ^ primed)
    } else if outer == 1 {
        let depth = if inner > 2 { inner.to_string() } else { String::new() };
        action(format!("{depth}{face}w"), reverse)
    } else {
        action(format!("{outer}-{inner}{face}w"), reverse)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn layers(axis: &str, from: u16, to: u16) -> Option<GroupKey> {
        Some(GroupKey::Layers {
            axis: axis.parse().expect("bad axis"),
            range: LayerRange { from, to },
        })
    }

    #[test]
    fn test_parse_faces_and_slices() {
        assert_eq!(parse_notation(3, "R"), layers("x", 3, 3));
        assert_eq!(parse_notation(3, "L"), layers("-x", 1, 1));
        assert_eq!(parse_notation(3, "U"), layers("y", 3, 3));
        assert_eq!(parse_notation(3, "B"), layers("-z", 1, 1));
        assert_eq!(parse_notation(3, "M"), layers("-x", 2, 2));
        assert_eq!(parse_notation(3, "E"), layers("-y", 2, 2));
        assert_eq!(parse_notation(3, "S"), layers("z", 2, 2));
        assert_eq!(parse_notation(4, "M"), layers("-x", 2, 3));
        assert_eq!(parse_notation(5, "m"), layers("-x", 2, 4));
        assert_eq!(parse_notation(2, "m"), layers("-x", 1, 2));
        assert_eq!(parse_notation(3, "x"), Some(GroupKey::Rotation(Axis::X)));
        assert_eq!(parse_notation(3, "Y"), Some(GroupKey::Rotation(Axis::Y)));
    }

    #[test]
    fn test_parse_wide_moves() {
        for token in ["r", "Rw", "RW", "2Rw", "1-2Rw", "2r"] {
            assert_eq!(parse_notation(4, token), layers("x", 3, 4), "{token}");
        }
        assert_eq!(parse_notation(4, "l"), layers("-x", 1, 2));
        assert_eq!(parse_notation(5, "3Rw"), layers("x", 3, 5));
        assert_eq!(parse_notation(5, "2-3Rw"), layers("x", 3, 4));
        assert_eq!(parse_notation(5, "2-3r"), layers("x", 3, 4));
        assert_eq!(parse_notation(5, "3-2L"), layers("-x", 2, 3));
    }

    #[test]
    fn test_parse_numbered_layers() {
        assert_eq!(parse_notation(4, "2R"), layers("x", 3, 3));
        assert_eq!(parse_notation(4, "2L"), layers("-x", 2, 2));
        assert_eq!(parse_notation(4, "2-3R"), layers("x", 2, 3));
        assert_eq!(parse_notation(4, "2-0R"), layers("x", 3, 3));
        assert_eq!(parse_notation(4, "5R"), None);
        assert_eq!(parse_notation(4, "0R"), None);
        assert_eq!(parse_notation(4, "99999999R"), None);
    }

    #[test]
    fn test_parse_canonical_keys() {
        assert_eq!(parse_notation(3, "x:1:2"), layers("x", 1, 2));
        assert_eq!(parse_notation(3, "-z:3:3"), layers("-z", 3, 3));
        assert_eq!(
            parse_notation(3, "edge"),
            Some(GroupKey::Block(BlockType::Edge)),
        );
        assert_eq!(
            parse_notation(3, "~"),
            Some(GroupKey::Sentinel(Sentinel::Tilde)),
        );
        assert_eq!(parse_notation(3, "x:1:4"), None);
        assert_eq!(parse_notation(3, "x:2:1"), None);
        assert_eq!(parse_notation(3, "x:0:1"), None);
    }

    #[test]
    fn test_parse_garbage() {
        for token in ["", "Q", "RR", "R2", "-", "w", "x:1", "x:1:2:3", "2-3", "R'"] {
            assert_eq!(parse_notation(3, token), None, "{token:?}");
        }
    }

    #[test]
    fn test_format_action() {
        let fmt = |key: Option<GroupKey>, order, reverse| {
            format_action(order, key.expect("bad key"), reverse, 1).to_string()
        };
        assert_eq!(fmt(layers("x", 3, 3), 3, false), "R");
        assert_eq!(fmt(layers("-x", 3, 3), 3, false), "R'");
        assert_eq!(fmt(layers("-x", 1, 1), 3, true), "L'");
        assert_eq!(fmt(layers("x", 2, 2), 3, false), "M'");
        assert_eq!(fmt(layers("-x", 2, 2), 3, false), "M");
        assert_eq!(fmt(layers("z", 2, 2), 3, false), "S");
        assert_eq!(fmt(layers("x", 1, 3), 3, false), "x");
        assert_eq!(fmt(layers("-x", 1, 3), 3, false), "x'");
        assert_eq!(fmt(layers("x", 3, 4), 4, false), "Rw");
        assert_eq!(fmt(layers("x", 2, 4), 4, false), "3Rw");
        assert_eq!(fmt(layers("x", 2, 3), 4, false), "m'");
        assert_eq!(fmt(layers("x", 3, 3), 4, false), "2R");
        assert_eq!(fmt(layers("x", 2, 4), 5, false), "m'");
        assert_eq!(fmt(layers("x", 3, 4), 5, false), "2-3Rw");
        assert_eq!(fmt(layers("x", 3, 5), 5, false), "3Rw");
        assert_eq!(fmt(Some(GroupKey::Rotation(Axis::Y)), 3, true), "y'");
    }

    /// Returns every layer-range group key on a cube of the given order.
    fn all_layer_keys(order: u16) -> Vec<GroupKey> {
        SignedAxis::iter()
            .flat_map(|axis| {
                (1..=order).flat_map(move |from| {
                    (from..=order).map(move |to| GroupKey::Layers {
                        axis,
                        range: LayerRange { from, to },
                    })
                })
            })
            .collect()
    }

    /// Returns the positive axis and layers that a key twists, and whether
    /// twisting it forward is clockwise about the positive axis.
    fn physical_twist(order: u16, key: GroupKey, reverse: bool) -> (Axis, LayerRange, bool) {
        match key {
            GroupKey::Layers { axis, range } => match axis.sign {
                Sign::Pos => (axis.axis, range, reverse),
                Sign::Neg => (axis.axis, range, !reverse),
            },
            GroupKey::Rotation(axis) => (axis, LayerRange::all(order), reverse),
            other => panic!("unexpected key {other}"),
        }
    }

    #[test]
    fn test_format_then_parse_round_trip() {
        for order in 2..=7 {
            for key in all_layer_keys(order) {
                for reverse in [false, true] {
                    let formatted = format_action(order, key, reverse, 1);
                    let parsed = parse_notation(order, &formatted.notation)
                        .unwrap_or_else(|| panic!("cannot parse {formatted} for {key}"));
                    assert_eq!(
                        physical_twist(order, parsed, formatted.reverse),
                        physical_twist(order, key, reverse),
                        "{key} on order {order} formatted as {formatted}",
                    );
                }
            }
        }
    }

    proptest! {
        #[test]
        fn proptest_mirrored_ranges(order in 2_u16..=9, a in 1_u16..=9, b in 1_u16..=9) {
            let (from, to) = (a.min(b), a.max(b));
            prop_assume!(to <= order);
            let range = LayerRange::new(from, to, order).expect("valid range");
            prop_assert_eq!(range.mirror(order).mirror(order), range);
            prop_assert_eq!(range.mirror(order).len(), range.len());
            prop_assert_eq!(range.mirror(order).is_all(order), range.is_all(order));
            for layer in 1..=order {
                prop_assert_eq!(range.mirror(order).contains(order + 1 - layer), range.contains(layer));
            }
        }

        #[test]
        fn proptest_parse_never_escapes_cube(order in 2_u16..=9, token in "[0-9]{0,2}-?[0-9]{0,2}[LRUDFBlrudfbwMESmes]{1,2}") {
            if let Some(GroupKey::Layers { range, .. }) = parse_notation(order, &token) {
                prop_assert!(range.from() >= 1);
                prop_assert!(range.to() <= order);
            }
        }
    }
}
