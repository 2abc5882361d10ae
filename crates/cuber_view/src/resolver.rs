//! Pointer gestures that twist the cube.

use std::fmt;

use cgmath::ElementWise;
use cuber_core::{CUBELET_SIZE, Cube, Face, GroupAxis, GroupId};
use cuber_math::prelude::*;
use cuber_prefs::InteractionPreferences;
use float_ord::FloatOrd;
use web_time::Instant;

use crate::{PointerEvent, Viewport};

/// Angle of a twist per cubelet-width of pointer travel, before sensitivity.
const RADIANS_PER_CUBELET: Float = std::f32::consts::FRAC_PI_6;

/// Listener called with the struck slot index and face when the pointer is
/// released without dragging.
type TapListener = Box<dyn FnMut(usize, Face)>;

/// Progress of a pointer gesture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragState {
    /// Pointer is pressed but has not moved far enough to pick a group.
    Dragging,
    /// Pointer drag is rotating a group. The group is `None` if the cube
    /// refused to hold it.
    Rotating {
        /// Group being rotated.
        group: Option<GroupId>,
    },
}

/// Face of the cube struck by the pointer at the start of a gesture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Holder {
    /// Visible face whose plane was struck.
    pub plane: Face,
    /// Index of the struck slot.
    pub index: usize,
    /// Unit direction of the drag along the struck plane, signed by its
    /// cross product with the face normal. Zero until a group is matched.
    pub finger: Vector3<Float>,
}

/// State machine that turns pointer input into twists.
///
/// Pressing the pointer on one of the visible faces (`R`, `U`, or `F`) and
/// dragging along it twists the layer under the pointer. Dragging on the
/// background rotates the whole cube. Releasing the pointer commits the twist
/// to the nearest quarter turn, completing quick flicks to a full quarter
/// turn.
pub struct GestureResolver {
    prefs: InteractionPreferences,

    state: Option<DragState>,
    /// Live drag angle, which the displayed angle follows.
    angle: Float,
    lock: bool,
    disable: bool,

    down: Point2<f32>,
    current: Point2<f32>,
    start: Instant,
    holder: Option<Holder>,

    taps: Vec<TapListener>,
}
impl fmt::Debug for GestureResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureResolver")
            .field("prefs", &self.prefs)
            .field("state", &self.state)
            .field("angle", &self.angle)
            .field("lock", &self.lock)
            .field("disable", &self.disable)
            .field("down", &self.down)
            .field("current", &self.current)
            .field("holder", &self.holder)
            .finish_non_exhaustive()
    }
}
impl GestureResolver {
    /// Constructs an idle gesture resolver.
    pub fn new(prefs: InteractionPreferences) -> Self {
        Self {
            prefs,

            state: None,
            angle: 0.0,
            lock: false,
            disable: false,

            down: Point2::new(0.0, 0.0),
            current: Point2::new(0.0, 0.0),
            start: Instant::now(),
            holder: None,

            taps: vec![],
        }
    }

    /// Replaces the interaction preferences.
    pub fn set_prefs(&mut self, prefs: InteractionPreferences) {
        self.prefs = prefs;
    }
    /// Returns the interaction preferences.
    pub fn prefs(&self) -> &InteractionPreferences {
        &self.prefs
    }

    /// Returns the progress of the current gesture, or `None` if the pointer
    /// is released.
    pub fn state(&self) -> Option<DragState> {
        self.state
    }
    /// Returns the struck face of the current gesture, if any.
    pub fn holder(&self) -> Option<&Holder> {
        self.holder.as_ref()
    }
    /// Returns the live drag angle.
    pub fn angle(&self) -> Float {
        self.angle
    }

    /// Returns whether drags are prevented from committing twists.
    pub fn is_locked(&self) -> bool {
        self.lock
    }
    /// Sets whether drags are prevented from committing twists. Any gesture
    /// in progress is released first.
    pub fn set_lock(&mut self, cube: &mut Cube, lock: bool) {
        self.handle_up(cube, Instant::now());
        self.lock = lock;
    }

    /// Returns whether pointer presses are ignored.
    pub fn is_disabled(&self) -> bool {
        self.disable
    }
    /// Sets whether pointer presses are ignored. Any gesture in progress is
    /// released first.
    pub fn set_disable(&mut self, cube: &mut Cube, disable: bool) {
        self.handle_up(cube, Instant::now());
        self.disable = disable;
    }

    /// Registers a listener for taps, which are called with the struck slot
    /// index and face. Pass them to [`Cube::toggle_strip()`] to strip the
    /// tapped sticker.
    pub fn on_tap(&mut self, listener: impl FnMut(usize, Face) + 'static) {
        self.taps.push(Box::new(listener));
    }

    /// Handles pointer input. Returns whether the event was consumed.
    pub fn touch(&mut self, cube: &mut Cube, viewport: &impl Viewport, event: PointerEvent) -> bool {
        self.touch_at(cube, viewport, event, Instant::now())
    }

    /// Handles pointer input that happened at time `now`. Returns whether the
    /// event was consumed.
    pub fn touch_at(
        &mut self,
        cube: &mut Cube,
        viewport: &impl Viewport,
        event: PointerEvent,
        now: Instant,
    ) -> bool {
        let action = event.action;
        if action.is_down() {
            self.down = event.position;
            self.current = event.position;
            self.start = now;
            self.handle_down(cube, viewport, now);
        } else if action.is_move() {
            self.current = event.position;
            self.handle_move(cube, viewport);
        } else if action.is_up() {
            self.handle_up(cube, now);
        } else {
            return false;
        }
        true
    }

    /// Moves the displayed angle of the rotating group toward the live drag
    /// angle. Call once per frame. Returns whether anything changed.
    pub fn update(&mut self, cube: &mut Cube) -> bool {
        let Some(DragState::Rotating { group: Some(id) }) = self.state else {
            return false;
        };
        let current = cube.group(id).angle();
        if current == self.angle {
            return false;
        }
        let delta = (self.angle - current) * self.prefs.follow_factor;
        cube.group_mut(id).set_angle(current + delta);
        true
    }

    /// Returns the single-layer group that dragging along `finger` on the
    /// face `plane` at slot `index` would turn: the layer containing the slot
    /// along the axis perpendicular to both the face normal and the drag.
    pub fn match_group(cube: &Cube, plane: Face, finger: Vector3<Float>, index: usize) -> Option<GroupId> {
        let normal = plane.vector();
        let axis = Axis::iter().find(|axis| {
            let v = axis.unit_vec3();
            is_approx_perpendicular(v, normal) && is_approx_perpendicular(v, finger)
        })?;
        let layer = axis.coordinate_of_index(index, cube.order() as usize) as u16 + 1;
        cube.groups().layers(axis.into(), layer, layer)
    }

    fn handle_down(&mut self, cube: &mut Cube, viewport: &impl Viewport, now: Instant) {
        if self.disable {
            return;
        }
        if self.state.is_some() {
            self.handle_up(cube, now);
        }
        self.state = Some(DragState::Dragging);
        self.holder = None;
        self.angle = 0.0;
        cube.speedup();

        let Some(ray) = viewport.ray(self.down) else {
            return;
        };
        let half = cube.size() / 2.0;
        let struck = [Face::R, Face::U, Face::F]
            .into_iter()
            .filter_map(|face| {
                let point = ray.intersect_plane(&face_plane(face, half))?;
                let in_bounds = [point.x, point.y, point.z]
                    .iter()
                    .all(|c| c.abs() <= half + EPSILON);
                in_bounds.then_some((face, point))
            })
            .min_by_key(|(_, point)| FloatOrd((point - ray.origin).magnitude2()));

        if let Some((face, point)) = struck {
            let index = slot_index_at(point, cube.size(), cube.order() as usize);
            log::trace!("pointer struck face {face} at slot {index}");
            self.holder = Some(Holder {
                plane: face,
                index,
                finger: Vector3::new(0.0, 0.0, 0.0),
            });
        }
    }

    fn handle_move(&mut self, cube: &mut Cube, viewport: &impl Viewport) {
        if self.disable {
            return;
        }
        let dx = self.current.x - self.down.x;
        let dy = self.current.y - self.down.y;

        if self.state == Some(DragState::Dragging) {
            let distance = dx.hypot(dy);
            if !self.prefs.exceeds_drag_threshold(viewport.size(), distance) {
                return;
            }
            cube.finish();
            if cube.is_locked() {
                log::trace!("cube is busy; abandoning gesture");
                self.state = None;
                self.holder = None;
                return;
            }

            let mut group = self.struck_group(cube, viewport);
            if group.is_none() {
                // Background drag, or a drag that doesn't match any layer.
                self.holder = None;
                group = background_group(cube, viewport, self.down, dx, dy);
            }
            let group = group.filter(|&id| match cube.group_mut(id).hold() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("unable to rotate group: {e}");
                    false
                }
            });
            log::trace!("drag rotating {:?}", group.map(|id| cube.group(id).key()));
            self.state = Some(DragState::Rotating { group });
        }

        let Some(DragState::Rotating { group: Some(id) }) = self.state else {
            return;
        };
        let travel = match self.holder {
            Some(holder) => {
                let Some(drag) = plane_drag(viewport, holder.plane, cube.size(), self.down, self.current)
                else {
                    return;
                };
                let axis_sum = component_sum(cube.group(id).axis().vector());
                -component_sum(drag.mul_element_wise(holder.finger)) * axis_sum
            }
            None => match cube.group(id).axis() {
                GroupAxis::Signed(axis) => match axis.axis {
                    Axis::X => dy,
                    Axis::Y => dx,
                    Axis::Z => -dy,
                },
                GroupAxis::Diagonal => 0.0,
            },
        };
        self.angle = travel / CUBELET_SIZE * RADIANS_PER_CUBELET * self.prefs.drag_sensitivity;
    }

    /// Picks the layer under a struck face from the drag direction and
    /// records the signed finger direction.
    fn struck_group(&mut self, cube: &Cube, viewport: &impl Viewport) -> Option<GroupId> {
        let holder = self.holder.as_mut()?;
        let drag = plane_drag(viewport, holder.plane, cube.size(), self.down, self.current)?;

        let max = drag.x.abs().max(drag.y.abs()).max(drag.z.abs());
        let dominant = drag.map(|c| if c.abs() == max { c } else { 0.0 });
        let squared = dominant.mul_element_wise(dominant);
        if !is_approx_nonzero(&squared.magnitude2()) {
            return None;
        }
        let finger = squared.normalize();

        let group = Self::match_group(cube, holder.plane, finger, holder.index)?;
        holder.finger = finger * component_sum(finger.cross(holder.plane.vector()));
        Some(group)
    }

    fn handle_up(&mut self, cube: &mut Cube, now: Instant) {
        match self.state {
            Some(DragState::Dragging) => {
                if let Some(holder) = self.holder {
                    log::trace!("tap on face {} at slot {}", holder.plane, holder.index);
                    for tap in &mut self.taps {
                        tap(holder.index, holder.plane);
                    }
                }
            }
            Some(DragState::Rotating { group: Some(id) }) => {
                let angle = if self.lock {
                    0.0
                } else {
                    self.flick(now.saturating_duration_since(self.start).as_secs_f32())
                };
                if let Err(e) = cube.group_mut(id).twist(Some(angle)) {
                    log::warn!("unable to commit drag twist: {e}");
                }
            }
            Some(DragState::Rotating { group: None }) | None => (),
        }
        self.state = None;
        self.holder = None;
    }

    /// Returns the angle to commit for a drag that lasted `elapsed` seconds,
    /// completing short quick drags to a full quarter turn.
    fn flick(&self, elapsed: f32) -> Float {
        let angle = self.angle;
        if angle.abs() < QUARTER_TURN / 2.0 && angle != 0.0 {
            let speed = angle.abs() / elapsed;
            if speed > self.prefs.flick_speed_threshold {
                return QUARTER_TURN.copysign(angle);
            }
        }
        angle
    }
}

/// Returns the plane of a visible face of a cube whose half-width is `half`.
fn face_plane(face: Face, half: Float) -> Plane {
    Plane::new(face.vector(), -half)
}

/// Returns the index of the slot at a point on the surface of a cube.
fn slot_index_at(point: Point3<Float>, size: Float, order: usize) -> usize {
    let coordinate = |c: Float| {
        let i = ((c / size + 0.5) * order as Float).ceil() as i64 - 1;
        i.clamp(0, order as i64 - 1) as usize
    };
    (coordinate(point.z) * order + coordinate(point.y)) * order + coordinate(point.x)
}

/// Returns the vector between the points under two screen positions on the
/// plane of a face.
fn plane_drag(
    viewport: &impl Viewport,
    face: Face,
    size: Float,
    from: Point2<f32>,
    to: Point2<f32>,
) -> Option<Vector3<Float>> {
    let plane = face_plane(face, size / 2.0);
    let start = viewport.ray(from)?.intersect_plane(&plane)?;
    let end = viewport.ray(to)?.intersect_plane(&plane)?;
    Some(end - start)
}

/// Picks a whole-cube rotation for a drag on the background: horizontal
/// drags turn around `y`, and vertical drags turn around `x` on the left of
/// the cube and `z` on the right.
fn background_group(
    cube: &Cube,
    viewport: &impl Viewport,
    down: Point2<f32>,
    dx: f32,
    dy: f32,
) -> Option<GroupId> {
    let axis = if dx * dx > dy * dy {
        Axis::Y
    } else {
        let half = cube.size() / 2.0;
        let corner = viewport.project(Point3::new(half, 0.0, half));
        match corner {
            Some(corner) if down.x < corner.x.round() => Axis::X,
            _ => Axis::Z,
        }
    };
    cube.groups().rotation(axis)
}

fn component_sum(v: Vector3<Float>) -> Float {
    v.x + v.y + v.z
}
