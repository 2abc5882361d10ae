use std::collections::VecDeque;
use std::sync::Arc;

use cuber_math::prelude::*;
use cuber_prefs::AnimationPreferences;
use web_time::Duration;

use crate::tween::{Tween, TweenFrame, Tweener};
use crate::{
    CUBELET_SIZE, CubeError, CubeGroup, Cubelet, CubeletId, Face, GroupAxis, GroupId, GroupTable,
    MAX_ORDER, MIN_ORDER, MoveLog, TwistAction,
};

/// Step of a queued move sequence.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Step {
    Reset,
    Twist { group: GroupId, angle: Float },
}

/// NxNxN cube.
///
/// Cubelets are stored in an arena indexed by [`CubeletId`]; `slots` maps
/// each grid position to the cubelet occupying it. At most one group may be
/// held at a time, and while a group is held the cube is locked.
#[derive(Debug, Clone)]
pub struct Cube {
    order: u16,
    cubelets: Vec<Cubelet>,
    slots: Vec<CubeletId>,
    groups: GroupTable,

    /// Group currently holding cubelets.
    lock: Option<GroupId>,
    solved: bool,

    tweener: Tweener,
    pending: VecDeque<Step>,
    log: MoveLog,

    animation_prefs: AnimationPreferences,
}

impl Cube {
    /// Constructs a solved cube.
    pub fn new(order: u16) -> Result<Self, CubeError> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(CubeError::OrderOutOfRange(order));
        }

        let cubelets = new_cubelets(order);
        let groups = GroupTable::new(
            order,
            cubelets.iter().filter(|c| c.exists()).map(|c| c.id().0),
        );

        Ok(Self {
            order,
            slots: cubelets.iter().map(|c| c.id()).collect(),
            cubelets,
            groups,

            lock: None,
            solved: true,

            tweener: Tweener::default(),
            pending: VecDeque::new(),
            log: MoveLog::new(),

            animation_prefs: cuber_prefs::DEFAULT_PREFS.animation.clone(),
        })
    }

    /// Replaces the animation preferences used for future twists.
    pub fn set_animation_prefs(&mut self, prefs: AnimationPreferences) {
        self.animation_prefs = prefs;
    }
    /// Returns the animation preferences used for twists.
    pub fn animation_prefs(&self) -> &AnimationPreferences {
        &self.animation_prefs
    }

    /// Returns the number of layers along each axis.
    pub fn order(&self) -> u16 {
        self.order
    }
    /// Returns the width of the whole cube in world units.
    pub fn size(&self) -> Float {
        CUBELET_SIZE * 3.0
    }

    /// Returns every cubelet, indexed by ID.
    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }
    /// Returns a cubelet by ID.
    pub fn cubelet(&self, id: CubeletId) -> &Cubelet {
        &self.cubelets[id.0]
    }
    /// Returns the cubelet occupying a slot, or `None` if the slot index is
    /// outside the cube.
    pub fn slot(&self, index: usize) -> Option<&Cubelet> {
        Some(self.cubelet(*self.slots.get(index)?))
    }

    /// Returns the table of groups.
    pub fn groups(&self) -> &GroupTable {
        &self.groups
    }
    /// Returns a group by ID.
    pub fn group(&self, id: GroupId) -> &CubeGroup {
        &self.groups[id]
    }
    /// Resolves notation to a group.
    pub fn get(&self, notation: &str) -> Option<GroupId> {
        self.groups.get(notation)
    }
    /// Returns a handle for holding, twisting, and dropping a group.
    pub fn group_mut(&mut self, id: GroupId) -> GroupMut<'_> {
        GroupMut { cube: self, id }
    }

    /// Returns whether a group is held.
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }
    /// Returns the held group.
    pub fn held_group(&self) -> Option<GroupId> {
        self.lock
    }
    /// Returns whether a twist is animating or queued.
    pub fn is_animating(&self) -> bool {
        self.tweener.is_active() || !self.pending.is_empty()
    }
    /// Returns whether every face is a single color.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Returns the twists applied to the cube since it was constructed or
    /// reset.
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// Returns the displayed rotation of a cubelet, including the rotation of
    /// the group holding it.
    pub fn cubelet_rotation(&self, id: CubeletId) -> Quaternion<Float> {
        let cubelet = self.cubelet(id);
        match cubelet.holder() {
            Some(group) => self.groups[group].pose() * cubelet.orientation(),
            None => cubelet.orientation(),
        }
    }
    /// Returns the displayed position of the center of a cubelet in world
    /// units, including the rotation of the group holding it.
    pub fn cubelet_position(&self, id: CubeletId) -> Point3<Float> {
        let cubelet = self.cubelet(id);
        let v = cubelet.vector() * (self.size() / self.order as Float);
        let v = match cubelet.holder() {
            Some(group) => self.groups[group].pose().rotate_vector(v),
            None => v,
        };
        Point3::new(v.x, v.y, v.z)
    }

    /// Strips the sticker showing on `face` of the cubelet in a slot, or
    /// restores it if it is already stripped. `face` is the side of the cube
    /// the sticker faces now, not the one it started on.
    ///
    /// Returns the face the sticker started on, or `None` if there is no
    /// sticker there.
    pub fn toggle_strip(&mut self, index: usize, face: Face) -> Option<Face> {
        let id = *self.slots.get(index)?;
        let cubelet = &mut self.cubelets[id.0];
        let original = cubelet.original_face(face);
        let stripped = cubelet.toggle_strip(original)?;
        log::debug!(
            "{} {} sticker of cubelet {}",
            if stripped { "stripped" } else { "restored" },
            original.name(),
            id.0,
        );
        Some(original)
    }

    /// Restores the solved state, abandoning any held group, animation,
    /// queued twists, and the move log. Stripped stickers stay stripped.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.restore();
        self.log.clear();
    }
    fn restore(&mut self) {
        self.tweener.cancel();
        for cubelet in &mut self.cubelets {
            cubelet.restore(self.order);
        }
        self.slots = self.cubelets.iter().map(|c| c.id()).collect();
        for group in self.groups.iter_mut() {
            group.reset();
        }
        self.lock = None;
        self.solved = true;
        log::debug!("reset cube of order {}", self.order);
    }

    /// Steps animation forward, starting the next queued twist when the cube
    /// is free. Returns whether anything changed.
    pub fn update(&mut self, delta: Duration) -> bool {
        let interpolate = self.animation_prefs.twist_interpolation;
        if let Some(frame) = self.tweener.proceed(delta, interpolate) {
            self.apply_frame(frame);
            return true;
        }
        if self.lock.is_none() {
            if let Some(step) = self.pending.pop_front() {
                self.run_step(step);
                return true;
            }
        }
        false
    }

    /// Speeds up the in-flight twist animation.
    pub fn speedup(&mut self) {
        self.tweener.speedup(self.animation_prefs.speedup_factor);
    }

    /// Completes the in-flight twist animation, then applies every queued
    /// twist immediately unless a group is held.
    pub fn finish(&mut self) {
        self.finish_tween();
        while self.lock.is_none() {
            let Some(step) = self.pending.pop_front() else {
                break;
            };
            self.run_step(step);
            self.finish_tween();
        }
    }

    /// Applies a whitespace-separated move sequence immediately.
    ///
    /// Each token is a group in any notation accepted by
    /// [`GroupTable::get()`], optionally followed by a number of quarter
    /// turns and `'` for counterclockwise, such as `R`, `U2`, or `2-3Rw'`.
    /// The token `#` resets the cube and clears the move log.
    ///
    /// Nothing is applied if any token is unrecognized or a group is held.
    pub fn apply_sequence(&mut self, sequence: &str) -> Result<(), CubeError> {
        if let Some(holder) = self.lock {
            return Err(CubeError::Locked(self.groups[holder].key()));
        }
        let steps = self.parse_sequence(sequence)?;
        self.finish();
        self.pending.extend(steps);
        self.finish();
        Ok(())
    }

    /// Queues a whitespace-separated move sequence to be animated one twist
    /// at a time by [`Cube::update()`]. See [`Cube::apply_sequence()`] for
    /// the syntax.
    ///
    /// Queued twists wait while a group is held.
    pub fn queue_sequence(&mut self, sequence: &str) -> Result<(), CubeError> {
        let steps = self.parse_sequence(sequence)?;
        self.pending.extend(steps);
        Ok(())
    }

    fn parse_sequence(&self, sequence: &str) -> Result<Vec<Step>, CubeError> {
        sequence
            .split_whitespace()
            .map(|token| {
                if token == "#" {
                    return Ok(Step::Reset);
                }
                let action = token.parse::<TwistAction>()?;
                let group = self
                    .get(&action.notation)
                    .ok_or_else(|| CubeError::UnknownNotation(token.to_owned()))?;
                let angle = action.quarter_turns() as Float * QUARTER_TURN;
                Ok(Step::Twist { group, angle })
            })
            .collect()
    }

    fn run_step(&mut self, step: Step) {
        match step {
            Step::Reset => {
                self.restore();
                self.log.clear();
            }
            Step::Twist { group, angle } => {
                if let Err(e) = self.twist_group(group, Some(angle)) {
                    log::warn!("skipping queued twist: {e}");
                }
            }
        }
    }

    fn apply_frame(&mut self, frame: TweenFrame) {
        self.groups[frame.group].angle = frame.angle;
        if frame.done {
            self.drop_group(frame.group);
        }
    }

    fn finish_tween(&mut self) {
        if let Some(frame) = self.tweener.finish() {
            self.apply_frame(frame);
        }
    }

    fn hold_group(&mut self, id: GroupId) -> Result<(), CubeError> {
        match self.lock {
            Some(holder) if holder == id => return Ok(()),
            Some(holder) => return Err(CubeError::Locked(self.groups[holder].key())),
            None => (),
        }

        let indices = Arc::clone(self.groups[id].indices());
        let mut members = Vec::with_capacity(indices.len());
        for &index in indices.iter() {
            let cubelet = &mut self.cubelets[self.slots[index].0];
            if cubelet.exists() {
                cubelet.set_holder(Some(id));
                members.push(cubelet.id());
            }
        }

        let group = &mut self.groups[id];
        group.members = members;
        group.angle = 0.0;
        group.held = true;
        self.lock = Some(id);
        log::trace!("held group {}", group.key());
        Ok(())
    }

    fn drop_group(&mut self, id: GroupId) {
        let order = self.order;
        let group = &mut self.groups[id];
        if !group.held {
            return;
        }

        let angle = snap_to_quarter_turns(group.angle);
        let turns = quarter_turns(angle);
        let axis = match group.axis() {
            GroupAxis::Signed(axis) if turns != 0 => Some(axis.vector()),
            _ => None,
        };
        while let Some(member) = group.members.pop() {
            let cubelet = &mut self.cubelets[member.0];
            if let Some(axis) = axis {
                cubelet.rotate(axis, angle);
            }
            cubelet.set_holder(None);
            self.slots[cubelet.index(order)] = member;
        }
        group.angle = 0.0;
        group.held = false;
        log::trace!("dropped group {} after {turns} quarter turns", group.key());

        if self.lock == Some(id) {
            self.lock = None;
        }
        if axis.is_some() {
            self.reindex();
        }
    }

    fn twist_group(
        &mut self,
        id: GroupId,
        angle: Option<Float>,
    ) -> Result<Option<TwistAction>, CubeError> {
        self.finish_tween();
        if !self.groups[id].held {
            self.hold_group(id)?;
        }

        let current = self.groups[id].angle;
        let target = snap_to_quarter_turns(angle.unwrap_or(current));
        let turns = quarter_turns(target);

        let action = (turns != 0).then(|| {
            let action = self.groups[id].action(self.order, turns > 0, turns.unsigned_abs());
            self.log.record(action.clone());
            action
        });

        let delta = target - current;
        if delta == 0.0 {
            self.drop_group(id);
        } else {
            let duration = self.animation_prefs.twist_duration_for(delta / QUARTER_TURN);
            let tween = Tween {
                group: id,
                from: current,
                to: target,
                duration,
            };
            if let Some(frame) = self.tweener.tween(tween) {
                self.apply_frame(frame);
            }
        }
        Ok(action)
    }

    /// Rebuilds the slot map from cubelet positions and recomputes whether
    /// the cube is solved.
    fn reindex(&mut self) {
        for cubelet in &self.cubelets {
            self.slots[cubelet.index(self.order)] = cubelet.id();
        }

        let mut colors: [Option<Face>; 6] = [None; 6];
        self.solved = self.cubelets.iter().all(|cubelet| {
            cubelet.stickers().iter().all(|&sticker| {
                let facing = cubelet.sticker_facing(sticker);
                *colors[facing as usize].get_or_insert(sticker) == sticker
            })
        });
    }
}

fn new_cubelets(order: u16) -> Vec<Cubelet> {
    let n = order as usize;
    (0..n * n * n)
        .map(|i| Cubelet::new(CubeletId(i), order))
        .collect()
}

/// Handle to a group on a cube, used to run its hold/twist/drop lifecycle.
#[derive(Debug)]
pub struct GroupMut<'a> {
    cube: &'a mut Cube,
    id: GroupId,
}
impl GroupMut<'_> {
    /// Returns the ID of the group.
    pub fn id(&self) -> GroupId {
        self.id
    }
    /// Returns the group.
    pub fn group(&self) -> &CubeGroup {
        &self.cube.groups[self.id]
    }

    /// Returns the notation for twisting the group by `times` quarter turns,
    /// counterclockwise if `reverse` is true.
    pub fn action(&self, reverse: bool, times: u32) -> TwistAction {
        self.group().action(self.cube.order, reverse, times)
    }

    /// Takes the cubelets currently in the group's slots into the group and
    /// locks the cube. Holding the group that is already held does nothing.
    ///
    /// Returns an error if another group is held.
    pub fn hold(&mut self) -> Result<(), CubeError> {
        self.cube.hold_group(self.id)
    }

    /// Sets the displayed angle of the held group, in radians. Does nothing
    /// if the group is not held.
    pub fn set_angle(&mut self, angle: Float) {
        let group = &mut self.cube.groups[self.id];
        if group.held {
            group.angle = angle;
        }
    }

    /// Commits the group to the nearest multiple of a quarter turn from
    /// `angle` (or from its current angle if `None`), animating toward it.
    /// The group is held first if it is idle, and any in-flight animation is
    /// completed first.
    ///
    /// Returns the twist recorded in the move log, if the committed angle is
    /// nonzero.
    pub fn twist(&mut self, angle: Option<Float>) -> Result<Option<TwistAction>, CubeError> {
        self.cube.twist_group(self.id, angle)
    }

    /// Releases the group, rotating its cubelets by its angle rounded to the
    /// nearest quarter turn, writing them back to the slots they now occupy,
    /// and unlocking the cube. Does nothing if the group is not held.
    pub fn drop(self) {
        self.cube.drop_group(self.id);
    }
}
