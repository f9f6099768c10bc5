//! Springs and per-element transitions.
//!
//! Every animated property of an element is a 4-vector spring keyed by
//! `element id × property slot`. Builders and emission call
//! [`Animations::transition`] with this frame's target and read back the
//! current value; [`Animations::step_all`] advances the physics once per frame
//! after emission.

use std::collections::HashMap;

use nabu_engine::paint::Color;

use crate::id::Id;

/// Components closer than this to the target, moving slower than this, are settled.
pub const SETTLE_EPSILON: f32 = 1e-3;

/// Stiffness / damping / mass tuple.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringParams {
    /// General purpose: colors, positions, openness.
    pub const GENERAL: SpringParams = SpringParams::new(150.0, 20.0, 1.0);
    /// Snappy: press feedback.
    pub const STIFF: SpringParams = SpringParams::new(300.0, 26.0, 1.0);

    #[inline]
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self { stiffness, damping, mass }
    }

    /// `damping² ≥ 4·stiffness·mass`: the spring never overshoots.
    #[inline]
    pub fn is_overdamped(self) -> bool {
        self.damping * self.damping >= 4.0 * self.stiffness * self.mass
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::GENERAL
    }
}

/// Property slots mixed into the element id to form an animation key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u64)]
pub enum Slot {
    Background = 1,
    Foreground = 2,
    Scale = 3,
    Position = 4,
    Openness = 5,
    Highlight = 6,
}

impl Slot {
    #[inline]
    pub fn key(self, id: Id) -> Id {
        id.mix(0x5107_0000 | self as u64)
    }
}

/// One semi-implicit Euler spring over four components.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spring {
    pub current: [f32; 4],
    pub target: [f32; 4],
    pub velocity: [f32; 4],
    pub params: SpringParams,
    pub active: bool,
}

impl Spring {
    /// A spring resting at `value`.
    pub fn at_rest(value: [f32; 4], params: SpringParams) -> Self {
        Self { current: value, target: value, velocity: [0.0; 4], params, active: false }
    }

    pub fn set_target(&mut self, target: [f32; 4]) {
        if target != self.target {
            self.target = target;
            self.active = true;
        }
    }

    pub fn is_settled(&self) -> bool {
        (0..4).all(|i| {
            (self.current[i] - self.target[i]).abs() < SETTLE_EPSILON && self.velocity[i].abs() < SETTLE_EPSILON
        })
    }

    /// Advances by `dt` seconds. A settled spring snaps to its target and goes idle.
    pub fn step(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let SpringParams { stiffness, damping, mass } = self.params;
        let mass = if mass > 0.0 { mass } else { 1.0 };
        for i in 0..4 {
            let force = -stiffness * (self.current[i] - self.target[i]) - damping * self.velocity[i];
            self.velocity[i] += force / mass * dt;
            self.current[i] += self.velocity[i] * dt;
        }
        if self.is_settled() || !self.current.iter().all(|c| c.is_finite()) {
            self.current = self.target;
            self.velocity = [0.0; 4];
            self.active = false;
        }
    }
}

/// Persistent spring records keyed by element id × slot.
#[derive(Debug, Default, Clone)]
pub struct Animations {
    springs: HashMap<Id, Spring>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets this frame's target for `key` and returns the value to paint.
    ///
    /// First sight of a key starts at rest on the target. With `disabled`
    /// the target is returned exactly and the record is pinned to it.
    pub fn transition(&mut self, key: Id, target: [f32; 4], params: SpringParams, disabled: bool) -> [f32; 4] {
        let spring = self.springs.entry(key).or_insert_with(|| Spring::at_rest(target, params));
        spring.params = params;
        if disabled {
            *spring = Spring::at_rest(target, params);
            return target;
        }
        spring.set_target(target);
        spring.current
    }

    pub fn transition_f32(&mut self, key: Id, target: f32, params: SpringParams, disabled: bool) -> f32 {
        self.transition(key, [target, 0.0, 0.0, 0.0], params, disabled)[0]
    }

    pub fn transition_color(&mut self, key: Id, target: Color, params: SpringParams, disabled: bool) -> Color {
        Color::from_array(self.transition(key, target.to_array(), params, disabled))
    }

    /// Advances every active spring. Returns how many are still moving.
    pub fn step_all(&mut self, dt: f32) -> usize {
        let mut moving = 0;
        for spring in self.springs.values_mut().filter(|s| s.active) {
            spring.step(dt);
            moving += spring.active as usize;
        }
        moving
    }

    #[inline]
    pub fn get(&self, key: Id) -> Option<&Spring> {
        self.springs.get(&key)
    }

    pub fn active_count(&self) -> usize {
        self.springs.values().filter(|s| s.active).count()
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }
}
