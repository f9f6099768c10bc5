use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Circle draw payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub elevation: f32,
}

impl CircleCmd {
    #[inline]
    pub const fn new(center: Vec2, radius: f32, color: Color, elevation: f32) -> Self {
        Self { center, radius, color, elevation }
    }
}

impl DrawList {
    /// Records a circle draw command.
    #[inline]
    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: Color, elevation: f32) {
        self.push(DrawCmd::Circle(CircleCmd::new(center, radius, color, elevation)));
    }

    /// Records a flat solid circle.
    #[inline]
    pub fn push_solid_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push_circle(center, radius, color, 0.0);
    }
}
