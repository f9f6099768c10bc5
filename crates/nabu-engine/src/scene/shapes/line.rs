use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Straight line segment payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineCmd {
    pub p0: Vec2,
    pub p1: Vec2,
    pub thickness: f32,
    pub color: Color,
}

impl DrawList {
    #[inline]
    pub fn push_line(&mut self, p0: Vec2, p1: Vec2, thickness: f32, color: Color) {
        self.push(DrawCmd::Line(LineCmd { p0, p1, thickness, color }));
    }
}
