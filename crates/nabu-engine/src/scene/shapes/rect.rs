use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Rectangle draw payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
    /// Drop-shadow elevation in logical pixels; 0 = flat.
    pub elevation: f32,
}

impl RectCmd {
    #[inline]
    pub const fn new(rect: Rect, color: Color, elevation: f32) -> Self {
        Self { rect, color, elevation }
    }
}

impl DrawList {
    /// Records a rectangle draw command.
    #[inline]
    pub fn push_rect(&mut self, rect: Rect, color: Color, elevation: f32) {
        self.push(DrawCmd::Rect(RectCmd::new(rect, color, elevation)));
    }

    /// Records a flat solid rectangle.
    #[inline]
    pub fn push_solid_rect(&mut self, rect: Rect, color: Color) {
        self.push_rect(rect, color, 0.0);
    }
}
