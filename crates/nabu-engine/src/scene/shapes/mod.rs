pub(crate) mod bezier;
pub(crate) mod blur;
pub(crate) mod circle;
pub(crate) mod gradient;
pub(crate) mod line;
pub(crate) mod path;
pub(crate) mod rect;
pub(crate) mod rounded_rect;
pub(crate) mod text;

pub use bezier::BezierCmd;
pub use blur::BlurRectCmd;
pub use circle::CircleCmd;
pub use gradient::MeshGradientCmd;
pub use line::LineCmd;
pub use path::{Path, PathCmd, PathVerb};
pub use rect::RectCmd;
pub use rounded_rect::RoundedRectCmd;
pub use text::{GlyphCmd, GlyphRun, UvRect};

use crate::paint::Color;

/// Stroke drawn along the outer edge of a shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Soft outer glow around a shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glow {
    pub strength: f32,
    pub color: Color,
}

impl Glow {
    #[inline]
    pub const fn new(strength: f32, color: Color) -> Self {
        Self { strength, color }
    }
}
