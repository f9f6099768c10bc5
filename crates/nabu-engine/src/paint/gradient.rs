use crate::coords::Vec2;

use super::Color;

/// One control point of a mesh gradient.
///
/// `pos` is normalized to the destination rect (`0..=1` on both axes); `radius`
/// is the influence falloff in the same normalized units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientPoint {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl GradientPoint {
    #[inline]
    pub const fn new(pos: Vec2, radius: f32, color: Color) -> Self {
        Self { pos, radius, color }
    }
}

/// Mesh gradient stored in the draw list's gradient side table.
///
/// Backends blend the points by inverse-distance weighting within each point's radius.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGradient {
    pub points: Vec<GradientPoint>,
    /// Phase offset for animated backends, in seconds.
    pub time_offset: f32,
}

impl MeshGradient {
    pub fn new(points: Vec<GradientPoint>) -> Self {
        Self { points, time_offset: 0.0 }
    }

    /// Four-corner gradient: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(tl: Color, tr: Color, bl: Color, br: Color) -> Self {
        Self::new(vec![
            GradientPoint::new(Vec2::new(0.0, 0.0), 1.0, tl),
            GradientPoint::new(Vec2::new(1.0, 0.0), 1.0, tr),
            GradientPoint::new(Vec2::new(0.0, 1.0), 1.0, bl),
            GradientPoint::new(Vec2::new(1.0, 1.0), 1.0, br),
        ])
    }

    /// Returns true when the gradient is structurally usable by a backend.
    pub fn is_valid(&self) -> bool {
        !self.points.is_empty()
            && self.time_offset.is_finite()
            && self
                .points
                .iter()
                .all(|p| p.pos.is_finite() && p.radius.is_finite() && p.radius > 0.0 && p.color.is_finite())
    }
}
