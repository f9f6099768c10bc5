use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Cubic bezier stroke payload (node-graph wires).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BezierCmd {
    pub points: [Vec2; 4],
    pub thickness: f32,
    pub color: Color,
}

impl BezierCmd {
    /// Evaluates the curve at `t ∈ [0, 1]`.
    pub fn eval(&self, t: f32) -> Vec2 {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
    }
}

impl DrawList {
    #[inline]
    pub fn push_bezier(&mut self, points: [Vec2; 4], thickness: f32, color: Color) {
        self.push(DrawCmd::Bezier(BezierCmd { points, thickness, color }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_hits_endpoints() {
        let b = BezierCmd {
            points: [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0), Vec2::new(30.0, 10.0)],
            thickness: 1.0,
            color: Color::WHITE,
        };
        assert_eq!(b.eval(0.0), Vec2::new(0.0, 0.0));
        assert_eq!(b.eval(1.0), Vec2::new(30.0, 10.0));
    }
}
