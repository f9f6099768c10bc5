use crate::coords::{Rect, Vec2};

/// Uniform-scale + translate transform: `p' = p * scale + translate`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform { translate: Vec2::ZERO, scale: 1.0 };

    #[inline]
    pub const fn new(translate: Vec2, scale: f32) -> Self {
        Self { translate, scale }
    }

    #[inline]
    pub const fn translation(translate: Vec2) -> Self {
        Self { translate, scale: 1.0 }
    }

    /// Composes a child transform pushed on top of `self`.
    ///
    /// The child maps local points into `self`'s space, so the result is
    /// `self(child(p))`: the child's translation is scaled by the current scale.
    #[inline]
    pub fn then(self, child: Transform) -> Transform {
        Transform {
            translate: self.translate + child.translate * self.scale,
            scale: self.scale * child.scale,
        }
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        p * self.scale + self.translate
    }

    #[inline]
    pub fn apply_rect(self, r: Rect) -> Rect {
        r.transform(self.translate, self.scale)
    }

    /// Maps a screen point back into local space. Degenerate scales map to the origin.
    #[inline]
    pub fn invert(self, p: Vec2) -> Vec2 {
        if self.scale.abs() <= f32::EPSILON {
            return Vec2::ZERO;
        }
        (p - self.translate) / self.scale
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_composition_is_child() {
        let c = Transform::new(Vec2::new(3.0, 4.0), 2.0);
        assert_eq!(Transform::IDENTITY.then(c), c);
    }

    #[test]
    fn nested_translation_is_scaled_by_parent() {
        let parent = Transform::new(Vec2::new(10.0, 10.0), 2.0);
        let child = Transform::translation(Vec2::new(5.0, 0.0));
        let t = parent.then(child);
        assert_eq!(t.translate, Vec2::new(20.0, 10.0));
        assert_eq!(t.scale, 2.0);
        // Same as applying child first, then parent.
        let p = Vec2::new(1.0, 1.0);
        assert_eq!(t.apply(p), parent.apply(child.apply(p)));
    }

    #[test]
    fn invert_round_trips_points() {
        let t = Transform::new(Vec2::new(-7.0, 3.0), 0.5);
        let p = Vec2::new(42.0, -8.0);
        assert_eq!(t.invert(t.apply(p)), p);
    }
}
