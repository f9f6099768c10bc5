use crate::animation::SpringParams;
use crate::arena::DEFAULT_ARENA_CAPACITY;

/// Per-context settings.
///
/// ```rust,ignore
/// let config = Config::default().with_fixed_dt(1.0 / 60.0).with_disable_animation(true);
/// let mut cx = Context::new(config);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Byte budget of the frame arena.
    pub arena_capacity: usize,
    /// Transitions return their target and springs never integrate.
    pub disable_animation: bool,
    /// Deterministic mode: every frame advances time by exactly this much.
    pub fixed_dt: Option<f32>,
    /// Programmer bugs and arena exhaustion panic instead of degrading the frame.
    pub strict: bool,
    /// Outline every hit rectangle after the main traversal.
    pub show_debug_overlay: bool,
    /// Pixels scrolled per wheel line.
    pub scroll_speed: f32,
    /// Font size of nodes that do not set one.
    pub default_font_size: f32,
    pub spring: SpringParams,
    pub stiff_spring: SpringParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            disable_animation: false,
            fixed_dt: None,
            strict: cfg!(debug_assertions),
            show_debug_overlay: false,
            scroll_speed: 20.0,
            default_font_size: 14.0,
            spring: SpringParams::GENERAL,
            stiff_spring: SpringParams::STIFF,
        }
    }
}

impl Config {
    pub fn with_arena_capacity(mut self, bytes: usize) -> Self {
        self.arena_capacity = bytes;
        self
    }

    pub fn with_disable_animation(mut self, disable: bool) -> Self {
        self.disable_animation = disable;
        self
    }

    pub fn with_fixed_dt(mut self, dt: f32) -> Self {
        self.fixed_dt = Some(dt);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_debug_overlay(mut self, show: bool) -> Self {
        self.show_debug_overlay = show;
        self
    }

    pub fn with_scroll_speed(mut self, pixels_per_line: f32) -> Self {
        self.scroll_speed = pixels_per_line;
        self
    }

    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    pub fn with_springs(mut self, spring: SpringParams, stiff_spring: SpringParams) -> Self {
        self.spring = spring;
        self.stiff_spring = stiff_spring;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.arena_capacity, 1 << 20);
        assert!(!c.disable_animation);
        assert_eq!(c.fixed_dt, None);
        assert_eq!(c.scroll_speed, 20.0);
        assert_eq!(c.spring, SpringParams::new(150.0, 20.0, 1.0));
    }

    #[test]
    fn builders_chain() {
        let c = Config::default().with_fixed_dt(0.5).with_strict(false).with_arena_capacity(64);
        assert_eq!(c.fixed_dt, Some(0.5));
        assert!(!c.strict);
        assert_eq!(c.arena_capacity, 64);
    }
}
