use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{BlendMode, DrawCmd, DrawList};

use super::{Border, Glow};

/// Rounded rectangle draw payload.
///
/// This is the workhorse of widget backgrounds; every optional effect the
/// backend may render (squircle corners, border, glow, backdrop blur, wobble)
/// is carried here so one node background is one command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radius: f32,
    pub color: Color,
    pub elevation: f32,
    pub squircle: bool,
    pub border: Option<Border>,
    pub glow: Option<Glow>,
    /// Backdrop blur sigma; 0 = none.
    pub backdrop_blur: f32,
    /// Per-axis vertex wobble amplitude.
    pub wobble: Vec2,
}

impl RoundedRectCmd {
    #[inline]
    pub const fn new(rect: Rect, radius: f32, color: Color) -> Self {
        Self {
            rect,
            radius,
            color,
            elevation: 0.0,
            squircle: false,
            border: None,
            glow: None,
            backdrop_blur: 0.0,
            wobble: Vec2::ZERO,
        }
    }

    #[inline]
    pub const fn elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }

    #[inline]
    pub const fn squircle(mut self, squircle: bool) -> Self {
        self.squircle = squircle;
        self
    }

    #[inline]
    pub const fn border(mut self, border: Option<Border>) -> Self {
        self.border = border;
        self
    }

    #[inline]
    pub const fn glow(mut self, glow: Option<Glow>) -> Self {
        self.glow = glow;
        self
    }

    #[inline]
    pub const fn backdrop_blur(mut self, sigma: f32) -> Self {
        self.backdrop_blur = sigma;
        self
    }

    #[inline]
    pub const fn wobble(mut self, wobble: Vec2) -> Self {
        self.wobble = wobble;
        self
    }
}

impl DrawList {
    /// Records a rounded rectangle draw command.
    ///
    /// Commands carrying a glow are recorded with additive blending.
    #[inline]
    pub fn push_rounded_rect(&mut self, cmd: RoundedRectCmd) {
        let blend = if cmd.glow.is_some() { BlendMode::Additive } else { BlendMode::Alpha };
        self.push_with_blend(blend, DrawCmd::RoundedRect(cmd));
    }

    /// Records a flat rounded rectangle with no effects.
    #[inline]
    pub fn push_solid_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.push_rounded_rect(RoundedRectCmd::new(rect, radius, color));
    }
}
