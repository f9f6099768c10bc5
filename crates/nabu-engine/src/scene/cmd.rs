use crate::coords::Rect;
use crate::scene::Transform;
use crate::scene::shapes::bezier::BezierCmd;
use crate::scene::shapes::blur::BlurRectCmd;
use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::gradient::MeshGradientCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::path::PathCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::rounded_rect::RoundedRectCmd;
use crate::scene::shapes::text::GlyphCmd;

/// How a command's output combines with what is already on the target.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum BlendMode {
    /// Standard source-over alpha blending.
    #[default]
    Alpha,
    /// Additive; used for glows.
    Additive,
}

/// Backend-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Circle(CircleCmd),
    Line(LineCmd),
    Bezier(BezierCmd),
    TextGlyph(GlyphCmd),
    Path(PathCmd),
    PushTransform(Transform),
    PopTransform,
    PushClip(Rect),
    PopClip,
    BlurRect(BlurRectCmd),
    MeshGradient(MeshGradientCmd),
}

impl DrawCmd {
    /// Stack-manipulating commands carry no visuals of their own.
    #[inline]
    pub fn is_state_change(&self) -> bool {
        matches!(
            self,
            DrawCmd::PushTransform(_) | DrawCmd::PopTransform | DrawCmd::PushClip(_) | DrawCmd::PopClip
        )
    }
}

/// A single recorded command: common header + variant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub blend: BlendMode,
    pub cmd: DrawCmd,
}
