use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList};

/// Backdrop blur region payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BlurRectCmd {
    pub rect: Rect,
    /// Corner radius of the blurred region.
    pub radius: f32,
    /// Blur sigma in logical pixels.
    pub strength: f32,
}

impl DrawList {
    #[inline]
    pub fn push_blur_rect(&mut self, rect: Rect, radius: f32, strength: f32) {
        self.push(DrawCmd::BlurRect(BlurRectCmd { rect, radius, strength }));
    }
}
