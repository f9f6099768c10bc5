use thiserror::Error;

use crate::coords::Rect;
use crate::paint::MeshGradient;

use super::shapes::{GlyphRun, Path};
use super::{BlendMode, DrawCmd, DrawItem, Transform};

/// Structural problems detected by [`DrawList::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawListError {
    #[error("pop_transform at item {index} without a matching push_transform")]
    TransformUnderflow { index: usize },
    #[error("pop_clip at item {index} without a matching push_clip")]
    ClipUnderflow { index: usize },
    #[error("{open} push_transform(s) never popped")]
    UnclosedTransform { open: usize },
    #[error("{open} push_clip(s) never popped")]
    UnclosedClip { open: usize },
    #[error("item {index} references side-table entry {entry} which does not exist")]
    DanglingIndex { index: usize, entry: u32 },
}

/// Per-kind command counts, used by frame reports and tests.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub shapes: usize,
    pub glyphs: usize,
    pub transforms: usize,
    pub clips: usize,
}

/// Recorded draw stream for a frame.
///
/// Commands are kept in insertion order, which is paint order: later
/// commands draw over earlier ones.
///
/// # Clipping and transforms
///
/// [`push_clip`] / [`pop_clip`] and [`push_transform`] / [`pop_transform`]
/// record stack commands and maintain the effective state. Transforms compose
/// with their parent; clip rects are mapped to screen space and intersected
/// with the parent clip, so nested scroll containers work correctly.
///
/// ```ignore
/// draw_list.push_clip(scroll_viewport);
/// draw_list.push_transform(Transform::translation(-offset));
/// // ... children ...
/// draw_list.pop_transform();
/// draw_list.pop_clip();
/// ```
///
/// [`push_clip`]: DrawList::push_clip
/// [`pop_clip`]: DrawList::pop_clip
/// [`push_transform`]: DrawList::push_transform
/// [`pop_transform`]: DrawList::pop_transform
#[derive(Debug, Default)]
pub struct DrawList {
    pub(crate) items: Vec<DrawItem>,
    pub(crate) paths: Vec<Path>,
    pub(crate) gradients: Vec<MeshGradient>,
    pub(crate) glyph_runs: Vec<GlyphRun>,

    /// Effective transforms; the top is already composed with every parent.
    transform_stack: Vec<Transform>,
    /// Effective clip rects in screen space; the top is already intersected with every parent.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears commands, side tables and stacks. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.paths.clear();
        self.gradients.clear();
        self.glyph_runs.clear();
        self.transform_stack.clear();
        self.clip_stack.clear();
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[inline]
    pub fn gradients(&self) -> &[MeshGradient] {
        &self.gradients
    }

    #[inline]
    pub fn glyph_runs(&self) -> &[GlyphRun] {
        &self.glyph_runs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the bare commands in paint order.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCmd> {
        self.items.iter().map(|i| &i.cmd)
    }

    /// Records a command with default (alpha) blending.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.push_with_blend(BlendMode::Alpha, cmd);
    }

    #[inline]
    pub fn push_with_blend(&mut self, blend: BlendMode, cmd: DrawCmd) {
        self.items.push(DrawItem { blend, cmd });
    }

    // ── transform stack ───────────────────────────────────────────────────

    /// Begins a transformed region. Calls must be balanced with [`pop_transform`](Self::pop_transform).
    pub fn push_transform(&mut self, local: Transform) {
        let effective = self.current_transform().then(local);
        self.transform_stack.push(effective);
        self.push(DrawCmd::PushTransform(local));
    }

    /// Ends the most recent transformed region.
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_transform`.
    pub fn pop_transform(&mut self) {
        debug_assert!(!self.transform_stack.is_empty(), "pop_transform called without matching push_transform");
        if self.transform_stack.pop().is_some() {
            self.push(DrawCmd::PopTransform);
        }
    }

    /// The composed transform currently in effect (identity at depth 0).
    #[inline]
    pub fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    #[inline]
    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    // ── clip stack ────────────────────────────────────────────────────────

    /// Begins a scissor region. `rect` is in the current (transformed) space.
    ///
    /// Calls must be balanced with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        let screen = self.current_transform().apply_rect(rect.normalized());
        let effective = match self.clip_stack.last() {
            None => screen,
            // No overlap yields a zero-area rect so backends skip the region.
            Some(&parent) => screen.clip_to(parent),
        };
        self.clip_stack.push(effective);
        self.push(DrawCmd::PushClip(rect));
    }

    /// Ends the most recent scissor region started by [`push_clip`](Self::push_clip).
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_clip`.
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        if self.clip_stack.pop().is_some() {
            self.push(DrawCmd::PopClip);
        }
    }

    /// The effective clip in screen space, if any.
    #[inline]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    #[inline]
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    // ── validation ────────────────────────────────────────────────────────

    /// Checks that every push has exactly one matching pop, the stack depth
    /// never drops below zero, and every side-table reference resolves.
    pub fn validate(&self) -> Result<(), DrawListError> {
        let mut transforms = 0usize;
        let mut clips = 0usize;

        for (index, item) in self.items.iter().enumerate() {
            match &item.cmd {
                DrawCmd::PushTransform(_) => transforms += 1,
                DrawCmd::PopTransform => {
                    transforms = transforms
                        .checked_sub(1)
                        .ok_or(DrawListError::TransformUnderflow { index })?;
                }
                DrawCmd::PushClip(_) => clips += 1,
                DrawCmd::PopClip => {
                    clips = clips.checked_sub(1).ok_or(DrawListError::ClipUnderflow { index })?;
                }
                DrawCmd::Path(p) if p.index as usize >= self.paths.len() => {
                    return Err(DrawListError::DanglingIndex { index, entry: p.index });
                }
                DrawCmd::MeshGradient(g) if g.gradient as usize >= self.gradients.len() => {
                    return Err(DrawListError::DanglingIndex { index, entry: g.gradient });
                }
                _ => {}
            }
        }

        if transforms != 0 {
            return Err(DrawListError::UnclosedTransform { open: transforms });
        }
        if clips != 0 {
            return Err(DrawListError::UnclosedClip { open: clips });
        }
        Ok(())
    }

    pub fn stats(&self) -> DrawStats {
        let mut s = DrawStats::default();
        for cmd in self.commands() {
            match cmd {
                DrawCmd::TextGlyph(_) => s.glyphs += 1,
                DrawCmd::PushTransform(_) => s.transforms += 1,
                DrawCmd::PushClip(_) => s.clips += 1,
                DrawCmd::PopTransform | DrawCmd::PopClip => {}
                _ => s.shapes += 1,
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn items_keep_insertion_order() {
        let mut dl = DrawList::new();
        dl.push_solid_rect(r(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        dl.push_solid_circle(Vec2::new(5.0, 5.0), 2.0, Color::WHITE);
        assert!(matches!(dl.items()[0].cmd, DrawCmd::Rect(_)));
        assert!(matches!(dl.items()[1].cmd, DrawCmd::Circle(_)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut dl = DrawList::new();
        dl.push_clip(r(0.0, 0.0, 10.0, 10.0));
        dl.push_mesh_gradient(r(0.0, 0.0, 1.0, 1.0), MeshGradient::default());
        dl.clear();
        assert!(dl.is_empty());
        assert!(dl.gradients().is_empty());
        assert_eq!(dl.clip_depth(), 0);
    }

    // ── clip ──────────────────────────────────────────────────────────────

    #[test]
    fn nested_clips_intersect() {
        let mut dl = DrawList::new();
        dl.push_clip(r(0.0, 0.0, 100.0, 100.0));
        dl.push_clip(r(50.0, 50.0, 100.0, 100.0));
        assert_eq!(dl.current_clip(), Some(r(50.0, 50.0, 50.0, 50.0)));
        dl.pop_clip();
        assert_eq!(dl.current_clip(), Some(r(0.0, 0.0, 100.0, 100.0)));
        dl.pop_clip();
        assert_eq!(dl.current_clip(), None);
    }

    #[test]
    fn disjoint_clip_is_zero_area() {
        let mut dl = DrawList::new();
        dl.push_clip(r(0.0, 0.0, 10.0, 10.0));
        dl.push_clip(r(50.0, 50.0, 10.0, 10.0));
        assert!(dl.current_clip().is_some_and(|c| c.is_empty()));
    }

    #[test]
    fn clip_is_mapped_through_current_transform() {
        let mut dl = DrawList::new();
        dl.push_transform(Transform::new(Vec2::new(10.0, 0.0), 2.0));
        dl.push_clip(r(0.0, 0.0, 5.0, 5.0));
        assert_eq!(dl.current_clip(), Some(r(10.0, 0.0, 10.0, 10.0)));
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[test]
    fn transforms_compose_and_unwind() {
        let mut dl = DrawList::new();
        dl.push_transform(Transform::new(Vec2::new(10.0, 20.0), 2.0));
        dl.push_transform(Transform::new(Vec2::new(1.0, 1.0), 0.5));
        let t = dl.current_transform();
        assert_eq!(t.translate, Vec2::new(12.0, 22.0));
        assert_eq!(t.scale, 1.0);
        dl.pop_transform();
        dl.pop_transform();
        assert!(dl.current_transform().is_identity());
        assert_eq!(dl.transform_depth(), 0);
    }

    // ── validate ──────────────────────────────────────────────────────────

    #[test]
    fn balanced_list_validates() {
        let mut dl = DrawList::new();
        dl.push_clip(r(0.0, 0.0, 10.0, 10.0));
        dl.push_transform(Transform::translation(Vec2::new(0.0, -5.0)));
        dl.push_solid_rect(r(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        dl.pop_transform();
        dl.pop_clip();
        assert_eq!(dl.validate(), Ok(()));
    }

    #[test]
    fn unclosed_clip_is_reported() {
        let mut dl = DrawList::new();
        dl.push_clip(r(0.0, 0.0, 10.0, 10.0));
        assert_eq!(dl.validate(), Err(DrawListError::UnclosedClip { open: 1 }));
    }

    #[test]
    fn raw_pop_without_push_is_underflow() {
        let mut dl = DrawList::new();
        dl.push(DrawCmd::PopTransform);
        assert_eq!(dl.validate(), Err(DrawListError::TransformUnderflow { index: 0 }));
    }

    #[test]
    fn side_tables_are_indexed() {
        let mut dl = DrawList::new();
        dl.push_path(super::super::shapes::Path::polyline(
            &[Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)],
            1.0,
            Color::WHITE,
        ));
        dl.push_mesh_gradient(r(0.0, 0.0, 4.0, 4.0), MeshGradient::corners(
            Color::WHITE,
            Color::BLACK,
            Color::BLACK,
            Color::WHITE,
        ));
        assert_eq!(dl.paths().len(), 1);
        assert_eq!(dl.gradients().len(), 1);
        assert_eq!(dl.validate(), Ok(()));
        assert_eq!(dl.stats().shapes, 2);
    }
}
