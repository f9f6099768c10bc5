use std::collections::HashMap;

use nabu_engine::coords::{Rect, Vec2};

use crate::animation::Animations;
use crate::id::Id;
use crate::widgets::text_edit::EditCursor;

/// Offset and extents of one scroll container.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScrollState {
    pub offset: Vec2,
    /// Full size of the scrolled content, padding included.
    pub content: Vec2,
    /// Size of the visible window onto it.
    pub viewport: Vec2,
}

impl ScrollState {
    /// Largest valid offset on each axis.
    #[inline]
    pub fn max_offset(&self) -> Vec2 {
        (self.content - self.viewport).max(Vec2::ZERO)
    }

    /// Hard clamp into `[0, content - viewport]`.
    pub fn clamp(&mut self) {
        let max = self.max_offset();
        self.offset = Vec2::new(self.offset.x.clamp(0.0, max.x), self.offset.y.clamp(0.0, max.y));
    }
}

/// Where a color picker's markers sit, all normalized to `0..=1`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickerState {
    pub hue: f32,
    /// `x` runs white to the pure hue, `y` runs towards black.
    pub sv: Vec2,
}

impl Default for PickerState {
    fn default() -> Self {
        Self { hue: 0.0, sv: Vec2::new(1.0, 0.0) }
    }
}

/// Pan and zoom of one canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasView {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self { pan: Vec2::ZERO, zoom: 1.0 }
    }
}

/// State that survives across frames, keyed by element id.
///
/// Reads during a build see what the previous frame committed; layout,
/// interaction and animation write back during the current frame.
#[derive(Debug, Clone, Default)]
pub struct Persistent {
    rects: HashMap<Id, Rect>,
    scroll: HashMap<Id, ScrollState>,
    pub(crate) animations: Animations,
    focus: Id,
    canvases: HashMap<Id, CanvasView>,
    pub(crate) open_menu: Id,
    overlay_rects: Vec<Rect>,
    pub(crate) next_overlay_rects: Vec<Rect>,
    open: HashMap<Id, bool>,
    pickers: HashMap<Id, PickerState>,
    edits: HashMap<Id, EditCursor>,
}

impl Persistent {
    pub fn new() -> Self {
        Self::default()
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Screen rectangle `id` had at the end of the previous layout.
    #[inline]
    pub fn rect(&self, id: Id) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    pub(crate) fn commit_rect(&mut self, id: Id, rect: Rect) {
        self.rects.insert(id, rect);
    }

    /// Forgets every rectangle; layout recommits the ones still in the tree.
    pub(crate) fn clear_rects(&mut self) {
        self.rects.clear();
    }

    pub fn rect_count(&self) -> usize {
        self.rects.len()
    }

    /// Overlay (popup, menu) rectangles from the previous frame.
    #[inline]
    pub fn overlay_rects(&self) -> &[Rect] {
        &self.overlay_rects
    }

    pub(crate) fn rotate_overlays(&mut self) {
        std::mem::swap(&mut self.overlay_rects, &mut self.next_overlay_rects);
        self.next_overlay_rects.clear();
    }

    // ── scroll / canvas ───────────────────────────────────────────────────

    pub fn scroll(&self, id: Id) -> ScrollState {
        self.scroll.get(&id).copied().unwrap_or_default()
    }

    pub(crate) fn scroll_mut(&mut self, id: Id) -> &mut ScrollState {
        self.scroll.entry(id).or_default()
    }

    pub fn canvas(&self, id: Id) -> CanvasView {
        self.canvases.get(&id).copied().unwrap_or_default()
    }

    pub(crate) fn canvas_mut(&mut self, id: Id) -> &mut CanvasView {
        self.canvases.entry(id).or_default()
    }

    // ── focus ─────────────────────────────────────────────────────────────

    /// Sticky keyboard focus.
    #[inline]
    pub fn focus(&self) -> Id {
        self.focus
    }

    pub fn set_focus(&mut self, id: Id) {
        if self.focus != id {
            log::trace!("focus {:?} -> {:?}", self.focus, id);
        }
        self.focus = id;
    }

    pub fn clear_focus(&mut self) {
        self.set_focus(Id::NONE);
    }

    // ── widget memory ─────────────────────────────────────────────────────

    #[inline]
    pub fn animations(&self) -> &Animations {
        &self.animations
    }

    /// Open flag of a collapsible, `default` on first sight.
    pub fn is_open(&self, id: Id, default: bool) -> bool {
        self.open.get(&id).copied().unwrap_or(default)
    }

    pub(crate) fn set_open(&mut self, id: Id, open: bool) {
        self.open.insert(id, open);
    }

    /// Selection of a color picker's hue strip and saturation/value square.
    pub fn picker(&self, id: Id) -> PickerState {
        self.pickers.get(&id).copied().unwrap_or_default()
    }

    pub(crate) fn picker_mut(&mut self, id: Id) -> &mut PickerState {
        self.pickers.entry(id).or_default()
    }

    pub(crate) fn edit_cursor(&mut self, id: Id, text: &str) -> &mut EditCursor {
        self.edits.entry(id).or_insert_with(|| EditCursor::at_end(text))
    }

    pub fn edit(&self, id: Id) -> Option<EditCursor> {
        self.edits.get(&id).copied()
    }
}
