//! The builder surface handed to application code each frame.

use nabu_engine::coords::{Rect, Viewport};
use nabu_engine::core::CursorIcon;
use nabu_engine::input::{Facts, Key, KeyState};
use nabu_engine::time::FrameTime;

use crate::arena::{ArenaStr, NodeId};
use crate::config::Config;
use crate::context::Context;
use crate::error::FrameError;
use crate::id::{Id, IdSeed};
use crate::interaction;
use crate::store::{Ephemeral, Persistent};
use crate::view::{Handle, OpenNode, Response, ViewKind, ViewNode};

/// Builds one frame's view tree.
///
/// Obtained from [`Context::ui`] between `begin_frame` and `end_frame`.
/// Every builder appends a node to the open container (or to the root),
/// resolves its interaction against last frame's layout, and returns a
/// [`Handle`] for styling.
pub struct Ui<'c> {
    pub(crate) cx: &'c mut Context,
}

impl<'c> Ui<'c> {
    pub(crate) fn new(cx: &'c mut Context) -> Self {
        Self { cx }
    }

    // ── id scope ──────────────────────────────────────────────────────────

    /// Pushes a seed onto the id stack; ids derived until the matching
    /// [`Ui::pop_id`] are distinct from those outside it.
    pub fn push_id<'s>(&mut self, seed: impl Into<IdSeed<'s>>) -> Id {
        self.cx.ids.push(seed)
    }

    pub fn pop_id(&mut self) {
        if !self.cx.ids.pop() {
            self.cx.report(FrameError::UnmatchedPopId);
        }
    }

    /// Id the next labeled builder would derive from `label`.
    pub fn id_of(&self, label: &str) -> Id {
        self.cx.ids.derive(label)
    }

    /// Closes the innermost open container.
    pub fn end(&mut self) {
        let Some(open) = self.cx.tree.pop() else {
            self.cx.report(FrameError::UnmatchedEnd);
            return;
        };
        self.cx.ids.pop();
        match open.kind {
            ViewKind::Scroll | ViewKind::Table => self.finish_scroll(&open),
            ViewKind::Canvas => self.finish_canvas(&open),
            _ => {}
        }
    }

    /// Open containers.
    pub fn depth(&self) -> usize {
        self.cx.tree.depth()
    }

    // ── frame state ───────────────────────────────────────────────────────

    #[inline]
    pub fn facts(&self) -> &Facts {
        &self.cx.store.facts
    }

    #[inline]
    pub fn ephemeral(&self) -> &Ephemeral {
        &self.cx.store.ephemeral
    }

    #[inline]
    pub fn persistent(&self) -> &Persistent {
        &self.cx.store.persistent
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cx.config
    }

    #[inline]
    pub fn time(&self) -> FrameTime {
        self.cx.time
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.cx.viewport
    }

    /// Holds `active` on `id` until release even when the pointer leaves its
    /// rectangle. Only the current active element may capture.
    pub fn capture(&mut self, id: Id) {
        self.cx.store.ephemeral.capture(id);
    }

    pub fn request_cursor(&mut self, cursor: CursorIcon) {
        self.cx.store.ephemeral.request_cursor(cursor);
    }

    /// Whether `key` was pressed (or auto-repeated) this frame.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.cx.store.facts.keys().iter().any(|k| k.key == key && k.state == KeyState::Pressed)
    }

    // ── node plumbing ─────────────────────────────────────────────────────

    /// Id of the next node: labeled nodes hash their label, the rest hash
    /// their kind and position among siblings.
    pub(crate) fn next_id(&mut self, kind: ViewKind, label: Option<&str>) -> Id {
        let ordinal = self.cx.tree.next_ordinal();
        match label {
            Some(label) => self.cx.ids.derive(label),
            None => self.cx.ids.derive(IdSeed::Hash(Id::from_label(kind.seed()).mix(u64::from(ordinal)).0)),
        }
    }

    pub(crate) fn alloc_str(&mut self, s: &str) -> ArenaStr {
        if s.is_empty() {
            return ArenaStr::EMPTY;
        }
        match self.cx.arena.alloc_str(s) {
            Ok(s) => s,
            Err(e) => {
                self.cx.report(e.into());
                ArenaStr::EMPTY
            }
        }
    }

    fn alloc_node(&mut self, node: ViewNode) -> NodeId {
        if self.cx.tree.detached() {
            return NodeId::NONE;
        }
        match self.cx.arena.alloc_node(node) {
            Ok(id) => id,
            Err(e) => {
                self.cx.report(e.into());
                NodeId::NONE
            }
        }
    }

    /// Appends a leaf to the open container.
    pub(crate) fn add(&mut self, node: ViewNode) -> NodeId {
        let id = self.alloc_node(node);
        if id.is_some() {
            self.cx.tree.link(&mut self.cx.arena, id);
        }
        id
    }

    /// Appends a container and makes it the parent of subsequent builders
    /// until [`Ui::end`]. Overlay containers become roots of the overlay layer.
    pub(crate) fn open(&mut self, node: ViewNode, overlay: bool) -> NodeId {
        let hovered = self.hit(node.id, overlay || self.cx.tree.in_overlay());
        let id = self.alloc_node(node);
        if id.is_some() {
            if overlay {
                self.cx.tree.overlays.push(id);
            } else {
                self.cx.tree.link(&mut self.cx.arena, id);
            }
        }
        self.cx.ids.push_raw(node.id);
        self.cx.tree.push(OpenNode { node: id, id: node.id, kind: node.kind, children: 0, hovered, overlay });
        id
    }

    /// Whether the pointer is over `rect_id`'s last-frame rectangle and not
    /// blocked by an overlay this element is not part of.
    pub(crate) fn hovering(&self, rect_id: Id) -> bool {
        self.hit(rect_id, self.cx.tree.in_overlay())
    }

    fn hit(&self, rect_id: Id, in_overlay: bool) -> bool {
        let facts = &self.cx.store.facts;
        let persistent = &self.cx.store.persistent;
        let Some(rect) = persistent.rect(rect_id) else { return false };
        let blocked = !in_overlay && interaction::over_overlay(persistent, facts.mouse());
        facts.pointer_inside() && rect.contains(facts.mouse()) && !blocked
    }

    pub(crate) fn last_rect(&self, id: Id) -> Rect {
        self.cx.store.persistent.rect(id).unwrap_or_default()
    }

    /// Runs the interaction resolver for `id` against `rect_id`'s rectangle.
    pub(crate) fn interact_as(&mut self, id: Id, rect_id: Id) -> Response {
        let in_overlay = self.cx.tree.in_overlay();
        let store = &mut self.cx.store;
        interaction::interact(&store.facts, &mut store.ephemeral, &mut store.persistent, id, rect_id, in_overlay)
    }

    #[inline]
    pub(crate) fn interact(&mut self, id: Id) -> Response {
        self.interact_as(id, id)
    }

    /// Registers `id` in this frame's tab ring.
    pub(crate) fn focusable(&mut self, id: Id) {
        self.cx.store.ephemeral.focusables.push(id);
    }

    pub(crate) fn handle(&mut self, node: NodeId, response: Response) -> Handle<'_> {
        Handle::new(&mut self.cx.arena, node, response)
    }

    /// Zoom of the innermost enclosing canvas.
    pub(crate) fn canvas_zoom(&self) -> f32 {
        self.cx.tree.canvas_zoom.last().copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::coords::Vec2;

    fn cx() -> Context {
        Context::new(Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false))
    }

    #[test]
    fn unlabeled_siblings_get_distinct_ids() {
        let mut cx = cx();
        cx.begin_frame(800.0, 600.0);
        let (a, b) = {
            let mut ui = cx.ui();
            let a = ui.text("same").id();
            let b = ui.text("same").id();
            (a, b)
        };
        cx.end_frame();
        assert_ne!(a, b);
    }

    #[test]
    fn unmatched_end_is_reported_not_fatal() {
        let mut cx = cx();
        cx.begin_frame(800.0, 600.0);
        cx.ui().end();
        let report = cx.end_frame();
        assert!(report.errors.contains(&FrameError::UnmatchedEnd));
    }

    #[test]
    fn unmatched_pop_id_is_reported() {
        let mut cx = cx();
        cx.begin_frame(800.0, 600.0);
        cx.ui().pop_id();
        let report = cx.end_frame();
        assert!(report.errors.contains(&FrameError::UnmatchedPopId));
    }

    #[test]
    fn hovering_needs_a_previous_rect() {
        let mut cx = cx();
        cx.store.facts.set_mouse(Vec2::new(5.0, 5.0));
        cx.begin_frame(800.0, 600.0);
        assert!(!cx.ui().hovering(Id(42)));
        cx.end_frame();
        cx.store.persistent.commit_rect(Id(42), Rect::new(0.0, 0.0, 10.0, 10.0));
        cx.begin_frame(800.0, 600.0);
        assert!(cx.ui().hovering(Id(42)));
        cx.end_frame();
    }
}
