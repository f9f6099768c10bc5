use nabu_engine::coords::Vec2;
use nabu_engine::core::CursorIcon;

use crate::id::Id;

/// An in-flight drag-and-drop operation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragPayload {
    pub source: Id,
    /// Hash of the type name given to `drag_source`; drop targets compare it.
    pub type_hash: u64,
    /// Opaque application value.
    pub data: u64,
    /// Pointer position at the press that started the drag.
    pub start: Vec2,
}

/// Interaction state derived by the resolver.
///
/// `hot` is rebuilt every frame; `active` lives from press to release;
/// everything else is scratch for the current frame.
#[derive(Debug, Clone, Default)]
pub struct Ephemeral {
    hot: Id,
    prev_hot: Id,
    active: Id,
    captured: Id,
    clicked: Id,
    pub(crate) active_seen: bool,
    pub(crate) focus_seen: bool,
    pub(crate) menu_bar: Id,
    drag: Option<DragPayload>,
    pub(crate) wheel_consumed: bool,
    cursor: CursorIcon,
    pub(crate) focusables: Vec<Id>,
}

impl Ephemeral {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame rotation: `hot` is zeroed, one-shot scratch cleared, `active` kept.
    pub(crate) fn begin_frame(&mut self) {
        self.prev_hot = self.hot;
        self.hot = Id::NONE;
        self.clicked = Id::NONE;
        self.active_seen = false;
        self.focus_seen = false;
        self.menu_bar = Id::NONE;
        self.wheel_consumed = false;
        self.cursor = CursorIcon::Default;
        self.focusables.clear();
    }

    // ── reads ─────────────────────────────────────────────────────────────

    /// Element under the pointer this frame (last declared wins).
    #[inline]
    pub fn hot(&self) -> Id {
        self.hot
    }

    /// `hot` as it stood at the end of the previous frame.
    #[inline]
    pub fn prev_hot(&self) -> Id {
        self.prev_hot
    }

    /// Element the pointer went down on and has not been released.
    #[inline]
    pub fn active(&self) -> Id {
        self.active
    }

    /// Element holding pointer capture, if any.
    #[inline]
    pub fn captured(&self) -> Id {
        self.captured
    }

    /// Element whose click was recorded this frame.
    #[inline]
    pub fn clicked(&self) -> Id {
        self.clicked
    }

    #[inline]
    pub fn drag(&self) -> Option<&DragPayload> {
        self.drag.as_ref()
    }

    #[inline]
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Focusable elements in declaration order.
    #[inline]
    pub fn focusables(&self) -> &[Id] {
        &self.focusables
    }

    // ── writes ────────────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn set_hot(&mut self, id: Id) {
        self.hot = id;
    }

    /// A press landed on `id`. Any capture by a different element is dropped.
    pub(crate) fn set_active(&mut self, id: Id) {
        if self.captured != id {
            self.captured = Id::NONE;
        }
        self.active = id;
    }

    /// Holds `active` on `id` while the pointer leaves its rectangle.
    pub fn capture(&mut self, id: Id) {
        if self.active == id {
            self.captured = id;
        }
    }

    pub(crate) fn release(&mut self) {
        self.active = Id::NONE;
        self.captured = Id::NONE;
    }

    #[inline]
    pub(crate) fn record_click(&mut self, id: Id) {
        self.clicked = id;
    }

    pub(crate) fn start_drag(&mut self, payload: DragPayload) {
        self.drag = Some(payload);
    }

    pub(crate) fn clear_drag(&mut self) {
        self.drag = None;
    }

    /// Requests a pointer cursor for this frame. The last request wins.
    pub fn request_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }
}
