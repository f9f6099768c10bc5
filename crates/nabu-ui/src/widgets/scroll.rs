use nabu_engine::coords::Vec2;

use crate::id::Id;
use crate::interaction::{edge_press, edge_release, pointer_delta};
use crate::ui::Ui;
use crate::view::{Handle, NodeData, OpenNode, Response, ViewKind, ViewNode};

impl Ui<'_> {
    /// Clipping container whose content scrolls along one axis.
    ///
    /// The wheel moves the innermost hovered scroll container; dragging its
    /// background moves the content with the pointer. Offsets are hard-clamped
    /// to the content extent measured last frame. Close with [`Ui::end`].
    pub fn scroll(&mut self, vertical: bool) -> Handle<'_> {
        let id = self.next_id(ViewKind::Scroll, None);
        let hovered = self.hovering(id);
        let response = self.drag_scroll(id, hovered, vertical);
        let node = ViewNode::new(ViewKind::Scroll, id).with_data(NodeData::Scroll { vertical });
        let nid = self.open(node, false);
        self.handle(nid, response)
    }

    /// Background press-and-drag. Children declared later take `active` from
    /// the container when the press lands on them.
    pub(crate) fn drag_scroll(&mut self, id: Id, hovered: bool, vertical: bool) -> Response {
        let store = &mut self.cx.store;
        let facts = &store.facts;
        let eph = &mut store.ephemeral;
        if hovered && edge_press(facts) && eph.captured().is_none() {
            eph.set_active(id);
        }
        let active = eph.active() == id;
        if active {
            eph.active_seen = true;
            if facts.mouse_down() {
                let d = pointer_delta(facts);
                let state = store.persistent.scroll_mut(id);
                state.offset -= if vertical { Vec2::new(0.0, d.y) } else { Vec2::new(d.x, 0.0) };
                state.clamp();
            }
            if edge_release(facts) {
                eph.release();
            }
        }
        Response { hovered, active, ..Response::default() }
    }

    /// Wheel consumption once every descendant has had its chance.
    pub(crate) fn finish_scroll(&mut self, open: &OpenNode) {
        if !open.hovered || self.cx.store.ephemeral.wheel_consumed {
            return;
        }
        let vertical = match self.cx.arena.node(open.node).map(|n| n.data) {
            Some(NodeData::Scroll { vertical }) => vertical,
            _ => true,
        };
        let wheel = self.cx.store.facts.wheel();
        let lines = if vertical {
            Vec2::new(0.0, wheel.y)
        } else {
            Vec2::new(if wheel.x != 0.0 { wheel.x } else { wheel.y }, 0.0)
        };
        if lines == Vec2::ZERO {
            return;
        }
        let speed = self.cx.config.scroll_speed;
        let state = self.cx.store.persistent.scroll_mut(open.id);
        state.offset -= lines * speed;
        state.clamp();
        self.cx.store.ephemeral.wheel_consumed = true;
        log::trace!("scroll {:?} -> {:?}", open.id, state.offset);
    }
}
