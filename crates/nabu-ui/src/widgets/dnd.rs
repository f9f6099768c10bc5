use nabu_engine::core::CursorIcon;

use crate::id::fnv1a;
use crate::interaction::{edge_press, edge_release};
use crate::store::DragPayload;
use crate::ui::Ui;
use crate::view::{Handle, NodeData, Response, ViewKind, ViewNode};

impl Ui<'_> {
    /// Container that starts a drag carrying `payload` when pressed. Drop
    /// targets accept it only when their `type_name` matches. Close with
    /// [`Ui::end`].
    pub fn drag_source(&mut self, label: &str, type_name: &str, payload: u64) -> Handle<'_> {
        let id = self.next_id(ViewKind::DragSource, Some(label));
        let type_hash = fnv1a(type_name.as_bytes());
        let hovered = self.hovering(id);
        let store = &mut self.cx.store;
        let pressed = hovered && edge_press(&store.facts) && store.ephemeral.drag().is_none();
        if pressed {
            let start = store.facts.mouse();
            store.ephemeral.start_drag(DragPayload { source: id, type_hash, data: payload, start });
            log::debug!("drag {id:?} started");
        }
        let dragging = store.ephemeral.drag().is_some_and(|d| d.source == id);
        if dragging {
            store.ephemeral.request_cursor(CursorIcon::Grabbing);
        } else if hovered {
            store.ephemeral.request_cursor(CursorIcon::Grab);
        }

        let node = ViewNode::new(ViewKind::DragSource, id).with_data(NodeData::DragSource { type_hash, payload });
        let nid = self.open(node, false);
        self.handle(nid, Response { hovered, pressed, active: dragging, ..Response::default() })
    }

    /// Container receiving drags of `type_name`. [`Handle::dropped`] carries
    /// the payload on the release frame. Close with [`Ui::end`].
    pub fn drop_target(&mut self, label: &str, type_name: &str) -> Handle<'_> {
        let id = self.next_id(ViewKind::DropTarget, Some(label));
        let type_hash = fnv1a(type_name.as_bytes());
        let hovered = self.hovering(id);
        let store = &self.cx.store;
        let matching = store.ephemeral.drag().filter(|d| d.type_hash == type_hash && d.source != id);
        let accepting = hovered && matching.is_some();
        let dropped = if accepting && edge_release(&store.facts) { matching.map(|d| d.data) } else { None };
        if let Some(data) = dropped {
            log::debug!("drop on {id:?}: {data}");
        }

        let node = ViewNode::new(ViewKind::DropTarget, id).with_data(NodeData::DropTarget { type_hash, hovering: accepting });
        let nid = self.open(node, false);
        self.handle(nid, Response { hovered, dropped, changed: dropped.is_some(), ..Response::default() })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::context::Context;
    use crate::ui::Ui;
    use nabu_engine::coords::Vec2;

    fn cx() -> Context {
        Context::new(Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false))
    }

    /// A chip at (0, 0) and a bin below it at (0, 50), both 100×50.
    fn board(ui: &mut Ui<'_>, accepts: &str) -> Option<u64> {
        ui.drag_source("chip", "color", 7).size(100.0, 50.0);
        ui.end();
        let dropped = ui.drop_target("bin", accepts).size(100.0, 50.0).dropped();
        ui.end();
        dropped
    }

    /// Press on the chip, carry it over the bin, release there.
    fn drag_chip_to_bin(accepts: &str) -> (Context, Vec<Option<u64>>) {
        let mut cx = cx();
        let mut drops = Vec::new();
        for (y, down) in [(25.0, false), (25.0, true), (75.0, true), (75.0, false), (75.0, false)] {
            cx.store.facts.set_mouse(Vec2::new(50.0, y));
            cx.store.facts.set_mouse_down(down);
            cx.frame(800.0, 600.0, |ui| drops.push(board(ui, accepts)));
        }
        (cx, drops)
    }

    #[test]
    fn matching_target_receives_payload_on_release() {
        let (cx, drops) = drag_chip_to_bin("color");
        assert_eq!(drops, [None, None, None, Some(7), None]);
        assert!(cx.store.ephemeral.drag().is_none());
    }

    #[test]
    fn mismatched_type_is_rejected() {
        let (cx, drops) = drag_chip_to_bin("file");
        assert!(drops.iter().all(Option::is_none));
        assert!(cx.store.ephemeral.drag().is_none());
    }

    #[test]
    fn drag_is_in_flight_until_release() {
        let mut cx = cx();
        for down in [false, true] {
            cx.store.facts.set_mouse(Vec2::new(50.0, 25.0));
            cx.store.facts.set_mouse_down(down);
            cx.frame(800.0, 600.0, |ui| {
                board(ui, "color");
            });
        }
        let payload = *cx.store.ephemeral.drag().unwrap();
        assert_eq!(payload.data, 7);
        assert_eq!(payload.start, Vec2::new(50.0, 25.0));
    }
}
