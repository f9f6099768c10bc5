use nabu_engine::coords::Vec2;
use nabu_engine::core::CursorIcon;

use crate::interaction::pointer_delta;
use crate::layout::header_id;
use crate::render::theme;
use crate::ui::Ui;
use crate::view::{Handle, NodeData, OpenNode, Response, ViewKind, ViewNode};

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 10.0;
/// Zoom factor per wheel line.
const ZOOM_STEP: f32 = 1.1;

impl Ui<'_> {
    /// Pan/zoom surface. Children are positioned in canvas space (usually
    /// with [`Ui::graph_node`] or absolute offsets) and drawn under the
    /// canvas transform. Middle-drag pans; the wheel zooms about the pointer.
    /// Close with [`Ui::end`].
    pub fn canvas(&mut self, label: &str) -> Handle<'_> {
        let id = self.next_id(ViewKind::Canvas, Some(label));
        let hovered = self.hovering(id);

        let store = &mut self.cx.store;
        let facts = &store.facts;
        let eph = &mut store.ephemeral;
        let middle_press = facts.buttons().middle && !facts.prev_buttons().middle;
        if hovered && middle_press && eph.active().is_none() {
            eph.set_active(id);
        }
        let active = eph.active() == id;
        if active {
            eph.active_seen = true;
            if facts.buttons().middle {
                store.persistent.canvas_mut(id).pan += pointer_delta(facts);
                eph.request_cursor(CursorIcon::Grabbing);
            } else {
                eph.release();
            }
        }

        let view = store.persistent.canvas(id);
        let mut node = ViewNode::new(ViewKind::Canvas, id).with_data(NodeData::Canvas { pan: view.pan, zoom: view.zoom });
        node.grow = 1.0;
        let nid = self.open(node, false);
        self.cx.tree.canvas_zoom.push(view.zoom);
        self.handle(nid, Response { hovered, active, ..Response::default() })
    }

    /// Wheel zoom about the pointer, after children had their chance at the wheel.
    pub(crate) fn finish_canvas(&mut self, open: &OpenNode) {
        self.cx.tree.canvas_zoom.pop();
        let wheel = self.cx.store.facts.wheel().y;
        if !open.hovered || wheel == 0.0 || self.cx.store.ephemeral.wheel_consumed {
            return;
        }
        let origin = self.last_rect(open.id).origin;
        let mouse = self.cx.store.facts.mouse();
        let view = self.cx.store.persistent.canvas_mut(open.id);
        let zoom = (view.zoom * ZOOM_STEP.powf(wheel)).clamp(MIN_ZOOM, MAX_ZOOM);
        // Keep the canvas point under the pointer fixed.
        let local = (mouse - origin * (1.0 - view.zoom) - view.pan) / view.zoom;
        view.pan = mouse - local * zoom - origin * (1.0 - zoom);
        view.zoom = zoom;
        self.cx.store.ephemeral.wheel_consumed = true;
    }

    /// Draggable node card at `pos` (canvas space) with a title strip.
    /// Dragging the strip moves `pos`. Close with [`Ui::end`].
    pub fn graph_node(&mut self, title: &str, pos: &mut Vec2) -> Handle<'_> {
        let id = self.next_id(ViewKind::GraphNode, Some(title));
        let header = header_id(id);
        let mut response = self.interact_as(id, header);
        if response.pressed {
            self.capture(id);
        }
        if response.active && self.facts().mouse_down() {
            let delta = pointer_delta(self.facts()) / self.canvas_zoom().max(f32::EPSILON);
            if delta != Vec2::ZERO {
                *pos += delta;
                response.changed = true;
            }
        }
        if response.hovered || response.active {
            self.request_cursor(if response.active { CursorIcon::Grabbing } else { CursorIcon::Grab });
        }

        let label = self.alloc_str(title);
        let mut node = ViewNode::new(ViewKind::GraphNode, id).with_data(NodeData::Header { label, open: true, depth: 0 });
        node.absolute = true;
        node.offset = *pos;
        node.bg = theme::PANEL;
        node.radius = 6.0;
        node.elevation = 4.0;
        node.padding = 4.0;
        node.gap = 4.0;
        let nid = self.open(node, false);
        self.handle(nid, response)
    }
}
