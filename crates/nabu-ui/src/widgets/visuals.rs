use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::Color;

use crate::arena::ArenaSlice;
use crate::layout::{hue_id, sv_id};
use crate::render::{hue_color, sv_color};
use crate::ui::Ui;
use crate::view::{Handle, NodeData, Response, ViewKind, ViewNode};

const SV_SIZE: f32 = 150.0;
const HUE_WIDTH: f32 = 20.0;

/// `p` as a fraction of `r` on each axis, clamped to `[0, 1]`.
fn normalized_in(r: Rect, p: Vec2) -> Vec2 {
    let u = if r.size.x > 0.0 { (p.x - r.origin.x) / r.size.x } else { 0.0 };
    let v = if r.size.y > 0.0 { (p.y - r.origin.y) / r.size.y } else { 0.0 };
    Vec2::new(u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
}

impl Ui<'_> {
    /// Saturation/value square plus hue strip editing `color`.
    ///
    /// Hue and square position are remembered per picker, so dragging the
    /// square to black keeps the hue. The alpha of `color` is preserved.
    pub fn color_picker(&mut self, label: &str, color: &mut Color) -> Handle<'_> {
        let id = self.next_id(ViewKind::ColorPicker, Some(label));
        let sv_r = self.interact_as(sv_id(id), sv_id(id));
        let hue_r = self.interact_as(hue_id(id), hue_id(id));
        if sv_r.pressed {
            self.capture(sv_id(id));
        }
        if hue_r.pressed {
            self.capture(hue_id(id));
        }

        let mouse = self.facts().mouse();
        let sv_rect = self.last_rect(sv_id(id));
        let hue_rect = self.last_rect(hue_id(id));
        let mut changed = false;
        let state = self.cx.store.persistent.picker_mut(id);
        if sv_r.active {
            state.sv = normalized_in(sv_rect, mouse);
            changed = true;
        }
        if hue_r.active {
            state.hue = normalized_in(hue_rect, mouse).y;
            changed = true;
        }
        let state = *state;
        if changed {
            let c = sv_color(hue_color(state.hue), state.sv.x, state.sv.y);
            *color = c.with_alpha(color.a);
        }

        let response = Response {
            hovered: sv_r.hovered || hue_r.hovered || self.hovering(id),
            pressed: sv_r.pressed || hue_r.pressed,
            active: sv_r.active || hue_r.active,
            changed,
            ..Response::default()
        };
        let node = ViewNode::new(ViewKind::ColorPicker, id).with_data(NodeData::ColorPicker {
            color: *color,
            hue: state.hue,
            sv_size: SV_SIZE,
            hue_width: HUE_WIDTH,
        });
        let nid = self.add(node);
        self.handle(nid, response)
    }

    /// Line chart of `samples` (bars with [`Handle::bars`]). Values are
    /// plotted between their own minimum and maximum.
    pub fn plot(&mut self, samples: &[f32]) -> Handle<'_> {
        let id = self.next_id(ViewKind::Plot, None);
        let samples = match self.cx.arena.alloc_slice(samples) {
            Ok(s) => s,
            Err(e) => {
                self.cx.report(e.into());
                ArenaSlice::EMPTY
            }
        };
        let hovered = self.hovering(id);
        let nid = self.add(ViewNode::new(ViewKind::Plot, id).with_data(NodeData::Plot { samples, bars: false }));
        self.handle(nid, Response { hovered, ..Response::default() })
    }

    /// Cubic wire through four control points given with [`Handle::points`].
    /// Points are in canvas space inside a canvas and screen space elsewhere;
    /// the wire takes no layout space.
    pub fn bezier(&mut self) -> Handle<'_> {
        let id = self.next_id(ViewKind::Bezier, None);
        let mut node = ViewNode::new(ViewKind::Bezier, id).with_data(NodeData::Bezier { points: [Vec2::ZERO; 4], thickness: 2.0 });
        node.absolute = true;
        let nid = self.add(node);
        self.handle(nid, Response::default())
    }
}
