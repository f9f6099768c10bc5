use nabu_engine::core::CursorIcon;

use crate::interaction::pointer_delta;
use crate::layout::{handle_id, SPLITTER_HANDLE};
use crate::ui::Ui;
use crate::view::{Handle, NodeData, ViewKind, ViewNode};

const MIN_RATIO: f32 = 0.05;
const MAX_RATIO: f32 = 0.95;

impl Ui<'_> {
    /// Two panes separated by a draggable handle; `ratio` is the first
    /// pane's share of the space. `vertical` stacks the panes top and bottom.
    ///
    /// Declare exactly two children, then close with [`Ui::end`].
    pub fn splitter(&mut self, ratio: &mut f32, vertical: bool) -> Handle<'_> {
        let id = self.next_id(ViewKind::Splitter, None);
        let handle = handle_id(id);
        let mut response = self.interact_as(handle, handle);
        if response.pressed {
            self.capture(handle);
        }
        if !ratio.is_finite() {
            *ratio = 0.5;
        }
        if response.active {
            let size = self.last_rect(id).size;
            let delta = pointer_delta(self.facts());
            let (moved, span) = if vertical { (delta.y, size.y) } else { (delta.x, size.x) };
            let span = span - SPLITTER_HANDLE;
            if moved != 0.0 && span > 0.0 {
                *ratio += moved / span;
                response.changed = true;
            }
        }
        *ratio = ratio.clamp(MIN_RATIO, MAX_RATIO);
        if response.hovered || response.active {
            self.request_cursor(if vertical { CursorIcon::ResizeVertical } else { CursorIcon::ResizeHorizontal });
        }

        let mut node = ViewNode::new(ViewKind::Splitter, id).with_data(NodeData::Splitter { ratio: *ratio, vertical });
        node.row = !vertical;
        node.grow = 1.0;
        let nid = self.open(node, false);
        response.hovered |= self.hovering(id);
        self.handle(nid, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::context::Context;
    use nabu_engine::coords::Vec2;

    fn cx() -> Context {
        Context::new(Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false))
    }

    /// 408 wide: 400 px to share, handle at `ratio * 400`.
    fn panes(ui: &mut Ui<'_>, ratio: &mut f32) {
        ui.splitter(ratio, false).size(408.0, 100.0);
        ui.container();
        ui.end();
        ui.container();
        ui.end();
        ui.end();
    }

    #[test]
    fn dragging_the_handle_moves_the_ratio_and_clamps() {
        let mut cx = cx();
        let mut ratio = 0.5;
        let mut seen = Vec::new();
        for (x, down) in [(204.0, false), (204.0, true), (304.0, true), (2000.0, true), (2000.0, false)] {
            cx.store.facts.set_mouse(Vec2::new(x, 50.0));
            cx.store.facts.set_mouse_down(down);
            cx.frame(800.0, 600.0, |ui| panes(ui, &mut ratio));
            seen.push(ratio);
        }
        assert_eq!(seen[1], 0.5);
        assert!((seen[2] - 0.75).abs() < 1e-4);
        assert_eq!(seen[3], MAX_RATIO);
        assert_eq!(seen[4], MAX_RATIO);
        assert!(cx.store.ephemeral.active().is_none());
    }

    #[test]
    fn ratio_is_kept_inside_its_limits() {
        let mut cx = cx();
        let mut low = 0.0;
        let mut nan = f32::NAN;
        cx.frame(800.0, 600.0, |ui| {
            panes(ui, &mut low);
            panes(ui, &mut nan);
        });
        assert_eq!(low, MIN_RATIO);
        assert_eq!(nan, 0.5);
    }

    #[test]
    fn pressing_a_pane_does_not_drag() {
        let mut cx = cx();
        let mut ratio = 0.5;
        for (x, down) in [(50.0, false), (50.0, true), (150.0, true)] {
            cx.store.facts.set_mouse(Vec2::new(x, 50.0));
            cx.store.facts.set_mouse_down(down);
            cx.frame(800.0, 600.0, |ui| panes(ui, &mut ratio));
        }
        assert_eq!(ratio, 0.5);
    }
}
