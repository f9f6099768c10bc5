use nabu_engine::core::CursorIcon;
use nabu_engine::input::Key;

use crate::id::Id;
use crate::layout::header_id;
use crate::ui::Ui;
use crate::view::{Handle, NodeData, Response, ViewKind, ViewNode};

impl Ui<'_> {
    /// Section with a clickable header. Its open state persists across
    /// frames (closed initially).
    ///
    /// When [`Handle::expanded`] is true the section is an open container and
    /// the caller must close it with [`Ui::end`]; otherwise it is a leaf.
    ///
    /// ```rust,ignore
    /// if ui.collapsible("Advanced").expanded() {
    ///     ui.text("...");
    ///     ui.end();
    /// }
    /// ```
    pub fn collapsible(&mut self, label: &str) -> Handle<'_> {
        let id = self.next_id(ViewKind::Collapsible, Some(label));
        let mut open = self.cx.store.persistent.is_open(id, false);
        let toggled = self.header_toggle(id, &mut open);
        if toggled {
            self.cx.store.persistent.set_open(id, open);
        }
        self.header_node(ViewKind::Collapsible, id, label, open, 0, toggled)
    }

    /// Tree row bound to `open`. Children are indented under the header.
    /// Same open/leaf contract as [`Ui::collapsible`].
    pub fn tree_node(&mut self, label: &str, open: &mut bool) -> Handle<'_> {
        let id = self.next_id(ViewKind::TreeNode, Some(label));
        let depth = self.cx.tree.parents.iter().filter(|p| p.kind == ViewKind::TreeNode).count();
        let toggled = self.header_toggle(id, open);
        self.header_node(ViewKind::TreeNode, id, label, *open, depth as u16, toggled)
    }

    /// Header click (or Enter while focused) flips `open`.
    fn header_toggle(&mut self, id: Id, open: &mut bool) -> bool {
        let response = self.interact_as(id, header_id(id));
        self.focusable(id);
        if response.hovered {
            self.request_cursor(CursorIcon::Pointer);
        }
        if response.clicked || (response.focused && self.key_pressed(Key::Enter)) {
            *open = !*open;
            return true;
        }
        false
    }

    fn header_node(
        &mut self,
        kind: ViewKind,
        id: Id,
        label: &str,
        open: bool,
        depth: u16,
        toggled: bool,
    ) -> Handle<'_> {
        let hovered = self.hovering(header_id(id));
        let focused = self.cx.store.persistent.focus() == id;
        let label = self.alloc_str(label);
        let node = ViewNode::new(kind, id).with_data(NodeData::Header { label, open, depth });
        let nid = if open { self.open(node, false) } else { self.add(node) };
        let response = Response {
            hovered,
            clicked: toggled,
            focused,
            changed: toggled,
            expanded: open,
            ..Default::default()
        };
        self.handle(nid, response)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::context::Context;
    use crate::ui::Ui;
    use nabu_engine::coords::Vec2;
    use nabu_engine::input::Key;

    fn cx() -> Context {
        Context::new(Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false))
    }

    fn section(ui: &mut Ui<'_>) -> bool {
        let open = ui.collapsible("Advanced").expanded();
        if open {
            ui.text("body");
            ui.end();
        }
        open
    }

    #[test]
    fn collapsible_toggles_on_click_and_remembers() {
        let mut cx = cx();
        cx.store.facts.set_mouse(Vec2::new(10.0, 10.0));
        let mut states = Vec::new();
        for down in [false, true, false, false, true, false] {
            cx.store.facts.set_mouse_down(down);
            cx.frame(800.0, 600.0, |ui| states.push(section(ui)));
        }
        assert_eq!(states, [false, false, true, true, true, false]);
        assert_eq!(cx.tree.depth(), 0);
    }

    #[test]
    fn collapsible_state_survives_frames_without_it() {
        let mut cx = cx();
        cx.store.facts.set_mouse(Vec2::new(10.0, 10.0));
        for down in [false, true, false] {
            cx.store.facts.set_mouse_down(down);
            cx.frame(800.0, 600.0, |ui| {
                section(ui);
            });
        }
        cx.frame(800.0, 600.0, |_| {});
        let mut open = false;
        cx.frame(800.0, 600.0, |ui| open = section(ui));
        assert!(open);
    }

    #[test]
    fn tree_node_writes_the_bound_flag() {
        let mut cx = cx();
        let mut open = false;
        cx.store.facts.set_mouse(Vec2::new(10.0, 10.0));
        let build = |cx: &mut Context, open: &mut bool| {
            cx.frame(800.0, 600.0, |ui| {
                if ui.tree_node("root", open).expanded() {
                    ui.tree_node("leaf", &mut false);
                    ui.end();
                }
            });
        };
        for down in [false, true, false] {
            cx.store.facts.set_mouse_down(down);
            build(&mut cx, &mut open);
        }
        assert!(open);

        // The click focused the row; Enter flips it back.
        cx.store.facts.press_key(Key::Enter);
        build(&mut cx, &mut open);
        assert!(!open);
    }
}
