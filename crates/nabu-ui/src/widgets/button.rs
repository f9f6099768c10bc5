use nabu_engine::core::CursorIcon;
use nabu_engine::input::Key;

use crate::render::theme;
use crate::ui::Ui;
use crate::view::{Handle, NodeData, ViewKind, ViewNode};

impl Ui<'_> {
    /// Push button. The handle converts to `true` on the frame the click
    /// completes (release over the button, or Enter while focused).
    ///
    /// ```rust,ignore
    /// if ui.button("Save").size(80.0, 30.0).clicked() {
    ///     save();
    /// }
    /// ```
    pub fn button(&mut self, label: &str) -> Handle<'_> {
        let id = self.next_id(ViewKind::Button, Some(label));
        let mut response = self.interact(id);
        self.focusable(id);
        if response.focused && self.key_pressed(Key::Enter) && !response.clicked {
            self.cx.store.ephemeral.record_click(id);
            response.clicked = true;
        }
        if response.hovered {
            self.request_cursor(CursorIcon::Pointer);
        }

        let label = self.alloc_str(label);
        let mut node = ViewNode::new(ViewKind::Button, id).with_data(NodeData::Button { label, on_click: None });
        node.bg = theme::BUTTON;
        node.radius = 6.0;
        node.elevation = 2.0;
        let nid = self.add(node);
        self.handle(nid, response)
    }
}
