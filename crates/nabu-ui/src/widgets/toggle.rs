use nabu_engine::core::CursorIcon;
use nabu_engine::input::Key;

use crate::ui::Ui;
use crate::view::{Handle, NodeData, ViewKind, ViewNode};

impl Ui<'_> {
    /// On/off switch bound to `value`; flips on release over the switch or
    /// on Space while focused.
    pub fn toggle(&mut self, label: &str, value: &mut bool) -> Handle<'_> {
        let id = self.next_id(ViewKind::Toggle, Some(label));
        let mut response = self.interact(id);
        self.focusable(id);
        let keyed = response.focused && (self.key_pressed(Key::Space) || self.key_pressed(Key::Enter));
        if response.clicked || keyed {
            *value = !*value;
            response.changed = true;
        }
        if response.hovered {
            self.request_cursor(CursorIcon::Pointer);
        }

        let label = self.alloc_str(label);
        let node = ViewNode::new(ViewKind::Toggle, id).with_data(NodeData::Toggle { label, on: *value });
        let nid = self.add(node);
        self.handle(nid, response)
    }
}
