use nabu_engine::coords::Vec2;
use nabu_engine::core::CursorIcon;

use crate::id::{fnv1a, Id};
use crate::interaction::edge_press;
use crate::render::theme;
use crate::store::StateStore;
use crate::ui::Ui;
use crate::view::{Align, Handle, NodeData, Response, ViewKind, ViewNode};

impl Ui<'_> {
    /// Horizontal strip of [`Ui::menu`] headers. Close with [`Ui::end`].
    pub fn menu_bar(&mut self) -> Handle<'_> {
        let id = self.next_id(ViewKind::MenuBar, None);
        self.cx.store.ephemeral.menu_bar = id;
        let mut node = ViewNode::new(ViewKind::MenuBar, id);
        node.row = true;
        node.bg = theme::PANEL;
        node.padding = 2.0;
        node.gap = 2.0;
        node.align = Align::Center;
        let nid = self.open(node, false);
        let hovered = self.hovering(id);
        self.handle(nid, Response { hovered, ..Response::default() })
    }

    /// Menu header. At most one menu is open at a time; pressing a header
    /// toggles it, and while one is open hovering another header switches to
    /// it. A press anywhere outside the header and its popup closes it.
    ///
    /// When [`Handle::expanded`] is true a popup below the header is open;
    /// add [`Ui::menu_item`]s and close it with [`Ui::end`].
    pub fn menu(&mut self, label: &str) -> Handle<'_> {
        let id = self.next_id(ViewKind::Menu, Some(label));
        let response = self.interact(id);
        let persistent = &mut self.cx.store.persistent;
        let was_open = persistent.open_menu == id;
        if response.pressed {
            persistent.open_menu = if was_open { Id::NONE } else { id };
        } else if response.hovered && persistent.open_menu.is_some() && !was_open {
            persistent.open_menu = id;
        }
        let open = persistent.open_menu == id;
        if response.hovered {
            self.request_cursor(CursorIcon::Pointer);
        }

        let label_str = self.alloc_str(label);
        let nid = self.add(ViewNode::new(ViewKind::Menu, id).with_data(NodeData::Menu { label: label_str, open }));
        if open {
            let header = self.last_rect(id);
            let at = Vec2::new(header.origin.x, header.origin.y + header.size.y);
            let pid = popup_id(id);
            let mut popup = ViewNode::new(ViewKind::Popup, pid);
            popup.offset = at;
            popup.bg = theme::PANEL;
            popup.radius = 6.0;
            popup.elevation = 8.0;
            popup.padding = 4.0;
            popup.gap = 2.0;
            self.open(popup, true);
        }
        self.handle(nid, Response { expanded: open, changed: was_open != open, ..response })
    }

    /// Entry of an open menu. Clicking it closes the menu.
    pub fn menu_item(&mut self, label: &str, shortcut: &str) -> Handle<'_> {
        let id = self.next_id(ViewKind::MenuItem, Some(label));
        let response = self.interact(id);
        if response.clicked {
            self.cx.store.persistent.open_menu = Id::NONE;
        }
        if response.hovered {
            self.request_cursor(CursorIcon::Pointer);
        }
        let label = self.alloc_str(label);
        let shortcut = self.alloc_str(shortcut);
        let nid = self.add(ViewNode::new(ViewKind::MenuItem, id).with_data(NodeData::MenuItem { label, shortcut }));
        self.handle(nid, response)
    }
}

/// Id of a menu's popup. Derived from the header alone so that opening the
/// menu leaves the ordinals of the header's later siblings untouched.
#[inline]
fn popup_id(menu: Id) -> Id {
    menu.mix(fnv1a(b"popup"))
}

/// Closes the open menu when a press lands outside its header and every
/// overlay. Runs after the build, so a press on the header itself (which
/// toggles) or on an item is left alone.
pub(crate) fn close_on_outside_press(store: &mut StateStore) {
    let persistent = &mut store.persistent;
    let menu = persistent.open_menu;
    if menu.is_none() || !edge_press(&store.facts) {
        return;
    }
    let mouse = store.facts.mouse();
    let on_header = persistent.rect(menu).is_some_and(|r| r.contains(mouse));
    let on_overlay = persistent.overlay_rects().iter().any(|r| r.contains(mouse));
    if !on_header && !on_overlay {
        log::debug!("menu {menu:?} closed by outside press");
        persistent.open_menu = Id::NONE;
    }
}
