use nabu_engine::coords::Vec2;

use crate::render::theme;
use crate::ui::Ui;
use crate::view::{Handle, Response, ViewKind, ViewNode};

impl Ui<'_> {
    /// Plain container laying children out in a column. Close with [`Ui::end`].
    pub fn container(&mut self) -> Handle<'_> {
        self.open_flow(ViewKind::Container, false)
    }

    /// Children side by side. Close with [`Ui::end`].
    pub fn row(&mut self) -> Handle<'_> {
        self.open_flow(ViewKind::Container, true)
    }

    /// Children stacked top to bottom. Close with [`Ui::end`].
    pub fn column(&mut self) -> Handle<'_> {
        self.open_flow(ViewKind::Container, false)
    }

    /// Floating panel at `pos`, drawn and hit-tested above the main tree.
    /// Close with [`Ui::end`].
    pub fn popup(&mut self, pos: Vec2) -> Handle<'_> {
        let id = self.next_id(ViewKind::Popup, None);
        let mut node = ViewNode::new(ViewKind::Popup, id);
        node.offset = pos;
        node.bg = theme::PANEL;
        node.radius = 6.0;
        node.elevation = 8.0;
        node.padding = 4.0;
        node.gap = 2.0;
        let nid = self.open(node, true);
        let response = Response { hovered: self.hovering(id), ..Response::default() };
        self.handle(nid, response)
    }

    fn open_flow(&mut self, kind: ViewKind, row: bool) -> Handle<'_> {
        let id = self.next_id(kind, None);
        let mut node = ViewNode::new(kind, id);
        node.row = row;
        let nid = self.open(node, false);
        let response = Response { hovered: self.hovering(id), ..Response::default() };
        self.handle(nid, response)
    }
}
