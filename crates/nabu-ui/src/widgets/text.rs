use crate::ui::Ui;
use crate::view::{Handle, NodeData, Response, ViewKind, ViewNode};

impl Ui<'_> {
    /// A run of text; `\n` starts a new line. Font size is inherited unless set.
    pub fn text(&mut self, text: &str) -> Handle<'_> {
        self.text_leaf(ViewKind::Text, text)
    }

    /// Block of plain text lines. Markup is shown verbatim.
    pub fn markdown(&mut self, text: &str) -> Handle<'_> {
        self.text_leaf(ViewKind::Markdown, text)
    }

    fn text_leaf(&mut self, kind: ViewKind, text: &str) -> Handle<'_> {
        let id = self.next_id(kind, None);
        let text = self.alloc_str(text);
        let data = match kind {
            ViewKind::Markdown => NodeData::Markdown { text },
            _ => NodeData::Text { text },
        };
        let nid = self.add(ViewNode::new(kind, id).with_data(data));
        self.handle(nid, Response::default())
    }
}
