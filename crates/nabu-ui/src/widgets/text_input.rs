use nabu_engine::core::CursorIcon;
use nabu_engine::text::GlyphSource;

use crate::arena::ArenaStr;
use crate::painter::measure_text;
use crate::ui::Ui;
use crate::view::{Handle, NodeData, ViewKind, ViewNode};

/// Horizontal inset of the text inside the field.
const FIELD_INSET: f32 = 6.0;

impl Ui<'_> {
    /// Single-line editor over `buffer`, at most `max_chars` characters
    /// (0 = unlimited). Consumes typed characters, editing keys and committed
    /// IME text while focused; a press focuses it and places the caret.
    pub fn text_input(&mut self, label: &str, buffer: &mut String, max_chars: usize) -> Handle<'_> {
        let id = self.next_id(ViewKind::TextInput, Some(label));
        let mut response = self.interact(id);
        self.focusable(id);
        if response.hovered {
            self.request_cursor(CursorIcon::Text);
        }

        let font = self.cx.config.default_font_size;
        let rect = self.last_rect(id);
        let inner_w = (rect.size.x - 2.0 * FIELD_INSET).max(0.0);
        let max_chars = if max_chars == 0 { usize::MAX } else { max_chars };

        if response.focused {
            let cx = &mut *self.cx;
            let facts = &cx.store.facts;
            let edit = cx.store.persistent.edit_cursor(id, buffer);
            edit.clamp_to(buffer);

            if response.pressed {
                let x = facts.mouse().x - rect.origin.x - FIELD_INSET + edit.scroll_offset;
                let at = caret_from_x(cx.glyphs.as_mut(), buffer, font, x);
                edit.cursor = at;
                edit.anchor = at;
            }
            response.changed = edit.apply_facts(buffer, facts, max_chars);
            let caret_x = measure_text(cx.glyphs.as_mut(), &buffer[..edit.cursor], font).x;
            edit.ensure_visible(caret_x, inner_w);
        }

        let (cursor, composition) = match self.cx.store.persistent.edit(id) {
            Some(e) if response.focused => (e.cursor as u32, self.cx.store.facts.ime().composition.clone()),
            _ => (buffer.len() as u32, String::new()),
        };
        let text = self.alloc_str(buffer);
        let composition = self.alloc_str(&composition);
        let data = NodeData::TextInput {
            text,
            cursor,
            composition,
            focused: response.focused,
            placeholder: ArenaStr::EMPTY,
        };
        let mut node = ViewNode::new(ViewKind::TextInput, id).with_data(data);
        node.radius = 4.0;
        let nid = self.add(node);
        self.handle(nid, response)
    }
}

/// Byte offset of the char boundary closest to `x` pixels into `text`.
fn caret_from_x(glyphs: &mut dyn GlyphSource, text: &str, font: f32, x: f32) -> usize {
    if x <= 0.0 {
        return 0;
    }
    let mut prev_w = 0.0;
    for (i, c) in text.char_indices() {
        let end = i + c.len_utf8();
        let w = glyphs.measure(&text[..end], font).x;
        if x < w {
            return if x - prev_w < w - x { i } else { end };
        }
        prev_w = w;
    }
    text.len()
}
