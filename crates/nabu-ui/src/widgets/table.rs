use nabu_engine::coords::Vec2;

use crate::layout::TABLE_VISIBLE_ROWS;
use crate::ui::Ui;
use crate::view::{Align, Handle, NodeData, ViewKind, ViewNode};

/// Builds one table row: `(ui, row_index, user_data)`. Called inside an
/// open row container scoped by the row index.
pub type RowBuilder = fn(&mut Ui<'_>, usize, usize);

/// Half-open range of rows intersecting a viewport scrolled by `offset`.
fn visible_rows(rows: usize, row_height: f32, offset: f32, viewport: f32) -> (usize, usize) {
    if rows == 0 || row_height <= 0.0 {
        return (0, 0);
    }
    let first = (offset.max(0.0) / row_height).floor() as usize;
    let last = ((offset.max(0.0) + viewport.max(0.0)) / row_height).ceil() as usize;
    (first.min(rows), last.min(rows))
}

impl Ui<'_> {
    /// Virtualized, vertically scrolling table of `rows` fixed-height rows.
    ///
    /// Only rows inside last frame's viewport are built; `row` is invoked for
    /// each with `user_data` passed through. An empty `header` omits the
    /// header strip. The table is closed before returning.
    pub fn table(
        &mut self,
        label: &str,
        rows: usize,
        row_height: f32,
        header: &str,
        row: RowBuilder,
        user_data: usize,
    ) -> Handle<'_> {
        let id = self.next_id(ViewKind::Table, Some(label));
        let row_height = if row_height.is_finite() && row_height > 0.0 { row_height } else { 24.0 };
        let header_h = if header.is_empty() { 0.0 } else { row_height };
        let hovered = self.hovering(id);
        let response = self.drag_scroll(id, hovered, true);

        let last = self.last_rect(id);
        let viewport = if last.is_empty() {
            TABLE_VISIBLE_ROWS as f32 * row_height
        } else {
            last.size.y - header_h
        };
        let width = if last.is_empty() { 200.0 } else { last.size.x };
        let offset = self.cx.store.persistent.scroll(id).offset.y;
        let (first, end) = visible_rows(rows, row_height, offset, viewport);

        let header = self.alloc_str(header);
        let data = NodeData::Table { rows: rows.min(u32::MAX as usize) as u32, row_height, header };
        let nid = self.open(ViewNode::new(ViewKind::Table, id).with_data(data), false);

        for i in first..end {
            self.push_id(i);
            let rid = self.next_id(ViewKind::Container, Some("row"));
            let mut node = ViewNode::new(ViewKind::Container, rid);
            node.row = true;
            node.absolute = true;
            node.offset = Vec2::new(0.0, header_h + i as f32 * row_height);
            node.width = width;
            node.height = row_height;
            node.gap = 4.0;
            node.align = Align::Center;
            self.open(node, false);
            row(self, i, user_data);
            self.end();
            self.pop_id();
        }
        self.end();
        log::trace!("table {id:?}: rows {first}..{end} of {rows}");
        self.handle(nid, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_rows_cover_the_viewport() {
        assert_eq!(visible_rows(100, 20.0, 0.0, 200.0), (0, 10));
        assert_eq!(visible_rows(100, 20.0, 30.0, 200.0), (1, 12));
        assert_eq!(visible_rows(5, 20.0, 0.0, 200.0), (0, 5));
    }

    #[test]
    fn visible_rows_degenerate_inputs() {
        assert_eq!(visible_rows(0, 20.0, 0.0, 200.0), (0, 0));
        assert_eq!(visible_rows(10, 0.0, 0.0, 200.0), (0, 0));
        assert_eq!(visible_rows(10, 20.0, 1e6, 200.0), (10, 10));
    }
}
