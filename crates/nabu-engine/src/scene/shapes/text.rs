use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontId;

/// Normalized atlas coordinates of a glyph.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// One positioned glyph quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphCmd {
    pub rect: Rect,
    pub uv: UvRect,
    pub color: Color,
}

/// A contiguous range of `TextGlyph` commands emitted for one text block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlyphRun {
    pub font: FontId,
    /// Index of the first glyph command in [`DrawList::items`].
    pub first: u32,
    pub len: u32,
}

impl DrawList {
    /// Records a single glyph quad.
    #[inline]
    pub fn push_glyph(&mut self, pos: Vec2, size: Vec2, uv: UvRect, color: Color) {
        self.push(DrawCmd::TextGlyph(GlyphCmd {
            rect: Rect::from_origin_size(pos, size),
            uv,
            color,
        }));
    }

    /// Records every glyph of a text block and registers the run in the side table.
    ///
    /// Nothing is recorded when `glyphs` is empty.
    pub fn push_glyph_run(&mut self, font: FontId, glyphs: impl IntoIterator<Item = GlyphCmd>) {
        let first = self.items.len() as u32;
        for g in glyphs {
            self.push(DrawCmd::TextGlyph(g));
        }
        let len = self.items.len() as u32 - first;
        if len > 0 {
            self.glyph_runs.push(GlyphRun { font, first, len });
        }
    }
}
