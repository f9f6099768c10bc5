use crate::coords::Vec2;
use crate::scene::shapes::UvRect;

use super::{FontId, GlyphMetrics, GlyphSource};

const CELLS: u32 = 16;

/// Deterministic glyph source with fixed advances and a virtual 16×16 atlas.
///
/// Used when no font is loaded and in tests: `measure("Ok", 16.0)` is always
/// `2 * advance` wide.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MonospaceGlyphs {
    pub base_size: f32,
    pub advance: f32,
}

impl Default for MonospaceGlyphs {
    fn default() -> Self {
        Self { base_size: 16.0, advance: 8.0 }
    }
}

impl GlyphSource for MonospaceGlyphs {
    fn base_size(&self) -> f32 {
        self.base_size
    }

    fn glyph_index_for(&mut self, codepoint: char) -> (FontId, u32) {
        (FontId(0), codepoint as u32)
    }

    fn glyph_uv(&mut self, _font: FontId, codepoint: char) -> GlyphMetrics {
        let cell = codepoint as u32 % (CELLS * CELLS);
        let step = 1.0 / CELLS as f32;
        let u0 = (cell % CELLS) as f32 * step;
        let v0 = (cell / CELLS) as f32 * step;
        let visible = !codepoint.is_whitespace();
        GlyphMetrics {
            uv: UvRect { u0, v0, u1: u0 + step, v1: v0 + step },
            width: if visible { self.advance } else { 0.0 },
            height: if visible { self.base_size } else { 0.0 },
            advance: self.advance,
            offset: Vec2::new(0.0, -self.base_size * 0.8),
        }
    }

    fn update_atlas(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_advances_with_font_size() {
        let mut g = MonospaceGlyphs::default();
        let size = g.measure("Ok", 16.0);
        assert_eq!(size.x, 16.0);
        let half = g.measure("Ok", 8.0);
        assert_eq!(half.x, 8.0);
        assert!((half.y - 9.6).abs() < 1e-5);
    }

    #[test]
    fn whitespace_has_advance_but_no_quad() {
        let mut g = MonospaceGlyphs::default();
        let m = g.glyph_uv(FontId(0), ' ');
        assert_eq!(m.advance, 8.0);
        assert_eq!(m.width, 0.0);
    }
}
