use crate::coords::Vec2;
use crate::scene::shapes::UvRect;

/// Line height as a multiple of font size.
pub const LINE_HEIGHT: f32 = 1.2;

/// Opaque handle to a font known to a [`GlyphSource`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

impl FontId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Placement data for one glyph, in pixels at [`GlyphSource::base_size`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GlyphMetrics {
    pub uv: UvRect,
    pub width: f32,
    pub height: f32,
    pub advance: f32,
    /// Offset of the bitmap's top-left from the pen position on the baseline.
    pub offset: Vec2,
}

impl GlyphMetrics {
    /// Returns these metrics rescaled to `font_size`.
    #[inline]
    pub fn scaled(self, base_size: f32, font_size: f32) -> GlyphMetrics {
        let s = if base_size > 0.0 { font_size / base_size } else { 0.0 };
        GlyphMetrics {
            uv: self.uv,
            width: self.width * s,
            height: self.height * s,
            advance: self.advance * s,
            offset: self.offset * s,
        }
    }
}

/// The glyph subsystem as seen by layout and emission.
pub trait GlyphSource {
    /// Pixel size the returned metrics are expressed at.
    fn base_size(&self) -> f32;

    /// Resolves a codepoint through the fallback chain to `(font, glyph index)`.
    fn glyph_index_for(&mut self, codepoint: char) -> (FontId, u32);

    /// Metrics and atlas placement for a glyph. May rasterize on demand and mark the atlas dirty.
    fn glyph_uv(&mut self, font: FontId, codepoint: char) -> GlyphMetrics;

    /// Uploads pending atlas changes. Called once per frame before render.
    fn update_atlas(&mut self);

    /// Width of `text` at `font_size` (sum of advances) and its single-line height.
    fn measure(&mut self, text: &str, font_size: f32) -> Vec2 {
        let base = self.base_size();
        let mut width = 0.0;
        for c in text.chars() {
            let (font, _) = self.glyph_index_for(c);
            width += self.glyph_uv(font, c).scaled(base, font_size).advance;
        }
        Vec2::new(width, font_size * LINE_HEIGHT)
    }
}
