use std::collections::HashMap;

use thiserror::Error;

use crate::coords::Vec2;
use crate::scene::shapes::UvRect;

use super::{FontId, GlyphMetrics, GlyphSource};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone, Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

const DEFAULT_ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Shelf packer over a square R8 atlas.
#[derive(Debug)]
struct Atlas {
    size: u32,
    pixels: Vec<u8>,
    cursor_x: u32,
    cursor_y: u32,
    shelf_height: u32,
    dirty: bool,
    version: u64,
}

impl Atlas {
    fn new(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; (size * size) as usize],
            cursor_x: 0,
            cursor_y: 0,
            shelf_height: 0,
            dirty: false,
            version: 0,
        }
    }

    /// Returns the top-left of a free `w × h` cell, or `None` when the atlas is full.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        let (w, h) = (w + GLYPH_PADDING, h + GLYPH_PADDING);
        if w > self.size || h > self.size {
            return None;
        }
        if self.cursor_x + w > self.size {
            self.cursor_x = 0;
            self.cursor_y += self.shelf_height;
            self.shelf_height = 0;
        }
        if self.cursor_y + h > self.size {
            return None;
        }
        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w;
        self.shelf_height = self.shelf_height.max(h);
        Some(at)
    }

    fn blit(&mut self, x: u32, y: u32, w: u32, coverage: &[u8]) {
        for (row, line) in coverage.chunks(w.max(1) as usize).enumerate() {
            let start = ((y + row as u32) * self.size + x) as usize;
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
        self.dirty = true;
    }

    fn uv(&self, x: u32, y: u32, w: u32, h: u32) -> UvRect {
        let s = self.size as f32;
        UvRect {
            u0: x as f32 / s,
            v0: y as f32 / s,
            u1: (x + w) as f32 / s,
            v1: (y + h) as f32 / s,
        }
    }
}

/// Owns a collection of loaded fonts and the glyph atlas they rasterize into.
///
/// Fonts are immutable after loading. Glyphs are rasterized on first use at
/// [`FontSystem::base_size`]; lookups walk the fonts in load order, so later
/// fonts act as fallbacks for codepoints earlier ones lack.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    base_size: f32,
    atlas: Atlas,
    cache: HashMap<(FontId, char), GlyphMetrics>,
    atlas_full_reported: bool,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::with_atlas(32.0, DEFAULT_ATLAS_SIZE)
    }

    pub fn with_atlas(base_size: f32, atlas_size: u32) -> Self {
        Self {
            fonts: Vec::new(),
            base_size,
            atlas: Atlas::new(atlas_size),
            cache: HashMap::new(),
            atlas_full_reported: false,
        }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    ///
    /// Returns the `FontId` that identifies the font in draw commands.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("font {} loaded ({} glyphs)", id.0, self.fonts[id.0].glyph_count());
        Ok(id)
    }

    #[inline]
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Atlas side length in pixels; the atlas is square and single-channel.
    #[inline]
    pub fn atlas_size(&self) -> u32 {
        self.atlas.size
    }

    /// Raw R8 coverage for upload.
    #[inline]
    pub fn atlas_pixels(&self) -> &[u8] {
        &self.atlas.pixels
    }

    /// Incremented by every [`GlyphSource::update_atlas`] that had pending changes.
    #[inline]
    pub fn atlas_version(&self) -> u64 {
        self.atlas.version
    }

    #[inline]
    pub fn atlas_dirty(&self) -> bool {
        self.atlas.dirty
    }

    fn rasterize(&mut self, font: FontId, codepoint: char) -> GlyphMetrics {
        let Some(f) = self.fonts.get(font.0) else {
            return GlyphMetrics::default();
        };
        let (m, coverage) = f.rasterize(codepoint, self.base_size);
        let (w, h) = (m.width as u32, m.height as u32);
        let mut metrics = GlyphMetrics {
            uv: UvRect::default(),
            width: m.width as f32,
            height: m.height as f32,
            advance: m.advance_width,
            // fontdue reports ymin relative to the baseline, +y up.
            offset: Vec2::new(m.xmin as f32, -(m.ymin as f32 + m.height as f32)),
        };
        if w == 0 || h == 0 {
            return metrics;
        }
        match self.atlas.allocate(w, h) {
            Some((x, y)) => {
                self.atlas.blit(x, y, w, &coverage);
                metrics.uv = self.atlas.uv(x, y, w, h);
            }
            None => {
                if !self.atlas_full_reported {
                    log::warn!("glyph atlas full ({}px); further glyphs render blank", self.atlas.size);
                    self.atlas_full_reported = true;
                }
                metrics.width = 0.0;
                metrics.height = 0.0;
            }
        }
        metrics
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSource for FontSystem {
    fn base_size(&self) -> f32 {
        self.base_size
    }

    fn glyph_index_for(&mut self, codepoint: char) -> (FontId, u32) {
        for (i, f) in self.fonts.iter().enumerate() {
            let idx = f.lookup_glyph_index(codepoint);
            if idx != 0 {
                return (FontId(i), idx as u32);
            }
        }
        (FontId(0), 0)
    }

    fn glyph_uv(&mut self, font: FontId, codepoint: char) -> GlyphMetrics {
        if let Some(m) = self.cache.get(&(font, codepoint)) {
            return *m;
        }
        let m = self.rasterize(font, codepoint);
        self.cache.insert((font, codepoint), m);
        m
    }

    fn update_atlas(&mut self) {
        if self.atlas.dirty {
            self.atlas.dirty = false;
            self.atlas.version += 1;
            log::trace!("glyph atlas v{} ({} glyphs cached)", self.atlas.version, self.cache.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_font_rejects_garbage() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(b"not a font").is_err());
        assert_eq!(fs.font_count(), 0);
    }

    #[test]
    fn no_fonts_yields_empty_metrics() {
        let mut fs = FontSystem::new();
        assert_eq!(fs.glyph_index_for('a'), (FontId(0), 0));
        assert_eq!(fs.glyph_uv(FontId(0), 'a'), GlyphMetrics::default());
        assert_eq!(fs.measure("abc", 14.0).x, 0.0);
    }

    #[test]
    fn shelf_packer_wraps_and_fills() {
        let mut atlas = Atlas::new(8);
        assert_eq!(atlas.allocate(3, 3), Some((0, 0)));
        assert_eq!(atlas.allocate(3, 3), Some((4, 0)));
        // Next one does not fit on the first shelf.
        assert_eq!(atlas.allocate(3, 3), Some((0, 4)));
        assert_eq!(atlas.allocate(3, 3), Some((4, 4)));
        assert_eq!(atlas.allocate(3, 3), None);
    }
}
