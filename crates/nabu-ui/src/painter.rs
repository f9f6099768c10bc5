use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::{Color, MeshGradient};
use nabu_engine::scene::shapes::{GlyphCmd, Path, RoundedRectCmd};
use nabu_engine::scene::{DrawList, Transform};
use nabu_engine::text::{GlyphSource, LINE_HEIGHT};

/// Baseline of the first line, as a fraction of font size below the line top.
const BASELINE: f32 = 0.9;

/// Size of `text` at `size`: widest line by glyph advances, one line height per line.
pub fn measure_text(glyphs: &mut dyn GlyphSource, text: &str, size: f32) -> Vec2 {
    let mut width: f32 = 0.0;
    let mut lines = 0;
    for line in text.split('\n') {
        width = width.max(glyphs.measure(line, size).x);
        lines += 1;
    }
    Vec2::new(width, lines as f32 * size * LINE_HEIGHT)
}

/// Drawing surface used by emission.
///
/// Wraps the frame's `DrawList` with widget-level helpers and lays text out
/// through the glyph source, one quad per visible glyph.
pub struct Painter<'a> {
    pub(crate) list: &'a mut DrawList,
    pub(crate) glyphs: &'a mut dyn GlyphSource,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(list: &'a mut DrawList, glyphs: &'a mut dyn GlyphSource) -> Self {
        Self { list, glyphs }
    }

    // ── text measurement ──────────────────────────────────────────────────

    #[inline]
    pub fn measure_text(&mut self, text: &str, size: f32) -> Vec2 {
        measure_text(self.glyphs, text, size)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.is_visible() {
            self.list.push_solid_rect(rect, color);
        }
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        if color.is_visible() {
            self.list.push_solid_rounded_rect(rect, radius, color);
        }
    }

    /// Rounded rectangle with every effect the backend supports.
    pub fn rounded_rect(&mut self, cmd: RoundedRectCmd) {
        self.list.push_rounded_rect(cmd);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if color.is_visible() {
            self.list.push_solid_circle(center, radius, color);
        }
    }

    pub fn line(&mut self, p0: Vec2, p1: Vec2, thickness: f32, color: Color) {
        self.list.push_line(p0, p1, thickness, color);
    }

    pub fn bezier(&mut self, points: [Vec2; 4], thickness: f32, color: Color) {
        self.list.push_bezier(points, thickness, color);
    }

    pub fn path(&mut self, path: Path) {
        self.list.push_path(path);
    }

    pub fn blur_rect(&mut self, rect: Rect, radius: f32, strength: f32) {
        self.list.push_blur_rect(rect, radius, strength);
    }

    pub fn mesh_gradient(&mut self, rect: Rect, gradient: MeshGradient) {
        self.list.push_mesh_gradient(rect, gradient);
    }

    /// Text with its first line's top-left at `origin`. Returns the advance width
    /// of the longest line.
    pub fn text(&mut self, text: &str, size: f32, color: Color, origin: Vec2) -> f32 {
        if text.is_empty() || size <= 0.0 {
            return 0.0;
        }
        let base = self.glyphs.base_size();
        let line_height = size * LINE_HEIGHT;
        let mut widest: f32 = 0.0;
        let mut quads = Vec::with_capacity(text.len());
        let mut run_font = None;

        for (i, line) in text.split('\n').enumerate() {
            let mut pen = Vec2::new(origin.x, origin.y + i as f32 * line_height + size * BASELINE);
            for c in line.chars() {
                let (font, _) = self.glyphs.glyph_index_for(c);
                let m = self.glyphs.glyph_uv(font, c).scaled(base, size);
                if m.width > 0.0 && m.height > 0.0 {
                    if run_font.is_some_and(|f| f != font) {
                        self.list.push_glyph_run(run_font.unwrap_or(font), quads.drain(..));
                    }
                    run_font = Some(font);
                    quads.push(GlyphCmd {
                        rect: Rect::from_origin_size(pen + m.offset, Vec2::new(m.width, m.height)),
                        uv: m.uv,
                        color,
                    });
                }
                pen.x += m.advance;
            }
            widest = widest.max(pen.x - origin.x);
        }
        if let Some(font) = run_font {
            self.list.push_glyph_run(font, quads);
        }
        widest
    }

    /// Text centered inside `rect` (single line).
    pub fn text_centered(&mut self, text: &str, size: f32, color: Color, rect: Rect) {
        let extent = self.measure_text(text, size);
        let origin = rect.origin + (rect.size - extent) * 0.5;
        self.text(text, size, color, origin);
    }

    // ── clipping & transforms ─────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`Painter::pop_clip`].
    pub fn push_clip(&mut self, rect: Rect) {
        self.list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.list.pop_clip();
    }

    /// Begin a transformed region. Must be paired with [`Painter::pop_transform`].
    pub fn push_transform(&mut self, transform: Transform) {
        self.list.push_transform(transform);
    }

    pub fn pop_transform(&mut self) {
        self.list.pop_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::scene::DrawCmd;
    use nabu_engine::text::MonospaceGlyphs;

    #[test]
    fn measure_multiline_takes_widest_line() {
        let mut g = MonospaceGlyphs::default();
        let size = measure_text(&mut g, "ab\nabcd", 16.0);
        assert_eq!(size.x, 32.0);
        assert!((size.y - 2.0 * 16.0 * LINE_HEIGHT).abs() < 1e-4);
    }

    #[test]
    fn empty_text_is_one_line_tall() {
        let mut g = MonospaceGlyphs::default();
        let size = measure_text(&mut g, "", 10.0);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 12.0).abs() < 1e-4);
    }

    #[test]
    fn text_emits_one_glyph_per_visible_char() {
        let mut list = DrawList::new();
        let mut g = MonospaceGlyphs::default();
        let mut p = Painter::new(&mut list, &mut g);
        let width = p.text("a b", 16.0, Color::WHITE, Vec2::ZERO);
        assert_eq!(width, 24.0);
        let glyphs = list.commands().filter(|c| matches!(c, DrawCmd::TextGlyph(_))).count();
        assert_eq!(glyphs, 2);
        assert_eq!(list.glyph_runs().len(), 1);
        assert_eq!(list.glyph_runs()[0].len, 2);
    }

    #[test]
    fn invisible_fills_are_skipped() {
        let mut list = DrawList::new();
        let mut g = MonospaceGlyphs::default();
        let mut p = Painter::new(&mut list, &mut g);
        p.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::TRANSPARENT);
        assert!(list.is_empty());
    }
}
