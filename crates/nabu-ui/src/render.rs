//! Tree emission: walks the laid-out view tree in declaration order and
//! records draw commands (painter's algorithm).
//!
//! Each node emits its universal surface first (shadow, background, border,
//! glow, backdrop blur), then the primitives of its kind, then its children.
//! Scroll and canvas containers wrap their children in a clip and a
//! transform. Overlays follow the main tree; the debug overlay comes last.

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::{Color, MeshGradient};
use nabu_engine::scene::shapes::{Path, PathVerb, RoundedRectCmd};
use nabu_engine::scene::{Border, Transform};
use nabu_engine::text::LINE_HEIGHT;

use crate::animation::Slot;
use crate::arena::{FrameArena, NodeId};
use crate::config::Config;
use crate::layout::{
    canvas_transform, handle_id, header_id, header_rect, picker_regions, scroll_viewport, splitter_handle, HEADER_HEIGHT,
};
use crate::painter::Painter;
use crate::store::{Ephemeral, Persistent};
use crate::view::{NodeData, ViewKind, ViewNode};

/// Default palette.
pub mod theme {
    use nabu_engine::paint::Color;

    pub const TEXT: Color = Color::new(0.9, 0.9, 0.92, 1.0);
    pub const MUTED: Color = Color::new(0.55, 0.55, 0.6, 1.0);
    pub const ACCENT: Color = Color::new(0.35, 0.55, 0.95, 1.0);
    pub const TRACK: Color = Color::new(0.18, 0.18, 0.22, 1.0);
    pub const FIELD: Color = Color::new(0.12, 0.12, 0.15, 1.0);
    pub const PANEL: Color = Color::new(0.15, 0.15, 0.18, 1.0);
    pub const BUTTON: Color = Color::new(0.25, 0.25, 0.3, 1.0);
    pub const DEBUG: Color = Color::new(1.0, 0.2, 0.6, 0.8);

    /// Offsets from a button's base color while hovered and while held.
    pub const HOVER_LIFT: f32 = 0.1;
    pub const PRESS_DIP: f32 = 0.05;
    pub const PRESS_SCALE: f32 = 0.96;
}

/// Six-stop hue ramp (red, yellow, green, cyan, blue, magenta).
const RAINBOW: [Color; 7] = [
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(1.0, 1.0, 0.0, 1.0),
    Color::new(0.0, 1.0, 0.0, 1.0),
    Color::new(0.0, 1.0, 1.0, 1.0),
    Color::new(0.0, 0.0, 1.0, 1.0),
    Color::new(1.0, 0.0, 1.0, 1.0),
    Color::new(1.0, 0.0, 0.0, 1.0),
];

/// Fully saturated color at `hue` in `0..=1` along the rainbow ramp.
pub fn hue_color(hue: f32) -> Color {
    let h = hue.clamp(0.0, 1.0) * 6.0;
    let i = (h.floor() as usize).min(5);
    RAINBOW[i].lerp(RAINBOW[i + 1], h - i as f32)
}

/// Color under normalized `(u, v)` of a saturation/value square whose
/// top-right corner is `hue`.
pub fn sv_color(hue: Color, u: f32, v: f32) -> Color {
    let top = Color::WHITE.lerp(hue, u.clamp(0.0, 1.0));
    top.lerp(Color::BLACK, v.clamp(0.0, 1.0))
}

fn shade(c: Color, by: f32) -> Color {
    Color::new((c.r + by).clamp(0.0, 1.0), (c.g + by).clamp(0.0, 1.0), (c.b + by).clamp(0.0, 1.0), c.a)
}

fn fg_or(n: &ViewNode, fallback: Color) -> Color {
    if n.fg.is_visible() { n.fg } else { fallback }
}

fn surface(n: &ViewNode, color: Color) -> RoundedRectCmd {
    RoundedRectCmd::new(n.rect, n.radius, color)
        .elevation(n.elevation)
        .squircle(n.squircle)
        .border(n.border)
        .glow(n.glow)
        .backdrop_blur(n.backdrop_blur)
        .wobble(n.wobble)
}

/// Everything emission reads, plus the outputs it produces.
pub(crate) struct Emitter<'a> {
    pub arena: &'a FrameArena<ViewNode>,
    pub painter: Painter<'a>,
    pub eph: &'a Ephemeral,
    pub persistent: &'a mut Persistent,
    pub config: &'a Config,
    /// Seconds since the context started; drives the caret blink.
    pub time: f64,
    /// Screen rectangle of the focused text input's caret.
    pub ime_area: Option<Rect>,
}

impl Emitter<'_> {
    pub fn emit_all(&mut self, roots: &[NodeId], overlays: &[NodeId]) {
        for &r in roots {
            self.node(r);
        }
        for &o in overlays {
            self.node(o);
        }
        if self.config.show_debug_overlay {
            self.debug_overlay(roots.iter().chain(overlays));
        }
    }

    fn node(&mut self, id: NodeId) {
        let Some(&n) = self.arena.node(id) else { return };

        match n.kind {
            ViewKind::Button => self.button(&n),
            _ => {
                if n.has_surface() || n.backdrop_blur > 0.0 {
                    self.painter.rounded_rect(surface(&n, n.bg));
                }
                self.visuals(&n);
            }
        }

        if n.first_child.is_none() {
            return;
        }
        if n.kind.scrolls() {
            let offset = self.persistent.scroll(n.id).offset;
            self.painter.push_clip(scroll_viewport(&n));
            self.painter.push_transform(Transform::translation(-offset));
            self.children(&n);
            self.painter.pop_transform();
            self.painter.pop_clip();
        } else if n.kind == ViewKind::Canvas {
            let view = self.persistent.canvas(n.id);
            self.painter.push_clip(n.rect);
            self.painter.push_transform(canvas_transform(n.rect.origin, view.pan, view.zoom));
            self.children(&n);
            self.painter.pop_transform();
            self.painter.pop_clip();
        } else {
            self.children(&n);
        }
    }

    fn children(&mut self, n: &ViewNode) {
        let mut cur = n.first_child;
        while let Some(c) = self.arena.node(cur) {
            let next = c.next_sibling;
            self.node(cur);
            cur = next;
        }
    }

    fn animate_color(&mut self, n: &ViewNode, slot: Slot, target: Color) -> Color {
        let (params, off) = (self.config.spring, self.config.disable_animation);
        self.persistent.animations.transition_color(slot.key(n.id), target, params, off)
    }

    fn animate_f32(&mut self, n: &ViewNode, slot: Slot, target: f32, stiff: bool) -> f32 {
        let params = if stiff { self.config.stiff_spring } else { self.config.spring };
        let off = self.config.disable_animation;
        self.persistent.animations.transition_f32(slot.key(n.id), target, params, off)
    }

    // ── per-kind visuals ──────────────────────────────────────────────────

    fn button(&mut self, n: &ViewNode) {
        let hot = self.eph.hot() == n.id;
        let held = self.eph.active() == n.id;
        let target = if held {
            shade(n.bg, -theme::PRESS_DIP)
        } else if hot {
            shade(n.bg, theme::HOVER_LIFT)
        } else {
            n.bg
        };
        let bg = self.animate_color(n, Slot::Background, target);
        let scale = self.animate_f32(n, Slot::Scale, if held { theme::PRESS_SCALE } else { 1.0 }, true);

        let scaled = (scale - 1.0).abs() > 1e-4;
        if scaled {
            let c = n.rect.center();
            self.painter.push_transform(Transform::new(c * (1.0 - scale), scale));
        }
        self.painter.rounded_rect(surface(n, bg));
        if let NodeData::Button { label, .. } = n.data {
            let fg = fg_or(n, theme::TEXT);
            self.painter.text_centered(self.arena.str(label), n.font_size, fg, n.rect.inset(n.padding));
        }
        if scaled {
            self.painter.pop_transform();
        }
    }

    fn visuals(&mut self, n: &ViewNode) {
        let arena = self.arena;
        let inner = n.rect.inset(n.padding);
        let font = n.font_size;
        match n.data {
            NodeData::Text { text } | NodeData::Markdown { text } => {
                self.painter.text(arena.str(text), font, fg_or(n, theme::TEXT), inner.origin);
            }
            NodeData::TextInput { .. } => self.text_input(n, inner),
            NodeData::Toggle { label, on } => {
                let track = Rect::new(inner.origin.x, inner.center().y - 10.0, 36.0, 20.0);
                let t = self.animate_f32(n, Slot::Position, if on { 1.0 } else { 0.0 }, false);
                let fill = theme::TRACK.lerp(theme::ACCENT, t.clamp(0.0, 1.0));
                self.painter.fill_rounded_rect(track, 10.0, fill);
                let knob = Vec2::new(track.origin.x + 10.0 + 16.0 * t, track.center().y);
                self.painter.fill_circle(knob, 8.0, theme::TEXT);
                let text = arena.str(label);
                let y = inner.center().y - font * LINE_HEIGHT * 0.5;
                self.painter.text(text, font, fg_or(n, theme::TEXT), Vec2::new(inner.origin.x + 44.0, y));
            }
            NodeData::Range { value, min, max, label } => {
                let t = if max > min { ((value - min) / (max - min)).clamp(0.0, 1.0) } else { 0.0 };
                match n.kind {
                    ViewKind::Fader => self.fader(n, inner, t),
                    ViewKind::Knob => self.knob(n, inner, t, arena.str(label)),
                    _ => self.slider(n, inner, t),
                }
            }
            NodeData::Dragger { label, value } => {
                self.painter.fill_rounded_rect(inner, 4.0, theme::FIELD);
                let text = format!("{}: {value:.2}", arena.str(label));
                self.painter.text_centered(&text, font, fg_or(n, theme::TEXT), inner);
            }
            NodeData::Header { label, open, .. } => self.header(n, arena.str(label), open),
            NodeData::ColorPicker { color, hue, .. } => self.color_picker(n, color, hue),
            NodeData::Plot { samples, bars } => self.plot(n, inner, arena.get(samples), bars),
            NodeData::Bezier { points, thickness } => {
                self.painter.bezier(points, thickness.max(1.0), fg_or(n, theme::ACCENT));
            }
            NodeData::Table { row_height, header, .. } if !header.is_empty() => {
                let strip = Rect::new(n.rect.origin.x, n.rect.origin.y, n.rect.size.x, row_height.min(n.rect.size.y));
                self.painter.fill_rect(strip, theme::TRACK);
                let origin = Vec2::new(strip.origin.x + 6.0, strip.center().y - font * LINE_HEIGHT * 0.5);
                self.painter.text(arena.str(header), font, theme::MUTED, origin);
            }
            NodeData::Splitter { .. } => {
                let hot = self.eph.hot() == handle_id(n.id) || self.eph.active() == handle_id(n.id);
                let color = self.animate_color(n, Slot::Highlight, if hot { theme::ACCENT } else { theme::TRACK });
                self.painter.fill_rect(splitter_handle(n), color);
            }
            NodeData::Menu { label, open } => {
                let hot = self.eph.hot() == n.id;
                if open || hot {
                    self.painter.fill_rounded_rect(n.rect, 4.0, shade(theme::PANEL, 0.1));
                }
                self.painter.text_centered(arena.str(label), font, fg_or(n, theme::TEXT), n.rect);
            }
            NodeData::MenuItem { label, shortcut } => {
                if self.eph.hot() == n.id {
                    self.painter.fill_rounded_rect(n.rect, 4.0, theme::ACCENT);
                }
                let y = n.rect.center().y - font * LINE_HEIGHT * 0.5;
                self.painter.text(arena.str(label), font, fg_or(n, theme::TEXT), Vec2::new(inner.origin.x + 8.0, y));
                let shortcut = arena.str(shortcut);
                if !shortcut.is_empty() {
                    let w = self.painter.measure_text(shortcut, font).x;
                    let x = n.rect.origin.x + n.rect.size.x - w - 8.0;
                    self.painter.text(shortcut, font, theme::MUTED, Vec2::new(x, y));
                }
            }
            NodeData::DropTarget { hovering: true, .. } => {
                let outline = RoundedRectCmd::new(n.rect, n.radius.max(4.0), Color::TRANSPARENT)
                    .border(Some(Border::new(2.0, theme::ACCENT)));
                self.painter.rounded_rect(outline);
            }
            _ => {}
        }
    }

    fn slider(&mut self, n: &ViewNode, inner: Rect, t: f32) {
        let y = inner.center().y;
        let x0 = inner.origin.x + 8.0;
        let x1 = inner.origin.x + inner.size.x - 8.0;
        let x = x0 + (x1 - x0).max(0.0) * t;
        self.painter.line(Vec2::new(x0, y), Vec2::new(x1, y), 4.0, theme::TRACK);
        self.painter.line(Vec2::new(x0, y), Vec2::new(x, y), 4.0, fg_or(n, theme::ACCENT));
        let r = self.animate_f32(n, Slot::Scale, if self.eph.active() == n.id { 9.0 } else { 7.0 }, true);
        self.painter.fill_circle(Vec2::new(x, y), r, theme::TEXT);
    }

    fn fader(&mut self, n: &ViewNode, inner: Rect, t: f32) {
        let x = inner.center().x;
        let y0 = inner.origin.y + inner.size.y - 8.0;
        let y1 = inner.origin.y + 8.0;
        let y = y0 - (y0 - y1).max(0.0) * t;
        self.painter.line(Vec2::new(x, y0), Vec2::new(x, y1), 4.0, theme::TRACK);
        self.painter.line(Vec2::new(x, y0), Vec2::new(x, y), 4.0, fg_or(n, theme::ACCENT));
        self.painter.fill_rounded_rect(Rect::new(x - 12.0, y - 5.0, 24.0, 10.0), 3.0, theme::TEXT);
    }

    fn knob(&mut self, n: &ViewNode, inner: Rect, t: f32, label: &str) {
        let label_h = n.font_size * LINE_HEIGHT;
        let dial = Rect::new(inner.origin.x, inner.origin.y, inner.size.x, (inner.size.y - label_h).max(0.0));
        let c = dial.center();
        let r = (dial.size.x.min(dial.size.y) * 0.5 - 4.0).max(1.0);
        self.painter.fill_circle(c, r, theme::TRACK);

        // 270° sweep starting at the lower left.
        let start = std::f32::consts::PI * 0.75;
        let sweep = std::f32::consts::PI * 1.5;
        let at = |a: f32| c + Vec2::new(a.cos(), a.sin()) * (r + 2.0);
        let steps = 24;
        let points: Vec<Vec2> = (0..=steps).map(|i| at(start + sweep * t * i as f32 / steps as f32)).collect();
        self.painter.path(Path::polyline(&points, 3.0, fg_or(n, theme::ACCENT)));
        let tip = c + Vec2::new((start + sweep * t).cos(), (start + sweep * t).sin()) * (r * 0.7);
        self.painter.line(c, tip, 2.0, theme::TEXT);

        let w = self.painter.measure_text(label, n.font_size).x;
        let origin = Vec2::new(inner.center().x - w * 0.5, dial.origin.y + dial.size.y);
        self.painter.text(label, n.font_size, theme::MUTED, origin);
    }

    fn header(&mut self, n: &ViewNode, label: &str, open: bool) {
        let strip = header_rect(n);
        if n.kind != ViewKind::TreeNode {
            let hot = self.eph.hot() == header_id(n.id);
            let base = if n.kind == ViewKind::GraphNode { theme::TRACK } else { theme::PANEL };
            let color = self.animate_color(n, Slot::Highlight, if hot { shade(base, 0.08) } else { base });
            self.painter.fill_rounded_rect(strip, n.radius.min(HEADER_HEIGHT * 0.5), color);
        }
        let cx = strip.origin.x + 12.0;
        let cy = strip.center().y;
        let openness = self.animate_f32(n, Slot::Openness, if open { 1.0 } else { 0.0 }, true);
        let verbs = if openness > 0.5 {
            vec![
                PathVerb::MoveTo(Vec2::new(cx - 4.0, cy - 2.0)),
                PathVerb::LineTo(Vec2::new(cx + 4.0, cy - 2.0)),
                PathVerb::LineTo(Vec2::new(cx, cy + 3.0)),
                PathVerb::Close,
            ]
        } else {
            vec![
                PathVerb::MoveTo(Vec2::new(cx - 2.0, cy - 4.0)),
                PathVerb::LineTo(Vec2::new(cx + 3.0, cy)),
                PathVerb::LineTo(Vec2::new(cx - 2.0, cy + 4.0)),
                PathVerb::Close,
            ]
        };
        self.painter.path(Path::filled(verbs, theme::MUTED));
        let origin = Vec2::new(strip.origin.x + 24.0, cy - n.font_size * LINE_HEIGHT * 0.5);
        self.painter.text(label, n.font_size, fg_or(n, theme::TEXT), origin);
    }

    fn color_picker(&mut self, n: &ViewNode, color: Color, hue: f32) {
        let (sv_rect, strip) = picker_regions(n);
        let pure = hue_color(hue);
        self.painter.mesh_gradient(sv_rect, MeshGradient::corners(Color::WHITE, pure, Color::BLACK, Color::BLACK));
        let sv = self.persistent.picker(n.id).sv;
        let marker = sv_rect.origin + Vec2::new(sv.x * sv_rect.size.x, sv.y * sv_rect.size.y);
        self.painter.fill_circle(marker, 5.0, Color::WHITE);
        self.painter.fill_circle(marker, 3.5, color.with_alpha(1.0));

        let seg = strip.size.y / 6.0;
        for (i, pair) in RAINBOW.windows(2).enumerate() {
            let r = Rect::new(strip.origin.x, strip.origin.y + seg * i as f32, strip.size.x, seg);
            self.painter.mesh_gradient(r, MeshGradient::corners(pair[0], pair[0], pair[1], pair[1]));
        }
        let marker_y = strip.origin.y + hue.clamp(0.0, 1.0) * strip.size.y;
        self.painter.fill_rect(Rect::new(strip.origin.x - 2.0, marker_y - 1.5, strip.size.x + 4.0, 3.0), Color::WHITE);

        let width = strip.origin.x + strip.size.x - sv_rect.origin.x;
        let swatch = Rect::new(sv_rect.origin.x, sv_rect.origin.y + sv_rect.size.y + 8.0, width, 22.0);
        let cmd = RoundedRectCmd::new(swatch, 4.0, color).border(Some(Border::new(1.0, theme::TRACK)));
        self.painter.rounded_rect(cmd);
    }

    fn plot(&mut self, n: &ViewNode, inner: Rect, samples: &[f32], bars: bool) {
        self.painter.fill_rounded_rect(n.rect, n.radius, theme::FIELD);
        if samples.is_empty() || inner.is_empty() {
            return;
        }
        let (lo, hi) = samples
            .iter()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if !lo.is_finite() {
            return;
        }
        let span = if hi > lo { hi - lo } else { 1.0 };
        let norm = |v: f32| if v.is_finite() { ((v - lo) / span).clamp(0.0, 1.0) } else { 0.0 };
        let color = fg_or(n, theme::ACCENT);
        let bottom = inner.origin.y + inner.size.y;

        if bars {
            let w = inner.size.x / samples.len() as f32;
            for (i, &v) in samples.iter().enumerate() {
                let h = norm(v) * inner.size.y;
                let bar = Rect::new(inner.origin.x + w * i as f32 + 1.0, bottom - h, (w - 2.0).max(1.0), h);
                self.painter.fill_rect(bar, color);
            }
        } else {
            let step = if samples.len() > 1 { inner.size.x / (samples.len() - 1) as f32 } else { 0.0 };
            let points: Vec<Vec2> = samples
                .iter()
                .enumerate()
                .map(|(i, &v)| Vec2::new(inner.origin.x + step * i as f32, bottom - norm(v) * inner.size.y))
                .collect();
            self.painter.path(Path::polyline(&points, 2.0, color));
        }
    }

    fn text_input(&mut self, n: &ViewNode, inner: Rect) {
        let NodeData::TextInput { text, cursor, composition, focused, placeholder } = n.data else { return };
        let arena = self.arena;
        let text = arena.str(text);
        let composition = arena.str(composition);
        let font = n.font_size;

        let border = if focused { theme::ACCENT } else { theme::TRACK };
        let border = self.animate_color(n, Slot::Highlight, border);
        let field = RoundedRectCmd::new(n.rect, n.radius.max(4.0), theme::FIELD).border(Some(Border::new(1.0, border)));
        self.painter.rounded_rect(field);

        let field_inner = Rect::new(inner.origin.x + 6.0, inner.origin.y, (inner.size.x - 12.0).max(0.0), inner.size.y);
        let scroll = self.persistent.edit(n.id).map_or(0.0, |e| e.scroll_offset);
        let y = field_inner.center().y - font * LINE_HEIGHT * 0.5;
        let origin = Vec2::new(field_inner.origin.x - scroll, y);

        self.painter.push_clip(field_inner);
        if text.is_empty() && composition.is_empty() && !focused {
            self.painter.text(arena.str(placeholder), font, theme::MUTED, origin);
        } else {
            self.painter.text(text, font, fg_or(n, theme::TEXT), origin);
        }

        if focused {
            let split = (cursor as usize).min(text.len());
            let before = text.get(..split).unwrap_or(text);
            let caret_x = origin.x + self.painter.measure_text(before, font).x;
            let mut caret_end = caret_x;
            if !composition.is_empty() {
                let w = self.painter.measure_text(composition, font).x;
                self.painter.fill_rect(Rect::new(caret_x, y, w, font * LINE_HEIGHT), theme::FIELD);
                self.painter.text(composition, font, theme::TEXT, Vec2::new(caret_x, y));
                let under = y + font * LINE_HEIGHT - 1.0;
                self.painter.line(Vec2::new(caret_x, under), Vec2::new(caret_x + w, under), 1.0, theme::TEXT);
                caret_end += w;
            }
            let caret = Rect::new(caret_end, y, 1.5, font * LINE_HEIGHT);
            if self.time.rem_euclid(1.0) < 0.5 {
                self.painter.fill_rect(caret, theme::TEXT);
            }
            self.ime_area = Some(self.painter.list.current_transform().apply_rect(caret));
        }
        self.painter.pop_clip();
    }

    // ── debug ─────────────────────────────────────────────────────────────

    /// Outlines every committed hit rectangle.
    fn debug_overlay<'n>(&mut self, roots: impl Iterator<Item = &'n NodeId>) {
        let mut stack: Vec<NodeId> = roots.copied().collect();
        while let Some(id) = stack.pop() {
            let Some(n) = self.arena.node(id) else { continue };
            if let Some(r) = self.persistent.rect(n.id) {
                if !r.is_empty() {
                    let outline = RoundedRectCmd::new(r, 0.0, Color::TRANSPARENT).border(Some(Border::new(1.0, theme::DEBUG)));
                    self.painter.rounded_rect(outline);
                }
            }
            let mut cur = n.first_child;
            while let Some(c) = self.arena.node(cur) {
                stack.push(cur);
                cur = c.next_sibling;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_ramp_hits_primaries() {
        assert_eq!(hue_color(0.0), Color::new(1.0, 0.0, 0.0, 1.0));
        let g = hue_color(2.0 / 6.0);
        assert!((g.g - 1.0).abs() < 1e-5 && g.r.abs() < 1e-5);
        assert_eq!(hue_color(1.0), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(hue_color(7.0), hue_color(1.0));
    }

    #[test]
    fn sv_corners() {
        let hue = hue_color(0.5);
        assert_eq!(sv_color(hue, 0.0, 0.0), Color::WHITE);
        assert_eq!(sv_color(hue, 1.0, 0.0), hue);
        assert_eq!(sv_color(hue, 0.3, 1.0), Color::BLACK);
    }

    #[test]
    fn shade_clamps_channels() {
        let c = shade(Color::new(0.95, 0.5, 0.02, 0.5), 0.1);
        assert_eq!((c.r, c.a), (1.0, 0.5));
        assert!((c.g - 0.6).abs() < 1e-6 && (c.b - 0.12).abs() < 1e-6);
        assert_eq!(shade(Color::BLACK, -0.1), Color::BLACK);
    }
}
