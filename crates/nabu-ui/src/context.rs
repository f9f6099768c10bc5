//! The per-window frame driver.
//!
//! A [`Context`] owns everything one UI surface needs across frames: the
//! frame arena, id stack, view tree wiring, state store, draw list, glyph
//! source and clock. Each frame runs the same fixed pipeline:
//!
//! ```text
//! begin_frame ─► build (Ui) ─► end_frame:
//!     unwind ─► focus ─► cleanup ─► callbacks ─► layout ─► emit ─► springs ─► advance facts
//! ```

use std::mem;
use std::path::{Path, PathBuf};

use nabu_engine::coords::{Rect, Viewport};
use nabu_engine::core::{Backend, CursorIcon};
use nabu_engine::input::{ImeEvent, InputEvent, MouseButton};
use nabu_engine::scene::DrawList;
use nabu_engine::text::{GlyphSource, MonospaceGlyphs};
use nabu_engine::time::{FrameClock, FrameTime};

use crate::arena::FrameArena;
use crate::config::Config;
use crate::error::FrameError;
use crate::focus;
use crate::id::IdStack;
use crate::layout;
use crate::painter::Painter;
use crate::render::Emitter;
use crate::store::StateStore;
use crate::ui::Ui;
use crate::view::{chain, Callback, NodeData, TreeState, ViewKind, ViewNode};
use crate::widgets;

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub dt: f32,
    pub node_count: usize,
    /// Arena bytes in use when the frame ended.
    pub arena_used: usize,
    pub command_count: usize,
    /// Degradations collected during the frame, one per kind.
    pub errors: Vec<FrameError>,
    /// Cursor the frame asked the platform to show.
    pub cursor: CursorIcon,
    /// Set on the frame a screenshot was requested for.
    pub screenshot: Option<PathBuf>,
    /// Caret rectangle of the focused text input, for IME candidate windows.
    pub ime_cursor_area: Option<Rect>,
}

impl FrameReport {
    fn empty(frame_index: u64) -> Self {
        Self {
            frame_index,
            dt: 0.0,
            node_count: 0,
            arena_used: 0,
            command_count: 0,
            errors: Vec::new(),
            cursor: CursorIcon::Default,
            screenshot: None,
            ime_cursor_area: None,
        }
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// One UI surface. See the module docs for the frame pipeline.
///
/// ```rust,ignore
/// let mut cx = Context::new(Config::default());
/// loop {
///     let report = cx.frame(800.0, 600.0, |ui| {
///         if ui.button("Quit").clicked() {
///             quit = true;
///         }
///     });
///     backend.render(cx.draw_list())?;
/// }
/// ```
pub struct Context {
    pub(crate) config: Config,
    pub(crate) arena: FrameArena<ViewNode>,
    pub(crate) ids: IdStack,
    pub(crate) tree: TreeState,
    pub(crate) store: StateStore,
    pub(crate) list: DrawList,
    pub(crate) glyphs: Box<dyn GlyphSource>,
    clock: FrameClock,
    pub(crate) time: FrameTime,
    pub(crate) viewport: Viewport,
    in_frame: bool,
    errors: Vec<FrameError>,
    screenshot: Option<PathBuf>,
}

impl Context {
    pub fn new(config: Config) -> Self {
        let clock = match config.fixed_dt {
            Some(dt) => FrameClock::fixed(dt),
            None => FrameClock::new(),
        };
        log::debug!("context: arena {} bytes, strict={}", config.arena_capacity, config.strict);
        Self {
            arena: FrameArena::new(config.arena_capacity),
            ids: IdStack::new(),
            tree: TreeState::new(),
            store: StateStore::new(),
            list: DrawList::new(),
            glyphs: Box::new(MonospaceGlyphs::default()),
            clock,
            time: FrameTime { dt: 0.0, elapsed: 0.0, frame_index: 0 },
            viewport: Viewport::new(0.0, 0.0),
            in_frame: false,
            errors: Vec::new(),
            screenshot: None,
            config,
        }
    }

    /// Replaces the glyph source (e.g. a `FontSystem` with loaded fonts).
    pub fn with_glyphs(mut self, glyphs: Box<dyn GlyphSource>) -> Self {
        self.glyphs = glyphs;
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Mutable store access, mainly for feeding [`nabu_engine::input::Facts`]
    /// between frames.
    #[inline]
    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    /// The list emitted by the last completed frame.
    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    #[inline]
    pub fn arena(&self) -> &FrameArena<ViewNode> {
        &self.arena
    }

    #[inline]
    pub fn time(&self) -> FrameTime {
        self.time
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    pub fn glyphs_mut(&mut self) -> &mut dyn GlyphSource {
        self.glyphs.as_mut()
    }

    /// Asks for a capture of the next completed frame. The request is
    /// surfaced once in [`FrameReport::screenshot`]; writing the image is up
    /// to the backend.
    pub fn request_screenshot(&mut self, path: impl AsRef<Path>) {
        self.screenshot = Some(path.as_ref().to_path_buf());
    }

    /// Records a frame error. Strict mode panics on programmer bugs and
    /// arena exhaustion; otherwise each kind is logged once per frame.
    pub(crate) fn report(&mut self, err: FrameError) {
        let fatal = err.is_programmer_bug() || matches!(err, FrameError::ArenaExhausted(_));
        if self.config.strict && fatal {
            panic!("nabu: {err}");
        }
        if self.errors.iter().any(|e| mem::discriminant(e) == mem::discriminant(&err)) {
            return;
        }
        log::error!("frame {}: {err}", self.time.frame_index);
        self.errors.push(err);
    }

    // ── frame boundaries ──────────────────────────────────────────────────

    /// Starts a frame over a `width`×`height` surface: ticks the clock and
    /// resets every per-frame structure.
    pub fn begin_frame(&mut self, width: f32, height: f32) {
        let stale = self.in_frame;
        if stale {
            log::warn!("begin_frame: closing the previous frame first");
            let dropped = self.end_frame();
            self.errors.extend(dropped.errors);
        }

        self.time = self.clock.tick();
        self.viewport = Viewport::new(
            if width.is_finite() { width.max(0.0) } else { 0.0 },
            if height.is_finite() { height.max(0.0) } else { 0.0 },
        );
        self.arena.reset();
        self.ids.reset();
        self.tree.reset();
        self.list.clear();
        self.store.ephemeral.begin_frame();
        self.in_frame = true;
        if stale {
            self.report(FrameError::FrameInProgress);
        }
        log::trace!("begin frame {} ({}x{})", self.time.frame_index, self.viewport.width, self.viewport.height);
    }

    /// The builder for the current frame.
    pub fn ui(&mut self) -> Ui<'_> {
        if !self.in_frame {
            self.report(FrameError::FrameNotStarted);
        }
        Ui::new(self)
    }

    /// Finishes the frame: resolves post-build interaction, lays out, emits
    /// the draw list, steps springs and rotates the input facts.
    pub fn end_frame(&mut self) -> FrameReport {
        if !self.in_frame {
            self.report(FrameError::FrameNotStarted);
            let mut report = FrameReport::empty(self.time.frame_index);
            report.errors = mem::take(&mut self.errors);
            return report;
        }
        self.in_frame = false;

        self.unwind();
        self.resolve_interaction();
        self.run_callbacks();

        layout::run(
            &mut self.arena,
            self.glyphs.as_mut(),
            &self.tree,
            &mut self.store.persistent,
            self.viewport.rect(),
            self.config.default_font_size,
        );

        let roots = chain(&self.arena, self.tree.root_first);
        let mut emitter = Emitter {
            arena: &self.arena,
            painter: Painter::new(&mut self.list, self.glyphs.as_mut()),
            eph: &self.store.ephemeral,
            persistent: &mut self.store.persistent,
            config: &self.config,
            time: self.time.elapsed,
            ime_area: None,
        };
        emitter.emit_all(&roots, &self.tree.overlays);
        let ime_cursor_area = emitter.ime_area;
        self.glyphs.update_atlas();

        self.store.persistent.animations.step_all(self.time.dt);
        self.store.persistent.rotate_overlays();
        if let Err(e) = self.list.validate() {
            log::error!("frame {}: malformed draw list: {e}", self.time.frame_index);
        }

        let report = FrameReport {
            frame_index: self.time.frame_index,
            dt: self.time.dt,
            node_count: self.arena.node_count(),
            arena_used: self.arena.used(),
            command_count: self.list.len(),
            errors: mem::take(&mut self.errors),
            cursor: self.store.ephemeral.cursor(),
            screenshot: self.screenshot.take(),
            ime_cursor_area,
        };
        self.store.facts.advance_frame();
        report
    }

    /// `begin_frame`, `build`, `end_frame`.
    pub fn frame(&mut self, width: f32, height: f32, build: impl FnOnce(&mut Ui<'_>)) -> FrameReport {
        self.begin_frame(width, height);
        build(&mut self.ui());
        self.end_frame()
    }

    /// One full frame against `backend`: polls its input into the facts,
    /// builds, applies the cursor request and submits the draw list.
    pub fn run_frame<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        build: impl FnOnce(&mut Ui<'_>),
    ) -> Result<FrameReport, FrameError> {
        self.poll(backend);
        let viewport = backend.viewport();
        backend.begin_frame(viewport);
        let report = self.frame(viewport.width, viewport.height, build);
        backend.set_cursor(report.cursor);
        let rendered = backend.render(&self.list);
        backend.end_frame();
        rendered?;
        Ok(report)
    }

    fn poll<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        let facts = &mut self.store.facts;

        let pointer = backend.get_pointer();
        facts.set_mouse(pointer.pos);
        facts.set_button(MouseButton::Left, pointer.buttons.left);
        facts.set_button(MouseButton::Right, pointer.buttons.right);
        facts.set_button(MouseButton::Middle, pointer.buttons.middle);
        facts.add_wheel(pointer.wheel);

        let keyboard = backend.get_keyboard();
        for c in keyboard.chars {
            facts.push_char(c);
        }
        for key in keyboard.keys {
            facts.set_modifiers(key.modifiers);
            facts.push_key(key);
        }

        let ime = backend.get_ime();
        if !ime.committed.is_empty() {
            facts.commit_ime(&ime.committed);
        }
        if ime.active {
            facts.set_ime_composition(ime.composition, ime.cursor);
        } else if facts.ime().active {
            facts.apply_event(&InputEvent::Ime(ImeEvent::Disabled));
        }
    }

    // ── end-of-frame stages ───────────────────────────────────────────────

    /// Closes whatever the build left open so layout sees a whole tree.
    fn unwind(&mut self) {
        let id_depth = self.ids.depth();
        let parent_depth = self.tree.depth();
        if id_depth == 1 && parent_depth == 0 {
            return;
        }
        self.report(FrameError::UnbalancedStacks { id_depth, parent_depth });
        let mut ui = Ui::new(self);
        while ui.depth() > 0 {
            ui.end();
        }
        while self.ids.pop() {}
    }

    fn resolve_interaction(&mut self) {
        let store = &mut self.store;
        let eph = &mut store.ephemeral;

        // Elements that vanished this frame give up active and focus.
        if eph.active().is_some() && !eph.active_seen {
            log::debug!("active {:?} not rebuilt; released", eph.active());
            eph.release();
        }
        let focus = store.persistent.focus();
        if focus.is_some() && !eph.focus_seen && !eph.focusables().contains(&focus) {
            store.persistent.clear_focus();
        }

        focus::apply_keys(&store.facts, eph, &mut store.persistent);
        widgets::close_on_outside_press(store);

        if !store.facts.mouse_down() && store.ephemeral.drag().is_some() {
            store.ephemeral.clear_drag();
        }
    }

    /// Fires `on_click` of the button clicked this frame.
    fn run_callbacks(&mut self) {
        let clicked = self.store.ephemeral.clicked();
        if clicked.is_none() {
            return;
        }
        let callbacks: Vec<Callback> = self
            .arena
            .nodes()
            .iter()
            .filter(|n| n.kind == ViewKind::Button && n.id == clicked)
            .filter_map(|n| match n.data {
                NodeData::Button { on_click, .. } => on_click,
                _ => None,
            })
            .collect();
        for cb in callbacks {
            cb.invoke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Slot;
    use crate::id::Id;
    use crate::view::{Align, Justify};
    use nabu_engine::coords::Vec2;
    use nabu_engine::core::HeadlessBackend;
    use nabu_engine::input::{Buttons, Key, Modifiers};
    use nabu_engine::scene::DrawCmd;
    use nabu_engine::paint::Color;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cx() -> Context {
        Context::new(Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false))
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn empty_frame_emits_nothing() {
        let mut cx = cx();
        cx.begin_frame(800.0, 600.0);
        let report = cx.end_frame();
        assert!(cx.draw_list().is_empty());
        assert_eq!(report.arena_used, 0);
        assert_eq!(report.node_count, 0);
        assert!(report.is_clean());
        assert_eq!(cx.ids.depth(), 1);
        assert_eq!(cx.tree.depth(), 0);
    }

    fn centered_button(ui: &mut Ui<'_>) -> bool {
        ui.column().size(800.0, 600.0).justify(Justify::Center).align(Align::Center);
        let clicked = ui.button("Ok").size(80.0, 30.0).clicked();
        ui.end();
        clicked
    }

    #[test]
    fn button_clicks_on_the_release_frame_only() {
        let mut cx = cx();
        cx.store.facts.set_mouse(Vec2::new(410.0, 310.0));
        let mut clicks = Vec::new();
        for frame in 0..4 {
            match frame {
                2 => cx.store.facts.set_mouse_down(true),
                3 => cx.store.facts.set_mouse_down(false),
                _ => {}
            }
            let mut clicked = false;
            cx.frame(800.0, 600.0, |ui| clicked = centered_button(ui));
            clicks.push(clicked);
        }
        assert_eq!(clicks, [false, false, false, true]);
    }

    #[test]
    fn grow_row_splits_evenly() {
        let mut cx = cx();
        let mut ids = Vec::new();
        cx.frame(900.0, 600.0, |ui| {
            ui.row().width(900.0).padding(10.0).gap(0.0);
            for _ in 0..3 {
                ids.push(ui.container().grow(1.0).id());
                ui.end();
            }
            ui.end();
        });
        let rects: Vec<Rect> = ids.iter().filter_map(|&id| cx.store.persistent.rect(id)).collect();
        assert_eq!(rects.len(), 3);
        let total: f32 = rects.iter().map(|r| r.size.x).sum();
        assert!((total - 880.0).abs() < 1e-3);
        for (r, x) in rects.iter().zip([10.0, 303.333, 596.667]) {
            assert!((r.size.x - 293.333).abs() < 1e-2);
            assert!((r.origin.x - x).abs() < 1e-2);
        }
    }

    fn scroll_list(ui: &mut Ui<'_>) -> Id {
        let id = ui.scroll(true).size(300.0, 200.0).id();
        for _ in 0..20 {
            ui.container().height(50.0);
            ui.end();
        }
        ui.end();
        id
    }

    #[test]
    fn wheel_scroll_clamps_to_content() {
        let mut cx = cx();
        let mut id = Id::NONE;
        cx.frame(800.0, 600.0, |ui| id = scroll_list(ui));
        cx.store.facts.set_mouse(Vec2::new(150.0, 100.0));
        cx.store.facts.add_wheel(Vec2::new(0.0, -5.0));
        cx.frame(800.0, 600.0, |ui| {
            scroll_list(ui);
        });
        let state = cx.store.persistent.scroll(id);
        assert_eq!(state.offset.y, 100.0);
        assert_eq!(state.content.y, 1000.0);

        cx.store.facts.add_wheel(Vec2::new(0.0, -500.0));
        cx.frame(800.0, 600.0, |ui| {
            scroll_list(ui);
        });
        assert_eq!(cx.store.persistent.scroll(id).offset.y, 800.0);
    }

    #[test]
    fn push_id_separates_identical_labels() {
        let mut cx = cx();
        let mut same = (Id::NONE, Id::NONE);
        let mut scoped = (Id::NONE, Id::NONE);
        cx.frame(800.0, 600.0, |ui| {
            ui.row();
            same = (ui.button("X").id(), ui.button("X").id());
            ui.push_id(0usize);
            scoped.0 = ui.button("X").id();
            ui.pop_id();
            ui.push_id(1usize);
            scoped.1 = ui.button("X").id();
            ui.pop_id();
            ui.end();
        });
        assert_eq!(same.0, same.1);
        assert_ne!(scoped.0, scoped.1);
        let a = cx.store.persistent.rect(scoped.0).unwrap();
        let b = cx.store.persistent.rect(scoped.1).unwrap();
        assert!(a.intersect(b).is_none_or(|r| r.is_empty()));
    }

    #[test]
    fn background_spring_settles() {
        let mut cx = cx();
        let mut id = Id::NONE;
        cx.frame(800.0, 600.0, |ui| id = ui.button("Fade").bg(Color::BLACK).id());
        let key = Slot::Background.key(id);
        for _ in 0..120 {
            cx.frame(800.0, 600.0, |ui| {
                ui.button("Fade").bg(Color::WHITE);
            });
        }
        let spring = *cx.store.persistent.animations().get(key).unwrap();
        let target = Color::WHITE.to_array();
        assert!(spring.current.iter().zip(target).all(|(c, t)| (c - t).abs() < 1e-3));
        cx.frame(800.0, 600.0, |ui| {
            ui.button("Fade").bg(Color::WHITE);
        });
        assert_eq!(cx.store.persistent.animations().get(key).unwrap().current, spring.current);
    }

    // ── frame-level interaction ───────────────────────────────────────────

    #[test]
    fn vanished_capture_releases_active() {
        let mut cx = cx();
        let mut value = 0.0;
        cx.store.facts.set_mouse(Vec2::new(75.0, 15.0));
        cx.frame(800.0, 600.0, |ui| {
            ui.slider("level", &mut value, 0.0, 1.0).size(150.0, 30.0);
        });
        cx.store.facts.set_mouse_down(true);
        let mut id = Id::NONE;
        cx.frame(800.0, 600.0, |ui| id = ui.slider("level", &mut value, 0.0, 1.0).size(150.0, 30.0).id());
        assert_eq!(cx.store.ephemeral.active(), id);
        assert_eq!(cx.store.ephemeral.captured(), id);

        // Held button, but the slider is not rebuilt.
        cx.frame(800.0, 600.0, |_| {});
        assert!(cx.store.ephemeral.active().is_none());
        assert!(cx.store.ephemeral.captured().is_none());

        // Back again under the same held button: no press edge, no drag.
        let before = value;
        let mut active = true;
        cx.store.facts.set_mouse(Vec2::new(140.0, 15.0));
        cx.frame(800.0, 600.0, |ui| active = ui.slider("level", &mut value, 0.0, 1.0).size(150.0, 30.0).is_active());
        assert!(!active);
        assert_eq!(value, before);
    }

    fn three_sliders(ui: &mut Ui<'_>) -> Vec<Id> {
        let mut value = 0.0;
        ["a", "b", "c"].iter().map(|label| ui.slider(label, &mut value, 0.0, 1.0).id()).collect()
    }

    #[test]
    fn tab_and_shift_tab_cycle_across_frames() {
        let mut cx = cx();
        let mut ids = Vec::new();
        cx.frame(800.0, 600.0, |ui| ids = three_sliders(ui));
        let mut focus = Vec::new();
        for shift in [false, false, true, true, true] {
            cx.store.facts.set_modifiers(Modifiers { shift, ..Modifiers::default() });
            cx.store.facts.press_key(Key::Tab);
            cx.frame(800.0, 600.0, |ui| {
                three_sliders(ui);
            });
            focus.push(cx.store.persistent.focus());
        }
        assert_eq!(focus, [ids[0], ids[1], ids[0], ids[2], ids[1]]);
    }

    fn first_surface(list: &DrawList) -> Option<Color> {
        list.commands().find_map(|c| match c {
            DrawCmd::RoundedRect(r) => Some(r.color),
            _ => None,
        })
    }

    #[test]
    fn kill_switch_shows_targets_in_the_draw_list() {
        for disabled in [true, false] {
            let config = Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false).with_disable_animation(disabled);
            let mut cx = Context::new(config);
            cx.frame(800.0, 600.0, |ui| {
                ui.button("Fade").bg(Color::BLACK);
            });
            cx.frame(800.0, 600.0, |ui| {
                ui.button("Fade").bg(Color::WHITE);
            });
            let drawn = first_surface(cx.draw_list());
            assert!(drawn.is_some());
            assert_eq!(drawn == Some(Color::WHITE), disabled, "disable_animation = {disabled}");
        }
    }

    // ── error policy ──────────────────────────────────────────────────────

    #[test]
    fn unclosed_containers_are_unwound_and_reported() {
        let mut cx = cx();
        cx.begin_frame(800.0, 600.0);
        {
            let mut ui = cx.ui();
            ui.column();
            ui.row();
            ui.push_id("dangling");
        }
        let report = cx.end_frame();
        assert!(matches!(report.errors.as_slice(), [FrameError::UnbalancedStacks { parent_depth: 2, .. }]));
        assert_eq!(cx.tree.depth(), 0);
        assert_eq!(cx.ids.depth(), 1);
    }

    #[test]
    fn end_without_begin_is_reported() {
        let mut cx = cx();
        let report = cx.end_frame();
        assert_eq!(report.errors, [FrameError::FrameNotStarted]);
    }

    #[test]
    fn double_begin_closes_the_stale_frame() {
        let mut cx = cx();
        cx.begin_frame(800.0, 600.0);
        cx.begin_frame(800.0, 600.0);
        let report = cx.end_frame();
        assert!(report.errors.contains(&FrameError::FrameInProgress));
    }

    #[test]
    fn arena_exhaustion_degrades_the_frame() {
        let mut cx = Context::new(Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false).with_arena_capacity(512));
        let report = cx.frame(800.0, 600.0, |ui| {
            for i in 0..64 {
                ui.push_id(i);
                ui.text("overflow");
                ui.pop_id();
            }
        });
        assert!(matches!(report.errors.as_slice(), [FrameError::ArenaExhausted(_)]));
        assert!(report.arena_used <= 512);
    }

    #[test]
    #[should_panic(expected = "end() called with no open container")]
    fn strict_mode_panics_on_programmer_bugs() {
        let mut cx = Context::new(Config::default().with_strict(true));
        cx.begin_frame(800.0, 600.0);
        cx.ui().end();
    }

    // ── frame report ──────────────────────────────────────────────────────

    #[test]
    fn screenshot_request_is_one_shot() {
        let mut cx = cx();
        cx.request_screenshot("shot.png");
        let first = cx.frame(800.0, 600.0, |_| {});
        let second = cx.frame(800.0, 600.0, |_| {});
        assert_eq!(first.screenshot, Some(PathBuf::from("shot.png")));
        assert_eq!(second.screenshot, None);
    }

    #[test]
    fn hovered_button_requests_pointer_cursor() {
        let mut cx = cx();
        cx.frame(800.0, 600.0, |ui| {
            ui.button("Hover");
        });
        let r = cx.store.persistent.rect(cx.ids.derive("Hover")).unwrap();
        cx.store.facts.set_mouse(r.center());
        let report = cx.frame(800.0, 600.0, |ui| {
            ui.button("Hover");
        });
        assert_eq!(report.cursor, CursorIcon::Pointer);
    }

    static CLICKS: AtomicUsize = AtomicUsize::new(0);

    fn count_click(by: usize) {
        CLICKS.fetch_add(by, Ordering::SeqCst);
    }

    #[test]
    fn on_click_runs_after_the_build() {
        let mut cx = cx();
        let build = |ui: &mut Ui<'_>| {
            ui.button("Cb").size(50.0, 20.0).on_click(Callback::new(count_click, 3));
        };
        cx.frame(800.0, 600.0, build);
        cx.store.facts.set_mouse(Vec2::new(10.0, 10.0));
        cx.store.facts.set_mouse_down(true);
        cx.frame(800.0, 600.0, build);
        cx.store.facts.set_mouse_down(false);
        cx.frame(800.0, 600.0, build);
        assert_eq!(CLICKS.load(Ordering::SeqCst), 3);
    }

    // ── backend ───────────────────────────────────────────────────────────

    #[test]
    fn run_frame_polls_input_and_submits() {
        let mut cx = cx();
        let mut backend = HeadlessBackend::new(Viewport::new(400.0, 300.0));
        cx.run_frame(&mut backend, |ui| {
            ui.button("Go").size(60.0, 20.0);
        })
        .unwrap();
        backend.move_pointer(Vec2::new(5.0, 5.0));
        backend.set_buttons(Buttons { left: true, ..Buttons::default() });
        cx.run_frame(&mut backend, |ui| {
            ui.button("Go").size(60.0, 20.0);
        })
        .unwrap();
        backend.set_buttons(Buttons::default());
        let mut clicked = false;
        cx.run_frame(&mut backend, |ui| clicked = ui.button("Go").size(60.0, 20.0).clicked())
            .unwrap();

        assert!(clicked);
        assert_eq!(backend.frames_rendered(), 3);
        assert!(backend.submissions().iter().all(|s| s.well_formed && s.commands > 0));
        assert_eq!(backend.cursor(), CursorIcon::Pointer);
    }

    #[test]
    fn backend_failure_surfaces_as_frame_error() {
        let mut cx = cx();
        let mut backend = HeadlessBackend::new(Viewport::new(400.0, 300.0));
        backend.fail_next_render(nabu_engine::core::BackendError::Closed);
        let err = cx.run_frame(&mut backend, |_| {}).unwrap_err();
        assert!(matches!(err, FrameError::Backend(_)));
        assert!(!cx.in_frame());
    }

    // ── invariants ────────────────────────────────────────────────────────

    /// A random nesting program: `true` opens a container, `false` closes one.
    fn run_program(ui: &mut Ui<'_>, ops: &[bool]) {
        for (i, &open) in ops.iter().enumerate() {
            if open {
                let container = if i % 2 == 0 { ui.row() } else { ui.column() };
                container.padding(2.0).gap(1.0);
                ui.text("x");
            } else {
                ui.end();
            }
        }
    }

    proptest! {
        #[test]
        fn stacks_are_balanced_after_every_frame(ops in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut cx = cx();
            cx.frame(800.0, 600.0, |ui| run_program(ui, &ops));
            prop_assert_eq!(cx.tree.depth(), 0);
            prop_assert_eq!(cx.ids.depth(), 1);
        }

        #[test]
        fn draw_lists_are_well_formed(ops in prop::collection::vec(any::<bool>(), 0..40), scroll in any::<bool>()) {
            let mut cx = cx();
            cx.frame(800.0, 600.0, |ui| {
                if scroll {
                    ui.scroll(true).size(200.0, 100.0);
                }
                run_program(ui, &ops);
                let mut on = true;
                ui.toggle("t", &mut on);
            });
            prop_assert!(cx.draw_list().validate().is_ok());
        }

        #[test]
        fn arena_is_empty_after_begin(n in 0usize..50) {
            let mut cx = cx();
            cx.frame(800.0, 600.0, |ui| {
                for i in 0..n {
                    ui.push_id(i);
                    ui.button("b");
                    ui.pop_id();
                }
            });
            cx.begin_frame(800.0, 600.0);
            prop_assert_eq!(cx.arena().used(), 0);
            prop_assert_eq!(cx.arena().node_count(), 0);
            cx.end_frame();
        }

        #[test]
        fn identical_builds_produce_identical_ids(labels in prop::collection::vec("[a-z]{1,6}", 1..10)) {
            let build = |cx: &mut Context| {
                let mut ids = Vec::new();
                cx.frame(800.0, 600.0, |ui| {
                    ui.column();
                    for l in &labels {
                        ids.push(ui.button(l).id());
                        ids.push(ui.text(l).id());
                    }
                    ui.end();
                });
                ids
            };
            let mut a = cx();
            let mut b = cx();
            prop_assert_eq!(build(&mut a), build(&mut b));
            prop_assert_eq!(build(&mut a), build(&mut b));
        }
    }
}
