use crate::coords::{Vec2, Viewport};
use crate::input::{Buttons, ImeFacts, KeyEvent};
use crate::scene::{DrawList, DrawStats};

use super::backend::{
    Backend, BackendError, CursorIcon, KeyboardSnapshot, PointerSnapshot, TextureFormat, TextureHandle,
};

/// Summary of one submitted frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub viewport: Viewport,
    pub commands: usize,
    pub stats: DrawStats,
    pub well_formed: bool,
}

/// Backend without a window or GPU.
///
/// Input is scripted by writing to it between frames; every rendered list is
/// summarized in [`HeadlessBackend::submissions`].
#[derive(Debug)]
pub struct HeadlessBackend {
    viewport: Viewport,
    pointer: Vec2,
    buttons: Buttons,
    wheel: Vec2,
    chars: Vec<char>,
    keys: Vec<KeyEvent>,
    ime: ImeFacts,
    running: bool,
    in_frame: bool,
    max_frames: Option<u64>,
    frames: u64,
    next_texture: u64,
    fail_next_render: Option<BackendError>,
    cursor: CursorIcon,
    submissions: Vec<Submission>,
}

impl HeadlessBackend {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: Vec2::ZERO,
            buttons: Buttons::default(),
            wheel: Vec2::ZERO,
            chars: Vec::new(),
            keys: Vec::new(),
            ime: ImeFacts::default(),
            running: true,
            in_frame: false,
            max_frames: None,
            frames: 0,
            next_texture: 1,
            fail_next_render: None,
            cursor: CursorIcon::Default,
            submissions: Vec::new(),
        }
    }

    /// Stops reporting `is_running` after `n` rendered frames.
    pub fn with_max_frames(mut self, n: u64) -> Self {
        self.max_frames = Some(n);
        self
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn move_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.buttons = buttons;
    }

    pub fn scroll(&mut self, lines: Vec2) {
        self.wheel += lines;
    }

    pub fn type_text(&mut self, text: &str) {
        self.chars.extend(text.chars());
    }

    pub fn push_key(&mut self, key: KeyEvent) {
        self.keys.push(key);
    }

    pub fn set_ime(&mut self, ime: ImeFacts) {
        self.ime = ime;
    }

    /// Makes the next `render` fail with `err`.
    pub fn fail_next_render(&mut self, err: BackendError) {
        self.fail_next_render = Some(err);
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }
}

impl Backend for HeadlessBackend {
    fn get_pointer(&mut self) -> PointerSnapshot {
        PointerSnapshot {
            pos: self.pointer,
            buttons: self.buttons,
            wheel: std::mem::take(&mut self.wheel),
        }
    }

    fn get_keyboard(&mut self) -> KeyboardSnapshot {
        KeyboardSnapshot {
            chars: std::mem::take(&mut self.chars),
            keys: std::mem::take(&mut self.keys),
        }
    }

    fn get_ime(&mut self) -> ImeFacts {
        let ime = self.ime.clone();
        // Committed text is delivered once.
        self.ime.committed.clear();
        ime
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn begin_frame(&mut self, viewport: Viewport) {
        debug_assert!(!self.in_frame, "begin_frame called twice");
        self.viewport = viewport;
        self.in_frame = true;
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        if self.max_frames.is_some_and(|max| self.frames >= max) {
            self.running = false;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn render(&mut self, list: &DrawList) -> Result<(), BackendError> {
        if !self.running {
            return Err(BackendError::Closed);
        }
        if let Some(err) = self.fail_next_render.take() {
            log::warn!("headless backend: simulated failure: {err}");
            self.running = false;
            return Err(err);
        }
        self.frames += 1;
        self.submissions.push(Submission {
            viewport: self.viewport,
            commands: list.len(),
            stats: list.stats(),
            well_formed: list.validate().is_ok(),
        });
        Ok(())
    }

    fn create_texture(&mut self, width: u32, height: u32, format: TextureFormat) -> Result<TextureHandle, BackendError> {
        let bytes = width as u64 * height as u64 * format.bytes_per_pixel() as u64;
        if bytes == 0 {
            return Err(BackendError::Other(format!("zero-sized texture {width}x{height}")));
        }
        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        log::debug!("headless texture {} ({width}x{height} {format:?})", handle.0);
        Ok(handle)
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }
}
