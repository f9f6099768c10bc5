use thiserror::Error;

use crate::coords::{Vec2, Viewport};
use crate::input::{Buttons, ImeFacts, KeyEvent};
use crate::scene::DrawList;

/// Backend failures surfaced to the application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("render surface lost")]
    SurfaceLost,
    #[error("backend out of memory")]
    OutOfMemory,
    #[error("backend closed")]
    Closed,
    #[error("backend error: {0}")]
    Other(String),
}

/// Pixel formats a backend can allocate textures in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureFormat {
    R8,
    Rgba8,
    Rgba16F,
}

impl TextureFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::R8 => 1,
            TextureFormat::Rgba8 => 4,
            TextureFormat::Rgba16F => 8,
        }
    }
}

/// Opaque texture handle issued by a backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub u64);

/// Pointer cursor shapes the UI may request.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CursorIcon {
    #[default]
    Default,
    Pointer,
    Text,
    Grab,
    Grabbing,
    ResizeHorizontal,
    ResizeVertical,
}

/// Pointer state polled once per frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerSnapshot {
    pub pos: Vec2,
    pub buttons: Buttons,
    /// Wheel lines accumulated since the last poll.
    pub wheel: Vec2,
}

/// Keyboard input accumulated since the last poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardSnapshot {
    pub chars: Vec<char>,
    pub keys: Vec<KeyEvent>,
}

/// What the UI pipeline needs from a platform + GPU backend.
///
/// Polling methods drain whatever accumulated since the previous call.
pub trait Backend {
    fn get_pointer(&mut self) -> PointerSnapshot;
    fn get_keyboard(&mut self) -> KeyboardSnapshot;
    fn get_ime(&mut self) -> ImeFacts;

    /// Current drawable size in logical pixels.
    fn viewport(&self) -> Viewport;

    fn begin_frame(&mut self, viewport: Viewport);
    fn end_frame(&mut self);
    fn is_running(&self) -> bool;

    /// Submits one frame's commands. An error stops the backend.
    fn render(&mut self, list: &DrawList) -> Result<(), BackendError>;

    fn create_texture(&mut self, width: u32, height: u32, format: TextureFormat) -> Result<TextureHandle, BackendError>;

    /// Applies the cursor requested by the last frame.
    fn set_cursor(&mut self, cursor: CursorIcon) {
        let _ = cursor;
    }
}
