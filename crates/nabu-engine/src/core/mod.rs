//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the UI pipeline and the
//! platform/GPU side: what a backend must provide (input facts, frame
//! boundaries, rendering, textures) and how the application loop is steered.

mod app;
mod backend;
mod headless;

pub use app::AppControl;
pub use backend::{
    Backend, BackendError, CursorIcon, KeyboardSnapshot, PointerSnapshot, TextureFormat, TextureHandle,
};
pub use headless::{HeadlessBackend, Submission};
