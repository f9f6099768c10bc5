//! Nabu engine crate.
//!
//! Platform-neutral building blocks for the immediate-mode UI pipeline:
//! geometry, colors, frame timing, raw input facts, the draw command stream,
//! the glyph subsystem contract, and the backend contract.

pub mod core;
pub mod input;
pub mod time;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod text;
