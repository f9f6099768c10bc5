//! Input subsystem.
//!
//! Backends record raw inputs into the per-frame [`Facts`], either by
//! polling or by folding [`InputEvent`]s into them.

mod facts;
mod types;

pub use facts::{Buttons, Facts, ImeFacts, KeyEvent, PIXELS_PER_LINE};
pub use types::{ImeEvent, InputEvent, Key, KeyState, Modifiers, MouseButton, WheelDelta};
