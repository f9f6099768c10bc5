//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to a platform loop.
//! Intended usage:
//! - one `FrameClock` per context
//! - call `tick()` once per frame to obtain `FrameTime`
//! - use `FrameClock::fixed` for deterministic runs

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
