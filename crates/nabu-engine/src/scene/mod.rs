//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store backend-agnostic draw commands in paint order (insertion order)
//! - own the side tables commands index into (paths, gradients, glyph runs)
//! - track the transform and clip stacks so every push has a matching pop
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod list;
mod transform;

pub mod shapes;

pub use cmd::{BlendMode, DrawCmd, DrawItem};
pub use list::{DrawList, DrawListError, DrawStats};
pub use shapes::{Border, Glow};
pub use transform::Transform;
