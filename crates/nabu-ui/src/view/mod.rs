//! The per-frame view tree: POD nodes in the frame arena, linked by
//! intrusive `first_child` / `next_sibling` indices, plus the fluent handles
//! builders return.

mod handle;
mod node;
mod tree;

pub use handle::{Handle, Response};
pub use node::{Align, Callback, Justify, NodeData, ViewKind, ViewNode};
pub use tree::{chain, children, TreeState};
pub(crate) use tree::OpenNode;
