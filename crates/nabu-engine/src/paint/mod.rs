//! Paint model shared between the UI pipeline and backends.
//!
//! Scope:
//! - color representation (straight alpha, linear `f32`)
//! - mesh gradients referenced by `DrawCmd::MeshGradient`
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{GradientPoint, MeshGradient};
