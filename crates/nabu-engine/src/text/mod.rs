//! Glyph subsystem contract and implementations.
//!
//! The UI pipeline never rasterizes text itself; it asks a [`GlyphSource`]
//! for per-glyph metrics and atlas coordinates and emits one quad per glyph.

mod font_system;
mod glyph;
mod monospace;

pub use font_system::{FontLoadError, FontSystem};
pub use glyph::{FontId, GlyphMetrics, GlyphSource, LINE_HEIGHT};
pub use monospace::MonospaceGlyphs;
