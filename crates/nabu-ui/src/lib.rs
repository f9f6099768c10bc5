//! Nabu UI: an immediate-mode interface pipeline on top of `nabu-engine`.
//!
//! Application code rebuilds the whole interface every frame through a
//! [`Ui`]. Builders allocate plain-data view nodes in a frame arena,
//! resolve interaction against the previous frame's layout, and return a
//! [`Handle`] for styling. `end_frame` then lays the tree out with a
//! flexbox-style solver and emits a [`nabu_engine::scene::DrawList`].
//!
//! # Quick start
//!
//! ```rust,ignore
//! use nabu_ui::prelude::*;
//!
//! let mut cx = Context::new(Config::default());
//! let mut volume = 0.5;
//! let report = cx.frame(800.0, 600.0, |ui| {
//!     ui.column().padding(8.0).gap(4.0);
//!     if ui.button("Mute").clicked() {
//!         volume = 0.0;
//!     }
//!     ui.slider("Volume", &mut volume, 0.0, 1.0);
//!     ui.end();
//! });
//! backend.render(cx.draw_list())?;
//! ```
//!
//! # State
//!
//! | store | lifetime | holds |
//! |---|---|---|
//! | [`Facts`](nabu_engine::input::Facts) | one frame | raw pointer, keys, text, IME |
//! | [`Ephemeral`](store::Ephemeral) | one frame (`active` until release) | hot, active, drag payload |
//! | [`Persistent`](store::Persistent) | across frames | rects, focus, scroll, springs |

pub mod animation;
pub mod app;
pub mod arena;
pub mod config;
pub mod context;
pub mod current;
pub mod error;
pub mod focus;
pub mod id;
pub mod interaction;
pub mod layout;
pub mod painter;
pub mod render;
pub mod store;
pub mod ui;
pub mod view;
pub mod widgets;

pub use app::App;
pub use config::Config;
pub use context::{Context, FrameReport};
pub use error::FrameError;
pub use ui::Ui;
pub use view::{Handle, Response};

/// Everything application code usually needs.
pub mod prelude {
    pub use crate::animation::SpringParams;
    pub use crate::app::{run, App};
    pub use crate::config::Config;
    pub use crate::context::{Context, FrameReport};
    pub use crate::current::{clear_current, current_is_set, make_current, with_current, ContextHandle};
    pub use crate::error::FrameError;
    pub use crate::id::Id;
    pub use crate::ui::Ui;
    pub use crate::view::{Align, Callback, Handle, Justify, Response};
    pub use crate::widgets::RowBuilder;

    pub use nabu_engine::coords::{Rect, Vec2, Viewport};
    pub use nabu_engine::core::{AppControl, Backend, CursorIcon, HeadlessBackend};
    pub use nabu_engine::paint::Color;
}
