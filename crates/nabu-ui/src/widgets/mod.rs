//! Builders, one file per widget family. Each adds `impl Ui` methods.

mod button;
mod canvas;
mod collapsible;
mod container;
mod dnd;
mod menu;
mod range;
mod scroll;
mod splitter;
mod table;
mod text;
pub(crate) mod text_edit;
mod text_input;
mod toggle;
mod visuals;

pub(crate) use menu::close_on_outside_press;
pub use table::RowBuilder;
pub use text_edit::EditCursor;
