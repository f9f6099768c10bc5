//! The three disjoint state regions.
//!
//! | Region | Lifetime | Written by |
//! |---|---|---|
//! | [`Facts`] | one frame | the platform (backend poll or event adapter) |
//! | [`Ephemeral`] | one frame (`active` until release) | the interaction resolver |
//! | [`Persistent`] | many frames | layout, interaction and animation commits |
//!
//! Each region has its own accessors; nothing hands out the store as a whole
//! mutable bag.

mod ephemeral;
mod persistent;

pub use ephemeral::{DragPayload, Ephemeral};
pub use persistent::{CanvasView, Persistent, PickerState, ScrollState};

use nabu_engine::input::Facts;

#[derive(Debug, Clone, Default)]
pub struct StateStore {
    pub(crate) facts: Facts,
    pub(crate) ephemeral: Ephemeral,
    pub(crate) persistent: Persistent,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn facts(&self) -> &Facts {
        &self.facts
    }

    #[inline]
    pub fn facts_mut(&mut self) -> &mut Facts {
        &mut self.facts
    }

    #[inline]
    pub fn ephemeral(&self) -> &Ephemeral {
        &self.ephemeral
    }

    #[inline]
    pub fn persistent(&self) -> &Persistent {
        &self.persistent
    }

    #[inline]
    pub fn persistent_mut(&mut self) -> &mut Persistent {
        &mut self.persistent
    }
}
