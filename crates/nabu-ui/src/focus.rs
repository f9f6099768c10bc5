//! Keyboard focus navigation.
//!
//! Focus itself is sticky persistent state ([`crate::store::Persistent::focus`]);
//! this module only decides where Tab / Shift-Tab move it.
//!
//! # How focus works
//!
//! 1. During the **build**, focusable widgets register their id in
//!    declaration order (`Ephemeral::focusables`).
//! 2. A **press** on an element focuses it (interaction resolver).
//! 3. After the build, [`apply_keys`] handles Tab / Shift-Tab (cycle),
//!    Escape (clear), and a release over empty space clears focus.

use nabu_engine::input::{Facts, Key, KeyState};

use crate::id::Id;
use crate::interaction::edge_release;
use crate::store::{Ephemeral, Persistent};

/// Next focus target after `current` in `ring`, wrapping around.
///
/// With nothing focused, forward starts at the first entry and reverse at
/// the last. An unknown `current` restarts at the first entry.
pub fn advance(ring: &[Id], current: Id, reverse: bool) -> Id {
    if ring.is_empty() {
        return current;
    }
    let n = ring.len();
    if current.is_none() {
        return ring[if reverse { n - 1 } else { 0 }];
    }
    match ring.iter().position(|&x| x == current) {
        None => ring[0],
        Some(i) => {
            if reverse {
                ring[(i + n - 1) % n]
            } else {
                ring[(i + 1) % n]
            }
        }
    }
}

/// Post-build focus rules. Returns true if focus changed.
pub fn apply_keys(facts: &Facts, eph: &Ephemeral, persistent: &mut Persistent) -> bool {
    let before = persistent.focus();

    for ev in facts.keys().iter().filter(|k| k.state == KeyState::Pressed) {
        match ev.key {
            Key::Tab => {
                let next = advance(eph.focusables(), persistent.focus(), ev.modifiers.shift);
                persistent.set_focus(next);
            }
            Key::Escape => persistent.clear_focus(),
            _ => {}
        }
    }

    if edge_release(facts) && eph.hot().is_none() {
        persistent.clear_focus();
    }

    persistent.focus() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::input::{KeyEvent, Modifiers};

    const RING: [Id; 3] = [Id(1), Id(2), Id(3)];

    #[test]
    fn forward_wraps() {
        assert_eq!(advance(&RING, Id(3), false), Id(1));
        assert_eq!(advance(&RING, Id(1), false), Id(2));
    }

    #[test]
    fn reverse_wraps() {
        assert_eq!(advance(&RING, Id(1), true), Id(3));
    }

    #[test]
    fn nothing_focused_starts_at_the_ends() {
        assert_eq!(advance(&RING, Id::NONE, false), Id(1));
        assert_eq!(advance(&RING, Id::NONE, true), Id(3));
    }

    #[test]
    fn empty_ring_keeps_focus() {
        assert_eq!(advance(&[], Id(7), false), Id(7));
    }

    #[test]
    fn shift_tab_moves_back() {
        let mut facts = Facts::new();
        facts.push_key(KeyEvent {
            key: Key::Tab,
            state: KeyState::Pressed,
            modifiers: Modifiers { shift: true, ..Modifiers::default() },
            repeat: false,
        });
        let mut eph = Ephemeral::new();
        eph.focusables.extend_from_slice(&RING);
        let mut p = Persistent::new();
        p.set_focus(Id(2));
        assert!(apply_keys(&facts, &eph, &mut p));
        assert_eq!(p.focus(), Id(1));
    }

    #[test]
    fn escape_clears() {
        let mut facts = Facts::new();
        facts.press_key(Key::Escape);
        let eph = Ephemeral::new();
        let mut p = Persistent::new();
        p.set_focus(Id(2));
        apply_keys(&facts, &eph, &mut p);
        assert_eq!(p.focus(), Id::NONE);
    }

    #[test]
    fn release_over_nothing_clears() {
        let mut facts = Facts::new();
        facts.set_mouse_down(true);
        facts.advance_frame();
        facts.set_mouse_down(false);
        let eph = Ephemeral::new();
        let mut p = Persistent::new();
        p.set_focus(Id(2));
        apply_keys(&facts, &eph, &mut p);
        assert_eq!(p.focus(), Id::NONE);
    }
}
