//! One-frame-delayed hit testing.
//!
//! Builders resolve interaction as they create their node, before this
//! frame's layout exists, so every test runs against the rectangle the same
//! id had at the end of the previous frame. Resolution follows declaration
//! order: a later element over the same point overwrites `hot` (and takes
//! `active` on a press), matching the painter's algorithm.

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::input::Facts;

use crate::id::Id;
use crate::store::{Ephemeral, Persistent};
use crate::view::Response;

/// `down ∧ ¬was_down` on the primary button.
#[inline]
pub fn edge_press(facts: &Facts) -> bool {
    facts.mouse_down() && !facts.was_down()
}

/// `¬down ∧ was_down` on the primary button.
#[inline]
pub fn edge_release(facts: &Facts) -> bool {
    !facts.mouse_down() && facts.was_down()
}

/// Pointer motion since the previous frame.
#[inline]
pub fn pointer_delta(facts: &Facts) -> Vec2 {
    facts.mouse() - facts.prev_mouse()
}

/// Whether `p` lies over last frame's overlay layer.
pub fn over_overlay(persistent: &Persistent, p: Vec2) -> bool {
    persistent.overlay_rects().iter().any(|r| r.contains(p))
}

/// Resolves hot / active / click / focus for `id`, hit-testing the
/// last-frame rectangle stored under `rect_id` (usually `id` itself; a
/// header or handle id for composite widgets).
///
/// `in_overlay` marks elements built inside a popup; other elements are
/// blocked wherever last frame's overlays cover the pointer.
pub fn interact(
    facts: &Facts,
    eph: &mut Ephemeral,
    persistent: &mut Persistent,
    id: Id,
    rect_id: Id,
    in_overlay: bool,
) -> Response {
    if id.is_none() {
        return Response::default();
    }
    let rect = persistent.rect(rect_id).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
    let mouse = facts.mouse();
    let blocked = !in_overlay && over_overlay(persistent, mouse);
    let captured_elsewhere = eph.captured().is_some() && eph.captured() != id;
    let hovered = facts.pointer_inside() && rect.contains(mouse) && !blocked && !captured_elsewhere;

    if hovered {
        eph.set_hot(id);
    }
    if eph.captured() == id {
        eph.set_hot(id);
    }

    let mut pressed = false;
    if hovered && edge_press(facts) {
        eph.set_active(id);
        persistent.set_focus(id);
        pressed = true;
    }

    let mut clicked = eph.clicked() == id;
    if eph.active() == id {
        eph.active_seen = true;
        if edge_release(facts) {
            if hovered {
                eph.record_click(id);
                clicked = true;
            }
            eph.release();
        }
    }
    if persistent.focus() == id {
        eph.focus_seen = true;
    }

    Response {
        hovered,
        pressed,
        clicked,
        active: eph.active() == id,
        focused: persistent.focus() == id,
        ..Response::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup(rects: &[(u64, Rect)]) -> (Facts, Ephemeral, Persistent) {
        let mut p = Persistent::new();
        for &(id, r) in rects {
            p.commit_rect(Id(id), r);
        }
        (Facts::new(), Ephemeral::new(), p)
    }

    fn next_frame(f: &mut Facts, e: &mut Ephemeral) {
        f.advance_frame();
        e.begin_frame();
    }

    const A: Id = Id(1);
    const B: Id = Id(2);

    // ── hot / active ──────────────────────────────────────────────────────

    #[test]
    fn hover_sets_hot() {
        let (mut f, mut e, mut p) = setup(&[(1, Rect::new(0.0, 0.0, 10.0, 10.0))]);
        f.set_mouse(Vec2::new(5.0, 5.0));
        let r = interact(&f, &mut e, &mut p, A, A, false);
        assert!(r.hovered);
        assert_eq!(e.hot(), A);
    }

    #[test]
    fn later_sibling_wins_hot_and_active() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (mut f, mut e, mut p) = setup(&[(1, r), (2, r)]);
        f.set_mouse(Vec2::new(5.0, 5.0));
        f.set_mouse_down(true);
        interact(&f, &mut e, &mut p, A, A, false);
        interact(&f, &mut e, &mut p, B, B, false);
        assert_eq!(e.hot(), B);
        assert_eq!(e.active(), B);
        assert_eq!(p.focus(), B);
    }

    #[test]
    fn click_needs_press_and_release_inside() {
        let (mut f, mut e, mut p) = setup(&[(1, Rect::new(0.0, 0.0, 10.0, 10.0))]);
        f.set_mouse(Vec2::new(5.0, 5.0));
        f.set_mouse_down(true);
        assert!(interact(&f, &mut e, &mut p, A, A, false).pressed);
        next_frame(&mut f, &mut e);
        f.set_mouse_down(false);
        let r = interact(&f, &mut e, &mut p, A, A, false);
        assert!(r.clicked);
        assert_eq!(e.active(), Id::NONE);
    }

    #[test]
    fn release_outside_cancels_click() {
        let (mut f, mut e, mut p) = setup(&[(1, Rect::new(0.0, 0.0, 10.0, 10.0))]);
        f.set_mouse(Vec2::new(5.0, 5.0));
        f.set_mouse_down(true);
        interact(&f, &mut e, &mut p, A, A, false);
        next_frame(&mut f, &mut e);
        f.set_mouse(Vec2::new(50.0, 50.0));
        f.set_mouse_down(false);
        let r = interact(&f, &mut e, &mut p, A, A, false);
        assert!(!r.clicked);
        assert_eq!(e.active(), Id::NONE);
    }

    #[test]
    fn duplicate_ids_report_the_same_click() {
        let (mut f, mut e, mut p) = setup(&[(1, Rect::new(0.0, 0.0, 10.0, 10.0))]);
        f.set_mouse(Vec2::new(5.0, 5.0));
        f.set_mouse_down(true);
        interact(&f, &mut e, &mut p, A, A, false);
        next_frame(&mut f, &mut e);
        f.set_mouse_down(false);
        assert!(interact(&f, &mut e, &mut p, A, A, false).clicked);
        assert!(interact(&f, &mut e, &mut p, A, A, false).clicked);
    }

    // ── capture / overlays ────────────────────────────────────────────────

    #[test]
    fn capture_pins_hot_outside_the_rect() {
        let (mut f, mut e, mut p) = setup(&[(1, Rect::new(0.0, 0.0, 10.0, 10.0)), (2, Rect::new(20.0, 0.0, 10.0, 10.0))]);
        f.set_mouse(Vec2::new(5.0, 5.0));
        f.set_mouse_down(true);
        interact(&f, &mut e, &mut p, A, A, false);
        e.capture(A);
        next_frame(&mut f, &mut e);
        f.set_mouse(Vec2::new(25.0, 5.0));
        let ra = interact(&f, &mut e, &mut p, A, A, false);
        let rb = interact(&f, &mut e, &mut p, B, B, false);
        assert!(ra.active);
        assert!(!rb.hovered);
        assert_eq!(e.hot(), A);
    }

    #[test]
    fn overlays_block_the_main_tree() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (mut f, mut e, mut p) = setup(&[(1, r), (2, r)]);
        p.next_overlay_rects.push(r);
        p.rotate_overlays();
        f.set_mouse(Vec2::new(5.0, 5.0));
        assert!(!interact(&f, &mut e, &mut p, A, A, false).hovered);
        assert!(interact(&f, &mut e, &mut p, B, B, true).hovered);
        assert_eq!(e.hot(), B);
    }

    #[test]
    fn unknown_rect_never_hovers() {
        let (mut f, mut e, mut p) = setup(&[]);
        f.set_mouse(Vec2::new(0.0, 0.0));
        assert!(!interact(&f, &mut e, &mut p, A, A, false).hovered);
    }

    proptest! {
        #[test]
        fn pointer_outside_every_rect_leaves_hot_empty(
            rects in prop::collection::vec((0.0f32..500.0, 0.0f32..500.0, 0.0f32..100.0, 0.0f32..100.0), 1..20),
        ) {
            let mut p = Persistent::new();
            for (i, (x, y, w, h)) in rects.iter().enumerate() {
                p.commit_rect(Id(i as u64 + 1), Rect::new(*x, *y, *w, *h));
            }
            let mut f = Facts::new();
            f.set_mouse(Vec2::new(-1.0, -1.0));
            let mut e = Ephemeral::new();
            for i in 0..rects.len() {
                let id = Id(i as u64 + 1);
                interact(&f, &mut e, &mut p, id, id, false);
            }
            prop_assert_eq!(e.hot(), Id::NONE);
        }
    }
}
