use nabu_engine::core::CursorIcon;
use nabu_engine::input::Key;

use crate::interaction::pointer_delta;
use crate::ui::Ui;
use crate::view::{Handle, NodeData, ViewKind, ViewNode};

/// Inset of the track ends from the widget edges.
const TRACK_INSET: f32 = 8.0;
/// Pointer travel for a knob's full range.
const KNOB_TRAVEL: f32 = 200.0;
/// Fraction of the range one arrow key press moves.
const KEY_STEP: f32 = 0.01;

impl Ui<'_> {
    /// Horizontal slider over `min..=max`. A press jumps the thumb to the
    /// pointer and captures until release.
    pub fn slider(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> Handle<'_> {
        self.range(ViewKind::Slider, label, value, min, max)
    }

    /// Vertical slider; the minimum is at the bottom.
    pub fn fader(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> Handle<'_> {
        self.range(ViewKind::Fader, label, value, min, max)
    }

    /// Rotary control changed by dragging vertically.
    pub fn knob(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> Handle<'_> {
        self.range(ViewKind::Knob, label, value, min, max)
    }

    /// Number field changed by dragging horizontally, `speed` units per pixel.
    pub fn dragger(&mut self, label: &str, value: &mut f32, speed: f32) -> Handle<'_> {
        let id = self.next_id(ViewKind::Dragger, Some(label));
        let mut response = self.interact(id);
        self.focusable(id);
        if response.pressed {
            self.capture(id);
        }
        if response.hovered || response.active {
            self.request_cursor(CursorIcon::ResizeHorizontal);
        }
        let before = *value;
        if response.active && self.facts().mouse_down() {
            *value += pointer_delta(self.facts()).x * speed;
        }
        if response.focused {
            let steps = self.arrow_steps();
            *value += steps * speed.abs().max(f32::EPSILON);
        }
        response.changed = *value != before;

        let label = self.alloc_str(label);
        let node = ViewNode::new(ViewKind::Dragger, id).with_data(NodeData::Dragger { label, value: *value });
        let nid = self.add(node);
        self.handle(nid, response)
    }

    fn range(&mut self, kind: ViewKind, label: &str, value: &mut f32, min: f32, max: f32) -> Handle<'_> {
        let id = self.next_id(kind, Some(label));
        let mut response = self.interact(id);
        self.focusable(id);
        if response.pressed {
            self.capture(id);
        }
        if response.hovered || response.active {
            let cursor = match kind {
                ViewKind::Slider => CursorIcon::ResizeHorizontal,
                _ => CursorIcon::ResizeVertical,
            };
            self.request_cursor(cursor);
        }

        let (lo, hi) = bounds(min, max, *value);
        let span = hi - lo;
        let before = *value;
        if response.active && self.facts().mouse_down() && span > 0.0 {
            let rect = self.last_rect(id);
            let mouse = self.facts().mouse();
            let t = match kind {
                ViewKind::Slider => {
                    let w = rect.size.x - 2.0 * TRACK_INSET;
                    (w > 0.0).then(|| (mouse.x - rect.origin.x - TRACK_INSET) / w)
                }
                ViewKind::Fader => {
                    let h = rect.size.y - 2.0 * TRACK_INSET;
                    (h > 0.0).then(|| (rect.origin.y + rect.size.y - TRACK_INSET - mouse.y) / h)
                }
                _ => Some((*value - lo) / span - pointer_delta(self.facts()).y / KNOB_TRAVEL),
            };
            if let Some(t) = t {
                *value = lo + t.clamp(0.0, 1.0) * span;
            }
        }
        if response.focused {
            let steps = self.arrow_steps();
            *value += steps * KEY_STEP * span;
        }
        if value.is_finite() {
            *value = value.clamp(lo, hi);
        } else {
            *value = lo;
        }
        response.changed = *value != before;

        let label = self.alloc_str(label);
        let node = ViewNode::new(kind, id).with_data(NodeData::Range { label, value: *value, min: lo, max: hi });
        let nid = self.add(node);
        self.handle(nid, response)
    }

    /// Net arrow key presses this frame: right/up count up, left/down down.
    fn arrow_steps(&self) -> f32 {
        [(Key::ArrowRight, 1.0), (Key::ArrowUp, 1.0), (Key::ArrowLeft, -1.0), (Key::ArrowDown, -1.0)]
            .iter()
            .filter(|(k, _)| self.key_pressed(*k))
            .map(|(_, s)| s)
            .sum()
    }
}

/// Sorted `(lo, hi)` of a range widget. Non-finite bounds collapse the range
/// onto the current value (or zero), which pins the widget in place.
fn bounds(min: f32, max: f32, value: f32) -> (f32, f32) {
    if min.is_finite() && max.is_finite() {
        (min.min(max), min.max(max))
    } else {
        log::debug!("range widget with non-finite bounds {min}..{max}");
        let v = if value.is_finite() { value } else { 0.0 };
        (v, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::context::Context;
    use nabu_engine::coords::Vec2;

    fn cx() -> Context {
        Context::new(Config::default().with_fixed_dt(1.0 / 60.0).with_strict(false))
    }

    fn at(cx: &mut Context, x: f32, y: f32, down: bool) {
        cx.store.facts.set_mouse(Vec2::new(x, y));
        cx.store.facts.set_mouse_down(down);
    }

    // ── capture ───────────────────────────────────────────────────────────

    #[test]
    fn slider_keeps_capture_outside_and_clamps_at_max() {
        let mut cx = cx();
        let mut value = 0.0;
        let mut active = Vec::new();
        // 150 wide: the track runs from x = 8 to x = 142.
        for (x, y, down) in [(75.0, 15.0, false), (75.0, 15.0, true), (400.0, 300.0, true), (400.0, 300.0, false)] {
            at(&mut cx, x, y, down);
            cx.frame(800.0, 600.0, |ui| {
                active.push(ui.slider("volume", &mut value, 0.0, 100.0).size(150.0, 30.0).is_active());
            });
            if down && x == 75.0 {
                assert!((value - 50.0).abs() < 1e-3);
            }
        }
        assert_eq!(active, [false, true, true, false]);
        assert_eq!(value, 100.0);
        assert!(cx.store.ephemeral.captured().is_none());
    }

    #[test]
    fn fader_minimum_is_at_the_bottom() {
        let mut cx = cx();
        let mut value = 5.0;
        for (y, down) in [(142.0, false), (142.0, true), (-50.0, true)] {
            at(&mut cx, 15.0, y, down);
            cx.frame(800.0, 600.0, |ui| {
                ui.fader("gain", &mut value, 0.0, 10.0).size(30.0, 150.0);
            });
            if down && y == 142.0 {
                assert!(value.abs() < 1e-3);
            }
        }
        assert_eq!(value, 10.0);
    }

    #[test]
    fn arrow_keys_step_a_focused_slider() {
        let mut cx = cx();
        let mut value = 50.0;
        cx.frame(800.0, 600.0, |ui| {
            ui.slider("volume", &mut value, 0.0, 100.0);
        });
        cx.store.facts.press_key(Key::Tab);
        cx.frame(800.0, 600.0, |ui| {
            ui.slider("volume", &mut value, 0.0, 100.0);
        });
        cx.store.facts.press_key(Key::ArrowRight);
        cx.frame(800.0, 600.0, |ui| {
            ui.slider("volume", &mut value, 0.0, 100.0);
        });
        assert!((value - 51.0).abs() < 1e-3);
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn reversed_bounds_are_sorted() {
        assert_eq!(bounds(10.0, -10.0, 0.0), (-10.0, 10.0));
    }

    #[test]
    fn non_finite_bounds_pin_the_value() {
        assert_eq!(bounds(f32::NAN, 1.0, 0.3), (0.3, 0.3));
        assert_eq!(bounds(0.0, f32::INFINITY, f32::NAN), (0.0, 0.0));
    }

    #[test]
    fn nan_bounds_do_not_panic_while_dragging() {
        let mut cx = cx();
        let mut value = 0.3;
        for down in [false, true, true] {
            at(&mut cx, 75.0, 15.0, down);
            cx.frame(800.0, 600.0, |ui| {
                ui.slider("broken", &mut value, f32::NAN, 1.0).size(150.0, 30.0);
                ui.knob("broken knob", &mut value, 0.0, f32::NAN);
            });
        }
        assert_eq!(value, 0.3);
    }
}
