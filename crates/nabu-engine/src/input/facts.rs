use crate::coords::Vec2;

use super::types::{ImeEvent, InputEvent, Key, KeyState, Modifiers, MouseButton, WheelDelta};

/// Pixel-precise wheel deltas are divided by this to express them in wheel lines.
pub const PIXELS_PER_LINE: f32 = 20.0;

/// Held state of the three primary pointer buttons.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl Buttons {
    #[inline]
    pub fn get(self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    #[inline]
    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Right => self.right = down,
            MouseButton::Middle => self.middle = down,
        }
    }
}

/// One raw key transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    pub modifiers: Modifiers,
    pub repeat: bool,
}

/// Raw IME state as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImeFacts {
    pub active: bool,
    pub composition: String,
    /// Byte range of the composition cursor, if the platform reports one.
    pub cursor: Option<(usize, usize)>,
    /// Result committed this frame; cleared by `advance_frame`.
    pub committed: String,
}

/// Raw platform inputs for the current frame.
///
/// Facts are recorded, never interpreted: there is no "clicked" or "dragging"
/// here. Edge detection belongs to whoever reads them.
#[derive(Debug, Clone, Default)]
pub struct Facts {
    mouse: Vec2,
    prev_mouse: Vec2,
    pointer_inside: bool,
    down: Buttons,
    was_down: Buttons,
    wheel: Vec2,
    chars: Vec<char>,
    keys: Vec<KeyEvent>,
    modifiers: Modifiers,
    ime: ImeFacts,
    window_focused: bool,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    // ── raw reads ─────────────────────────────────────────────────────────

    #[inline]
    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    /// Pointer position at the previous `advance_frame`.
    #[inline]
    pub fn prev_mouse(&self) -> Vec2 {
        self.prev_mouse
    }

    #[inline]
    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    #[inline]
    pub fn buttons(&self) -> Buttons {
        self.down
    }

    #[inline]
    pub fn prev_buttons(&self) -> Buttons {
        self.was_down
    }

    #[inline]
    pub fn mouse_down(&self) -> bool {
        self.down.left
    }

    #[inline]
    pub fn was_down(&self) -> bool {
        self.was_down.left
    }

    /// Accumulated wheel delta in lines (+y scrolls content up).
    #[inline]
    pub fn wheel(&self) -> Vec2 {
        self.wheel
    }

    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    #[inline]
    pub fn keys(&self) -> &[KeyEvent] {
        &self.keys
    }

    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    pub fn ime(&self) -> &ImeFacts {
        &self.ime
    }

    #[inline]
    pub fn window_focused(&self) -> bool {
        self.window_focused
    }

    // ── raw writes ────────────────────────────────────────────────────────

    pub fn set_mouse(&mut self, pos: Vec2) {
        self.mouse = pos;
        self.pointer_inside = true;
    }

    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        self.down.set(button, down);
    }

    /// Shorthand for the primary (left) button.
    pub fn set_mouse_down(&mut self, down: bool) {
        self.down.left = down;
    }

    pub fn add_wheel(&mut self, delta: Vec2) {
        self.wheel += delta;
    }

    pub fn push_char(&mut self, c: char) {
        self.chars.push(c);
    }

    pub fn push_key(&mut self, ev: KeyEvent) {
        self.keys.push(ev);
    }

    /// Records a key press with the current modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.keys.push(KeyEvent { key, state: KeyState::Pressed, modifiers: self.modifiers, repeat: false });
    }

    pub fn set_modifiers(&mut self, m: Modifiers) {
        self.modifiers = m;
    }

    pub fn set_ime_composition(&mut self, text: impl Into<String>, cursor: Option<(usize, usize)>) {
        self.ime.active = true;
        self.ime.composition = text.into();
        self.ime.cursor = cursor;
    }

    pub fn commit_ime(&mut self, text: &str) {
        self.ime.committed.push_str(text);
        self.ime.composition.clear();
        self.ime.cursor = None;
    }

    /// Applies a platform-agnostic input event.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.window_focused = *f;
                if !*f {
                    // Avoids stuck buttons when focus changes mid-press.
                    self.down = Buttons::default();
                }
            }

            InputEvent::PointerMoved(pos) => self.set_mouse(*pos),

            InputEvent::PointerLeft => self.pointer_inside = false,

            InputEvent::Key { key, state, repeat } => {
                self.keys.push(KeyEvent { key: *key, state: *state, modifiers: self.modifiers, repeat: *repeat });
            }

            InputEvent::PointerButton { button, pressed } => self.down.set(*button, *pressed),

            InputEvent::Wheel(delta) => {
                self.wheel += match *delta {
                    WheelDelta::Lines(v) => v,
                    WheelDelta::Pixels(v) => v / PIXELS_PER_LINE,
                };
            }

            InputEvent::Text(text) => {
                self.chars.extend(text.chars().filter(|c| !c.is_control()));
            }

            InputEvent::Ime(ime) => match ime {
                ImeEvent::Enabled => self.ime.active = true,
                ImeEvent::Preedit { text, cursor } => self.set_ime_composition(text.clone(), *cursor),
                ImeEvent::Commit(text) => self.commit_ime(text),
                ImeEvent::Disabled => {
                    self.ime.active = false;
                    self.ime.composition.clear();
                    self.ime.cursor = None;
                }
            },
        }
    }

    /// Rotates per-frame facts: buttons become the previous state, pointer
    /// position becomes the previous position, one-shot streams are cleared.
    ///
    /// Held state (buttons, pointer, modifiers, IME composition) survives.
    pub fn advance_frame(&mut self) {
        self.was_down = self.down;
        self.prev_mouse = self.mouse;
        self.wheel = Vec2::ZERO;
        self.chars.clear();
        self.keys.clear();
        self.ime.committed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton { button, pressed: true }
    }

    // ── apply_event ───────────────────────────────────────────────────────

    #[test]
    fn move_then_press_sets_pointer_and_down() {
        let mut f = Facts::new();
        f.apply_event(&InputEvent::PointerMoved(Vec2::new(3.0, 4.0)));
        f.apply_event(&press(MouseButton::Left));
        assert_eq!(f.mouse(), Vec2::new(3.0, 4.0));
        assert!(f.pointer_inside());
        assert!(f.mouse_down());
        assert!(!f.was_down());
    }

    #[test]
    fn key_events_carry_current_modifiers() {
        let mut f = Facts::new();
        f.apply_event(&InputEvent::ModifiersChanged(Modifiers { ctrl: true, ..Modifiers::default() }));
        f.apply_event(&InputEvent::Key { key: Key::Char('a'), state: KeyState::Pressed, repeat: false });
        assert_eq!(f.keys().len(), 1);
        assert!(f.keys()[0].modifiers.ctrl);
        assert_eq!(f.keys()[0].key, Key::Char('a'));
    }

    #[test]
    fn focus_loss_releases_buttons() {
        let mut f = Facts::new();
        f.apply_event(&press(MouseButton::Right));
        f.apply_event(&InputEvent::Focused(false));
        assert_eq!(f.buttons(), Buttons::default());
    }

    #[test]
    fn pixel_wheel_is_converted_to_lines() {
        let mut f = Facts::new();
        f.apply_event(&InputEvent::Wheel(WheelDelta::Pixels(Vec2::new(0.0, -40.0))));
        f.apply_event(&InputEvent::Wheel(WheelDelta::Lines(Vec2::new(0.0, -1.0))));
        assert_eq!(f.wheel(), Vec2::new(0.0, -3.0));
    }

    #[test]
    fn text_event_drops_control_chars() {
        let mut f = Facts::new();
        f.apply_event(&InputEvent::Text("a\u{8}b".into()));
        assert_eq!(f.chars(), &['a', 'b']);
    }

    #[test]
    fn ime_commit_clears_composition() {
        let mut f = Facts::new();
        f.apply_event(&InputEvent::Ime(ImeEvent::Preedit { text: "ni".into(), cursor: Some((2, 2)) }));
        assert_eq!(f.ime().composition, "ni");
        f.apply_event(&InputEvent::Ime(ImeEvent::Commit("你".into())));
        assert_eq!(f.ime().committed, "你");
        assert!(f.ime().composition.is_empty());
    }

    // ── advance_frame ─────────────────────────────────────────────────────

    #[test]
    fn advance_rotates_buttons_and_clears_streams() {
        let mut f = Facts::new();
        f.set_mouse(Vec2::new(10.0, 10.0));
        f.set_mouse_down(true);
        f.add_wheel(Vec2::new(0.0, 2.0));
        f.push_char('x');
        f.press_key(Key::Tab);
        f.commit_ime("y");

        f.advance_frame();

        assert!(f.was_down());
        assert!(f.mouse_down());
        assert_eq!(f.prev_mouse(), Vec2::new(10.0, 10.0));
        assert_eq!(f.wheel(), Vec2::ZERO);
        assert!(f.chars().is_empty());
        assert!(f.keys().is_empty());
        assert!(f.ime().committed.is_empty());
    }
}
