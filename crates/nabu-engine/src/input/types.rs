use crate::coords::Vec2;

/// Keys the UI pipeline reacts to.
///
/// Editing, navigation and focus keys are named. Other printable keys arrive
/// as `Char` (lowercase, unshifted) so shortcuts can match them; the text they
/// produce is delivered separately as characters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Space,
    Backspace,
    Delete,
    Home,
    End,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Char(char),
    /// Anything else, by platform code.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// The pointer buttons tracked in [`super::Facts`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Wheel motion as reported by the device: whole lines or precise pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Lines(Vec2),
    Pixels(Vec2),
}

/// Input method editor lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ImeEvent {
    Enabled,
    /// Composition in progress; `cursor` is a byte range into `text`.
    Preedit { text: String, cursor: Option<(usize, usize)> },
    /// Composition finished with this result.
    Commit(String),
    Disabled,
}

/// One raw input occurrence, in logical pixels.
///
/// Backends that receive events instead of polling fold them into
/// [`super::Facts`] with `Facts::apply_event`. Key and button events pick up
/// the modifiers and pointer position already recorded there.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    /// Pointer left the window surface.
    PointerLeft,
    PointerButton { button: MouseButton, pressed: bool },
    Wheel(WheelDelta),
    Key { key: Key, state: KeyState, repeat: bool },
    /// Committed text outside of an IME composition.
    Text(String),
    ModifiersChanged(Modifiers),
    Ime(ImeEvent),
    /// Window focus change.
    Focused(bool),
}
