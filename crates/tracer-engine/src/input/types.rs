/// Keyboard key identifier.
///
/// Only the keys the tracer reacts to are named; everything else arrives as
/// `Key::Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    /// `+` on the main row (shifted `=`) or the keypad.
    Plus,
    /// `-` on the main row or the keypad.
    Minus,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

impl Key {
    /// Numeric value for digit keys.
    pub fn digit(self) -> Option<u8> {
        let d = match self {
            Key::Digit0 => 0,
            Key::Digit1 => 1,
            Key::Digit2 => 2,
            Key::Digit3 => 3,
            Key::Digit4 => 4,
            Key::Digit5 => 5,
            Key::Digit6 => 6,
            Key::Digit7 => 7,
            Key::Digit8 => 8,
            Key::Digit9 => 9,
            _ => return None,
        };
        Some(d)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Pointer move event in physical window pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event.
///
/// Carries the pointer position at the time of the press so handlers do not
/// need to track it themselves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,
}

impl InputEvent {
    /// True for a fresh (non-repeat) press of `key`.
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(
            self,
            InputEvent::Key { key: k, state: KeyState::Pressed, repeat: false } if *k == key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_have_values() {
        assert_eq!(Key::Digit1.digit(), Some(1));
        assert_eq!(Key::Digit9.digit(), Some(9));
        assert_eq!(Key::Plus.digit(), None);
    }

    #[test]
    fn repeats_are_not_presses() {
        let press = InputEvent::Key { key: Key::Plus, state: KeyState::Pressed, repeat: false };
        let repeat = InputEvent::Key { key: Key::Plus, state: KeyState::Pressed, repeat: true };
        assert!(press.is_key_press(Key::Plus));
        assert!(!press.is_key_press(Key::Minus));
        assert!(!repeat.is_key_press(Key::Plus));
    }
}
