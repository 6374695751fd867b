use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::{
    InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Positions stay in physical pixels. Returns `None` for events not
/// represented by the input subsystem.
pub(crate) fn translate_window_event(state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved(PointerMoveEvent {
            x: position.x as f32,
            y: position.y as f32,
        })),

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };

            // winit 0.30 does not expose cursor query; use tracked pointer position.
            // Without one there is nowhere to put the press.
            let Some((x, y)) = state.pointer_pos else {
                log::debug!("{button:?} {st:?} with no pointer position; dropped");
                return None;
            };

            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: st,
                x,
                y,
            }))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state: st,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,

            KeyCode::Equal | KeyCode::NumpadAdd => Key::Plus,
            KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,

            KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit0,
            KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
            KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
            KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,
            KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit4,
            KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit5,
            KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit6,
            KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit7,
            KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit8,
            KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit9,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
