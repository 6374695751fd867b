use super::types::{InputEvent, PointerButtonEvent, PointerMoveEvent};

/// Current input state for the window.
///
/// Tracks the pointer so button presses, which winit reports without a
/// position, can be placed.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in physical window pixels; `None` while the pointer
    /// is outside the window or has not moved yet.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Applies `ev` to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
            | InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, MouseButton, MouseButtonState};

    #[test]
    fn pointer_follows_moves_and_presses() {
        let mut input = InputState::default();
        input.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 3.0, y: 4.0 }));
        assert_eq!(input.pointer_pos, Some((3.0, 4.0)));

        input.apply_event(&InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 10.0,
            y: 20.0,
        }));
        assert_eq!(input.pointer_pos, Some((10.0, 20.0)));
    }

    #[test]
    fn pointer_leaving_clears_position() {
        let mut input = InputState::default();
        input.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 3.0, y: 4.0 }));
        input.apply_event(&InputEvent::PointerLeft);
        assert_eq!(input.pointer_pos, None);
    }

    #[test]
    fn keys_leave_pointer_alone() {
        let mut input = InputState::default();
        input.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        input.apply_event(&InputEvent::Key { key: Key::Plus, state: KeyState::Pressed, repeat: false });
        assert_eq!(input.pointer_pos, Some((1.0, 2.0)));
    }
}
