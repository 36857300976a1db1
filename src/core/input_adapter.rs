use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller, KeyTable};

/// Adapter that bridges winit events to the [`Controller`] trait.
///
/// Pointer deltas accumulate across events; the frame loop calls
/// [`reset_deltas`](Self::reset_deltas) once per frame after consuming
/// them, so no state hides between frames.
#[derive(Debug, Clone)]
pub struct WinitController {
    keys: KeyTable,
    mouse_position: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
}

impl WinitController {
    /// Create an adapter with every key up and no pointer position
    pub fn new() -> Self {
        Self {
            keys: KeyTable::new(),
            mouse_position: None,
            mouse_delta: (0.0, 0.0),
        }
    }

    /// Fold a winit window event into the input state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.keys.set(button, event.state == ElementState::Pressed);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = Self::mouse_button_to_button(*button) {
                    self.keys.set(button, *state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x as f32, position.y as f32);
                if let Some(old_pos) = self.mouse_position {
                    self.mouse_delta.0 += new_pos.0 - old_pos.0;
                    self.mouse_delta.1 += new_pos.1 - old_pos.1;
                }
                self.mouse_position = Some(new_pos);
            }
            _ => {}
        }
    }

    /// Zero the accumulated pointer delta; call at the end of each frame
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = (0.0, 0.0);
    }

    /// Map winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map winit MouseButton to Button
    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.keys.is_down(button)
    }

    fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }
}
