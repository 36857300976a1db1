/// Keyboard/mouse button identifier.
///
/// Discriminants index into [`KeyTable`]; the enum stays well under the
/// table's 256 slots.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Shift,
    Escape,
    MouseLeft,
    MouseRight,
}

/// Fixed 256-entry down-state table indexed by [`Button`].
#[derive(Debug, Clone)]
pub struct KeyTable {
    down: [bool; 256],
}

impl KeyTable {
    /// Create a table with every key up.
    pub fn new() -> Self {
        Self { down: [false; 256] }
    }

    /// Record a button's down state.
    pub fn set(&mut self, button: Button, down: bool) {
        self.down[button as usize] = down;
    }

    /// Check a button's down state.
    pub fn is_down(&self, button: Button) -> bool {
        self.down[button as usize]
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.down = [false; 256];
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame input state - key table plus pointer position and delta
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Current pointer position in surface pixels, if the pointer has
    /// entered the surface
    fn mouse_position(&self) -> Option<(f32, f32)>;

    /// Pointer movement accumulated since the caller last reset deltas
    fn mouse_delta(&self) -> (f32, f32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_table_round_trip() {
        let mut table = KeyTable::new();
        assert!(!table.is_down(Button::Space));

        table.set(Button::Space, true);
        table.set(Button::KeyW, true);
        assert!(table.is_down(Button::Space));
        assert!(table.is_down(Button::KeyW));
        assert!(!table.is_down(Button::KeyA));

        table.set(Button::Space, false);
        assert!(!table.is_down(Button::Space));
        assert!(table.is_down(Button::KeyW));
    }

    #[test]
    fn test_key_table_clear() {
        let mut table = KeyTable::new();
        table.set(Button::Escape, true);
        table.set(Button::MouseLeft, true);

        table.clear();
        assert!(!table.is_down(Button::Escape));
        assert!(!table.is_down(Button::MouseLeft));
    }

    #[test]
    fn test_button_discriminants_fit_table() {
        let all = [
            Button::KeyW,
            Button::KeyA,
            Button::KeyS,
            Button::KeyD,
            Button::KeyQ,
            Button::KeyE,
            Button::ArrowUp,
            Button::ArrowDown,
            Button::ArrowLeft,
            Button::ArrowRight,
            Button::Space,
            Button::Shift,
            Button::Escape,
            Button::MouseLeft,
            Button::MouseRight,
        ];

        let indices: HashSet<usize> = all.iter().map(|&b| b as usize).collect();
        assert_eq!(indices.len(), all.len());
        assert!(indices.iter().all(|&i| i < 256));
    }

    // Mock controller exercising the trait surface
    struct MockController {
        keys: KeyTable,
        position: Option<(f32, f32)>,
        delta: (f32, f32),
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.keys.is_down(button)
        }

        fn mouse_position(&self) -> Option<(f32, f32)> {
            self.position
        }

        fn mouse_delta(&self) -> (f32, f32) {
            self.delta
        }
    }

    #[test]
    fn test_controller_trait_via_mock() {
        let mut keys = KeyTable::new();
        keys.set(Button::KeyD, true);

        let controller = MockController {
            keys,
            position: Some((120.0, 45.0)),
            delta: (3.0, -2.0),
        };

        assert!(controller.is_down(Button::KeyD));
        assert!(!controller.is_down(Button::KeyA));
        assert_eq!(controller.mouse_position(), Some((120.0, 45.0)));
        assert_eq!(controller.mouse_delta(), (3.0, -2.0));
    }
}
