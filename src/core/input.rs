//! Input state tracking

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard and mouse input state
///
/// Threaded by reference through the frame update; there is no global
/// input state.
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Mouse movement delta since last frame
    mouse_delta: (f32, f32),
    /// Accumulated raw mouse delta (for when cursor is grabbed)
    mouse_delta_accumulated: (f32, f32),
    /// Whether mouse is captured
    mouse_captured: bool,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            mouse_delta_accumulated: (0.0, 0.0),
            mouse_captured: false,
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        if !self.keys_pressed.contains(key_code) {
                            self.keys_just_pressed.insert(*key_code);
                        }
                        self.keys_pressed.insert(*key_code);
                    }
                    ElementState::Released => {
                        self.keys_pressed.remove(key_code);
                    }
                }
            }
            _ => {}
        }
    }

    /// Process device event for raw mouse motion (when cursor is grabbed)
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta_accumulated.0 += delta.0 as f32;
        self.mouse_delta_accumulated.1 += delta.1 as f32;
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();

        if self.mouse_captured {
            self.mouse_delta = self.mouse_delta_accumulated;
        } else {
            self.mouse_delta = (0.0, 0.0);
        }
        self.mouse_delta_accumulated = (0.0, 0.0);
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Get mouse delta since last frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Set mouse captured state
    pub fn set_mouse_captured(&mut self, captured: bool) {
        self.mouse_captured = captured;
        if captured {
            self.mouse_delta = (0.0, 0.0);
            self.mouse_delta_accumulated = (0.0, 0.0);
        }
    }

    /// Check if mouse is captured
    pub fn is_mouse_captured(&self) -> bool {
        self.mouse_captured
    }
}

#[cfg(test)]
impl InputState {
    /// Force a key into the held state (tests cannot construct winit key events)
    pub(crate) fn press(&mut self, key: KeyCode) {
        self.keys_pressed.insert(key);
        self.keys_just_pressed.insert(key);
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press() {
        let mut input = InputState::new();

        assert!(!input.is_key_pressed(KeyCode::KeyW));

        input.keys_pressed.insert(KeyCode::KeyW);
        input.keys_just_pressed.insert(KeyCode::KeyW);

        assert!(input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_key_just_pressed(KeyCode::KeyW));

        input.end_frame();

        assert!(input.is_key_pressed(KeyCode::KeyW));
        assert!(!input.is_key_just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_mouse_delta_only_while_captured() {
        let mut input = InputState::new();

        input.process_mouse_motion((4.0, -2.0));
        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));

        input.set_mouse_captured(true);
        input.process_mouse_motion((4.0, -2.0));
        input.process_mouse_motion((1.0, 1.0));
        input.end_frame();
        assert_eq!(input.mouse_delta(), (5.0, -1.0));
    }
}
