// crates/input_core/src/input/poller.rs

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::binding::{InputKey, InputSource, RawInput};

/// Low-level collector that turns winit window events into `RawInput`.
/// Tracks held physical keys so OS key repeats never reach the engine.
#[derive(Default)]
pub struct InputPoller {
    active_keys: Vec<KeyCode>,
}

impl InputPoller {
    pub fn new() -> Self {
        Self {
            active_keys: Vec::new(),
        }
    }

    /// Translate a single winit WindowEvent. Returns `None` for events that
    /// carry no new input.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<RawInput> {
        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => self.handle_keyboard_input(key_event),
            WindowEvent::CursorMoved { position, .. } => Some(RawInput::PointerMoved(Vec2::new(
                position.x as f32,
                position.y as f32,
            ))),
            _ => None,
        }
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) -> Option<RawInput> {
        if key_event.repeat {
            return None;
        }
        match key_event.physical_key {
            PhysicalKey::Code(keycode) => self.handle_key(keycode, key_event.state),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    pub fn handle_key(&mut self, keycode: KeyCode, state: ElementState) -> Option<RawInput> {
        let source = InputSource::Key(InputKey::Keyboard(keycode));
        match state {
            ElementState::Pressed => {
                if self.active_keys.contains(&keycode) {
                    return None;
                }
                self.active_keys.push(keycode);
                Some(RawInput::Pressed(source))
            }
            ElementState::Released => {
                if !self.active_keys.contains(&keycode) {
                    return None;
                }
                self.active_keys.retain(|&k| k != keycode);
                Some(RawInput::Released(source))
            }
        }
    }

    /// Returns true if a given physical key is currently pressed.
    pub fn is_key_active(&self, key: KeyCode) -> bool {
        self.active_keys.contains(&key)
    }

    /// Releases everything still held, e.g. when the window loses focus.
    pub fn release_all(&mut self) -> Vec<RawInput> {
        self.active_keys
            .drain(..)
            .map(|k| RawInput::Released(InputSource::Key(InputKey::Keyboard(k))))
            .collect()
    }
}
