// crates/input_core/src/input/binding.rs
//! Physical input descriptors a binding can be attached to.

use glam::{Vec2, Vec3};
use winit::keyboard::KeyCode;

/// Gamepad buttons, named by position rather than by vendor glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    South,
    East,
    West,
    North,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

/// Anything the engine treats as a key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKey {
    Keyboard(KeyCode),
    Gamepad(GamepadButton),
    /// Pointer motion. Only valid for `ViewportPosition` actions.
    PointerMovement,
}

impl From<KeyCode> for InputKey {
    fn from(key: KeyCode) -> Self {
        InputKey::Keyboard(key)
    }
}

impl From<GamepadButton> for InputKey {
    fn from(button: GamepadButton) -> Self {
        InputKey::Gamepad(button)
    }
}

/// Reference to an on-screen button registered with the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UiButton(pub u32);

/// What physical input drives a binding. A binding has exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(InputKey),
    UiButton(UiButton),
}

impl From<KeyCode> for InputSource {
    fn from(key: KeyCode) -> Self {
        InputSource::Key(InputKey::Keyboard(key))
    }
}

impl From<GamepadButton> for InputSource {
    fn from(button: GamepadButton) -> Self {
        InputSource::Key(InputKey::Gamepad(button))
    }
}

impl From<UiButton> for InputSource {
    fn from(button: UiButton) -> Self {
        InputSource::UiButton(button)
    }
}

/// Validated binding parameters handed to the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BindingParams {
    pub source: InputSource,
    /// Multiplier applied to `direction` while the source is held.
    pub scale: f32,
    /// Contribution to a directional action while held. Ignored by `Bool`.
    pub direction: Vec3,
}

/// Raw input as delivered by the platform layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawInput {
    Pressed(InputSource),
    Released(InputSource),
    PointerMoved(Vec2),
}
