// crates/input_core/src/input/config.rs

use glam::Vec2;
use input_shared::ActionType;
use winit::keyboard::KeyCode;

use crate::engine::InputEngine;
use crate::error::RegistryError;
use crate::input::binding::GamepadButton;
use crate::input::{ActionOptions, BindingOptions, InputRegistry};

/// Centralized defaults for input configuration.
/// This keeps hosts small and makes it easy to tweak or mod.
pub struct InputDefaults;

impl InputDefaults {
    pub const PLAY_CONTEXT: &'static str = "PlayContext";
    pub const MENU_CONTEXT: &'static str = "MenuContext";

    /// Installs gameplay and menu contexts with their default bindings.
    ///
    /// PlayContext (priority 1, enabled): `Move` on WASD, `Sprint` on left shift.
    /// MenuContext (priority 2, sink, disabled): `Back` on Escape. Enabling the
    /// menu swallows Escape but leaves movement keys to gameplay.
    pub fn setup<E: InputEngine>(registry: &mut InputRegistry<E>) -> Result<(), RegistryError> {
        let play = Self::PLAY_CONTEXT;
        registry.set_context_priority(play, 1);

        registry.get_input_action("Move", play, ActionOptions::typed(ActionType::Direction2D));
        for (name, key, direction) in [
            ("Up", KeyCode::KeyW, Vec2::Y),
            ("Down", KeyCode::KeyS, Vec2::NEG_Y),
            ("Left", KeyCode::KeyA, Vec2::NEG_X),
            ("Right", KeyCode::KeyD, Vec2::X),
        ] {
            registry.get_input_binding(
                name,
                "Move",
                play,
                &BindingOptions::key(key).with_direction_2d(direction),
            )?;
        }

        registry.get_input_action("Sprint", play, ActionOptions::typed(ActionType::Bool));
        registry.get_input_binding("Keyboard", "Sprint", play, &BindingOptions::key(KeyCode::ShiftLeft))?;
        registry.get_input_binding(
            "Gamepad",
            "Sprint",
            play,
            &BindingOptions::key(GamepadButton::LeftStick),
        )?;
        registry.set_context_enabled(play, true);

        let menu = Self::MENU_CONTEXT;
        registry.set_context_priority(menu, 2);
        registry.set_context_sink(menu, true);
        registry.get_input_action("Back", menu, ActionOptions::typed(ActionType::Bool));
        registry.get_input_binding("Keyboard", "Back", menu, &BindingOptions::key(KeyCode::Escape))?;
        registry.get_input_binding("Gamepad", "Back", menu, &BindingOptions::key(GamepadButton::East))?;

        Ok(())
    }
}
