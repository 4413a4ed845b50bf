// crates/input_core/src/input/options.rs
//! Creation options for actions and bindings. Only consulted on first creation.

use glam::{Vec2, Vec3};
use input_shared::ActionType;

use super::binding::{BindingParams, InputKey, InputSource, UiButton};
use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionOptions {
    pub action_type: ActionType,
}

impl ActionOptions {
    pub fn typed(action_type: ActionType) -> Self {
        Self { action_type }
    }
}

/// Binding options. Exactly one of `key_code` / `ui_button` must be set.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingOptions {
    pub key_code: Option<InputKey>,
    pub ui_button: Option<UiButton>,
    pub scale: f32,
    pub direction: Vec3,
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            key_code: None,
            ui_button: None,
            scale: 1.0,
            direction: Vec3::X,
        }
    }
}

impl BindingOptions {
    pub fn key(key: impl Into<InputKey>) -> Self {
        Self {
            key_code: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn ui_button(button: UiButton) -> Self {
        Self {
            ui_button: Some(button),
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_direction_2d(self, direction: Vec2) -> Self {
        self.with_direction(direction.extend(0.0))
    }

    /// Validates the mutually exclusive source fields for `context/action/binding`.
    pub(crate) fn params(
        &self,
        context: &str,
        action: &str,
        binding: &str,
    ) -> Result<BindingParams, RegistryError> {
        let source = match (self.key_code, self.ui_button) {
            (Some(key), None) => InputSource::Key(key),
            (None, Some(button)) => InputSource::UiButton(button),
            (None, None) => {
                return Err(RegistryError::MissingBindingSource {
                    context: context.to_string(),
                    action: action.to_string(),
                    binding: binding.to_string(),
                })
            }
            (Some(_), Some(_)) => {
                return Err(RegistryError::ConflictingBindingSource {
                    context: context.to_string(),
                    action: action.to_string(),
                    binding: binding.to_string(),
                })
            }
        };

        Ok(BindingParams {
            source,
            scale: self.scale,
            direction: self.direction,
        })
    }
}
