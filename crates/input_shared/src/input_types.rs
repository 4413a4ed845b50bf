// crates/input_shared/src/input_types.rs
//! Action value types passed from engine backends to action callbacks.

use glam::{Vec2, Vec3};

/// Declared value type of an action. Fixed when the action is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionType {
    #[default]
    Bool,
    Direction1D,
    Direction2D,
    Direction3D,
    ViewportPosition,
}

impl ActionType {
    /// State an action of this type reports while nothing drives it.
    pub fn default_state(self) -> ActionState {
        match self {
            ActionType::Bool => ActionState::Bool(false),
            ActionType::Direction1D => ActionState::Direction1D(0.0),
            ActionType::Direction2D => ActionState::Direction2D(Vec2::ZERO),
            ActionType::Direction3D => ActionState::Direction3D(Vec3::ZERO),
            ActionType::ViewportPosition => ActionState::ViewportPosition(Vec2::ZERO),
        }
    }

    pub fn is_directional(self) -> bool {
        matches!(
            self,
            ActionType::Direction1D | ActionType::Direction2D | ActionType::Direction3D
        )
    }
}

/// Current value of an action. The variant always matches the action's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionState {
    Bool(bool),
    Direction1D(f32),
    Direction2D(Vec2),
    Direction3D(Vec3),
    ViewportPosition(Vec2),
}

impl ActionState {
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionState::Bool(_) => ActionType::Bool,
            ActionState::Direction1D(_) => ActionType::Direction1D,
            ActionState::Direction2D(_) => ActionType::Direction2D,
            ActionState::Direction3D(_) => ActionType::Direction3D,
            ActionState::ViewportPosition(_) => ActionType::ViewportPosition,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ActionState::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_axis(&self) -> Option<f32> {
        match *self {
            ActionState::Direction1D(value) => Some(value),
            _ => None,
        }
    }

    /// Planar value of a `Direction2D` or `ViewportPosition` state.
    pub fn as_vec2(&self) -> Option<Vec2> {
        match *self {
            ActionState::Direction2D(value) | ActionState::ViewportPosition(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match *self {
            ActionState::Direction3D(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == self.action_type().default_state()
    }
}
