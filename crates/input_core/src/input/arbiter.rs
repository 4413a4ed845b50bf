// crates/input_core/src/input/arbiter.rs
use std::cmp::Reverse;

use glam::{Vec2, Vec3};
use input_shared::{ActionState, ActionType};

/// One held binding's contribution to its action.
#[derive(Debug, Clone, Copy)]
pub struct Signal {
    pub direction: Vec3,
    pub scale: f32,
}

/// Folds the signals of every held binding into a single action state.
#[derive(Default)]
pub struct Arbiter {
    // Made public for inspector access
    pub signals: Vec<Signal>,
}

impl Arbiter {
    pub fn clear(&mut self) {
        self.signals.clear();
    }

    pub fn add(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub fn resolve(&self, action_type: ActionType, pointer: Option<Vec2>) -> ActionState {
        let sum = self
            .signals
            .iter()
            .fold(Vec3::ZERO, |acc, s| acc + s.direction * s.scale);

        match action_type {
            ActionType::Bool => ActionState::Bool(!self.signals.is_empty()),
            ActionType::Direction1D => ActionState::Direction1D(sum.x.clamp(-1.0, 1.0)),
            ActionType::Direction2D => {
                let mut vector = sum.truncate();
                // Diagonals must not be faster than a single axis.
                if vector.length_squared() > 1.0 {
                    vector = vector.normalize();
                }
                ActionState::Direction2D(vector)
            }
            ActionType::Direction3D => {
                let mut vector = sum;
                if vector.length_squared() > 1.0 {
                    vector = vector.normalize();
                }
                ActionState::Direction3D(vector)
            }
            ActionType::ViewportPosition => {
                ActionState::ViewportPosition(pointer.unwrap_or(Vec2::ZERO))
            }
        }
    }
}

/// Orders scopes highest priority first. Equal priorities keep creation order.
pub fn rank_by_priority<T>(scopes: &mut [T], key: impl Fn(&T) -> (i32, u64)) {
    scopes.sort_by_key(|scope| {
        let (priority, sequence) = key(scope);
        (Reverse(priority), sequence)
    });
}
