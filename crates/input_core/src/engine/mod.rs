// crates/input_core/src/engine/mod.rs
//! Boundary to the input-delivery engine.
//!
//! The registry never touches devices. It owns records and forwards every
//! mutation to an `InputEngine`, which owns the native objects, decides which
//! enabled context claims each raw input, and reports action state changes
//! through a channel the registry drains on its own schedule.

pub mod sim;

pub use sim::SimEngine;

use crossbeam_channel::Receiver;
use input_shared::{ActionHandle, ActionState, ActionType, BindingHandle, ContextHandle};

use crate::error::EngineError;
use crate::input::binding::BindingParams;

/// A state change reported by the engine for one action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEvent {
    pub action: ActionHandle,
    pub state: ActionState,
}

pub trait InputEngine {
    fn create_context(&mut self, name: &str) -> ContextHandle;
    fn set_context_enabled(&mut self, context: ContextHandle, enabled: bool);
    /// Higher priorities claim input first when several contexts are enabled.
    fn set_context_priority(&mut self, context: ContextHandle, priority: i32);
    /// A sinking context stops inputs it binds from reaching lower priorities.
    fn set_context_sink(&mut self, context: ContextHandle, sink: bool);
    fn destroy_context(&mut self, context: ContextHandle);

    fn create_action(
        &mut self,
        context: ContextHandle,
        name: &str,
        action_type: ActionType,
    ) -> ActionHandle;
    fn destroy_action(&mut self, action: ActionHandle);

    fn create_binding(
        &mut self,
        action: ActionHandle,
        name: &str,
        params: &BindingParams,
    ) -> Result<BindingHandle, EngineError>;
    fn destroy_binding(&mut self, binding: BindingHandle);

    fn action_state(&self, action: ActionHandle) -> Option<ActionState>;

    /// Queue of state changes. Every call returns a handle to the same queue.
    fn events(&self) -> Receiver<ActionEvent>;
}
