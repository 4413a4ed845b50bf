// crates/input_core/src/input/records.rs
//! Registry-side records. Each record exclusively owns its engine handle,
//! its children, and (for actions) the callback subscription.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;
use input_shared::{ActionHandle, ActionState, ActionType, BindingHandle, ContextHandle};
use tracing::debug;

use super::binding::{BindingParams, InputSource};
use crate::engine::InputEngine;

pub type ActionCallback = Box<dyn FnMut(ActionState)>;

/// The single callback slot of an action. Dropping it detaches the callback.
pub struct Subscription {
    id: u64,
    callback: ActionCallback,
}

impl Subscription {
    pub(crate) fn new(id: u64, callback: ActionCallback) -> Self {
        Self { id, callback }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn notify(&mut self, state: ActionState) {
        (self.callback)(state);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription({})", self.id)
    }
}

#[derive(Debug)]
pub struct BindingRecord {
    pub(crate) handle: BindingHandle,
    pub(crate) name: String,
    pub(crate) params: BindingParams,
}

impl BindingRecord {
    pub fn handle(&self) -> BindingHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> InputSource {
        self.params.source
    }

    pub fn scale(&self) -> f32 {
        self.params.scale
    }

    pub fn direction(&self) -> Vec3 {
        self.params.direction
    }
}

#[derive(Debug)]
pub struct ActionRecord {
    pub(crate) handle: ActionHandle,
    pub(crate) name: String,
    pub(crate) action_type: ActionType,
    pub(crate) subscription: Option<Subscription>,
    pub(crate) bindings: HashMap<String, BindingRecord>,
}

impl ActionRecord {
    pub(crate) fn new(handle: ActionHandle, name: &str, action_type: ActionType) -> Self {
        Self {
            handle,
            name: name.to_string(),
            action_type,
            subscription: None,
            bindings: HashMap::new(),
        }
    }

    pub fn handle(&self) -> ActionHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn has_callback(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn subscription_id(&self) -> Option<u64> {
        self.subscription.as_ref().map(Subscription::id)
    }

    pub fn binding(&self, name: &str) -> Option<&BindingRecord> {
        self.bindings.get(name)
    }

    /// Bindings sorted by name.
    pub fn bindings(&self) -> Vec<&BindingRecord> {
        let mut bindings: Vec<_> = self.bindings.values().collect();
        bindings.sort_by(|a, b| a.name.cmp(&b.name));
        bindings
    }

    /// Detaches the current callback (if any) before installing the new one.
    pub(crate) fn attach(&mut self, subscription: Subscription) {
        if let Some(previous) = self.subscription.take() {
            debug!(action = %self.name, id = previous.id, "detached action callback");
        }
        debug!(action = %self.name, id = subscription.id, "attached action callback");
        self.subscription = Some(subscription);
    }

    pub(crate) fn detach(&mut self) -> bool {
        match self.subscription.take() {
            Some(previous) => {
                debug!(action = %self.name, id = previous.id, "detached action callback");
                true
            }
            None => false,
        }
    }

    /// Releases the callback, then every binding, then the action itself.
    pub(crate) fn destroy<E: InputEngine>(mut self, engine: &mut E) {
        self.detach();
        for (_, binding) in self.bindings.drain() {
            engine.destroy_binding(binding.handle);
        }
        engine.destroy_action(self.handle);
        debug!(action = %self.name, handle = ?self.handle, "destroyed input action");
    }
}

#[derive(Debug)]
pub struct ContextRecord {
    pub(crate) handle: ContextHandle,
    pub(crate) name: String,
    pub(crate) enabled: bool,
    pub(crate) priority: i32,
    pub(crate) sink: bool,
    // Creation order, used to break priority ties.
    pub(crate) sequence: u64,
    pub(crate) actions: HashMap<String, ActionRecord>,
}

impl ContextRecord {
    pub(crate) fn new(handle: ContextHandle, name: &str, sequence: u64) -> Self {
        Self {
            handle,
            name: name.to_string(),
            enabled: false,
            priority: 0,
            sink: false,
            sequence,
            actions: HashMap::new(),
        }
    }

    pub fn handle(&self) -> ContextHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn sink(&self) -> bool {
        self.sink
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn action(&self, name: &str) -> Option<&ActionRecord> {
        self.actions.get(name)
    }

    /// Actions sorted by name.
    pub fn actions(&self) -> Vec<&ActionRecord> {
        let mut actions: Vec<_> = self.actions.values().collect();
        actions.sort_by(|a, b| a.name.cmp(&b.name));
        actions
    }

    /// Walks the hierarchy top-down: actions (and their bindings) first, then the context.
    pub(crate) fn destroy<E: InputEngine>(mut self, engine: &mut E) {
        for (_, action) in self.actions.drain() {
            action.destroy(engine);
        }
        engine.destroy_context(self.handle);
        debug!(context = %self.name, handle = ?self.handle, "destroyed input context");
    }
}
