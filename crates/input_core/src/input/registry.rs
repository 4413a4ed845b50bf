// crates/input_core/src/input/registry.rs
//! Context -> action -> binding registry with get-or-create accessors.
//!
//! Every accessor creates whatever is missing along its path and returns the
//! existing record untouched otherwise; creation options only matter the
//! first time. Teardown happens in `cleanup()` (and on drop).

use std::collections::HashMap;

use crossbeam_channel::Receiver;
use input_shared::{ActionHandle, ActionState, BindingHandle, ContextHandle};
use tracing::{debug, info, warn};

use super::arbiter::rank_by_priority;
use super::options::{ActionOptions, BindingOptions};
use super::records::{ActionRecord, BindingRecord, ContextRecord, Subscription};
use crate::engine::{ActionEvent, InputEngine, SimEngine};
use crate::error::RegistryError;

/// Handles of every record along one `context / action / binding` path.
#[derive(Debug, Clone, Copy)]
struct Path {
    context: ContextHandle,
    action: Option<ActionHandle>,
    binding: Option<BindingHandle>,
}

pub struct InputRegistry<E: InputEngine = SimEngine> {
    engine: E,
    events: Receiver<ActionEvent>,
    contexts: HashMap<String, ContextRecord>,
    // Routes engine events back to the owning record: action -> (context, action name)
    action_paths: HashMap<ActionHandle, (String, String)>,
    next_sequence: u64,
    next_subscription: u64,
}

impl<E: InputEngine> InputRegistry<E> {
    pub fn new(engine: E) -> Self {
        let events = engine.events();
        Self {
            engine,
            events,
            contexts: HashMap::new(),
            action_paths: HashMap::new(),
            next_sequence: 0,
            next_subscription: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ----------------------------------------------------------------------
    // Contexts
    // ----------------------------------------------------------------------

    /// Returns the context named `name`, creating it disabled with priority 0.
    pub fn get_input_context(&mut self, name: &str) -> ContextHandle {
        self.context_path(name)
    }

    pub fn set_context_enabled(&mut self, name: &str, enabled: bool) {
        let handle = self.context_path(name);
        if let Some(record) = self.contexts.get_mut(name) {
            record.enabled = enabled;
        }
        self.engine.set_context_enabled(handle, enabled);
        info!(context = name, enabled, "input context toggled");
    }

    pub fn set_context_priority(&mut self, name: &str, priority: i32) {
        let handle = self.context_path(name);
        if let Some(record) = self.contexts.get_mut(name) {
            record.priority = priority;
        }
        self.engine.set_context_priority(handle, priority);
        info!(context = name, priority, "input context priority set");
    }

    /// Exposes the engine's sink attribute. The registry itself does not act on it.
    pub fn set_context_sink(&mut self, name: &str, sink: bool) {
        let handle = self.context_path(name);
        if let Some(record) = self.contexts.get_mut(name) {
            record.sink = sink;
        }
        self.engine.set_context_sink(handle, sink);
        debug!(context = name, sink, "input context sink set");
    }

    // ----------------------------------------------------------------------
    // Actions & bindings
    // ----------------------------------------------------------------------

    /// Returns the action, creating the context and the action as needed.
    /// `options` are ignored when the action already exists.
    pub fn get_input_action(
        &mut self,
        action: &str,
        context: &str,
        options: ActionOptions,
    ) -> ActionHandle {
        match self.ensure_path(context, Some((action, options)), None) {
            Ok(Path {
                action: Some(handle),
                ..
            }) => handle,
            _ => unreachable!("a path without a binding level cannot fail"),
        }
    }

    /// Returns the binding, creating the context and the action (with default
    /// options) as needed. `options` are validated only when the binding is new.
    pub fn get_input_binding(
        &mut self,
        binding: &str,
        action: &str,
        context: &str,
        options: &BindingOptions,
    ) -> Result<BindingHandle, RegistryError> {
        let path = self.ensure_path(
            context,
            Some((action, ActionOptions::default())),
            Some((binding, options)),
        )?;
        match path.binding {
            Some(handle) => Ok(handle),
            None => unreachable!("ensure_path returns a binding when one is requested"),
        }
    }

    /// Replaces the action's callback. The previous one is detached first.
    pub fn set_action_callback<F>(&mut self, action: &str, context: &str, callback: F)
    where
        F: FnMut(ActionState) + 'static,
    {
        self.get_input_action(action, context, ActionOptions::default());
        let id = self.next_subscription;
        self.next_subscription += 1;
        if let Some(record) = self.action_mut(action, context) {
            record.attach(Subscription::new(id, Box::new(callback)));
        }
    }

    /// Detaches the action's callback. No-op when there is none.
    pub fn remove_action_callback(&mut self, action: &str, context: &str) {
        if let Some(record) = self.action_mut(action, context) {
            record.detach();
        }
    }

    // ----------------------------------------------------------------------
    // Delivery & teardown
    // ----------------------------------------------------------------------

    /// Drains the engine's state-change queue into action callbacks.
    /// Returns how many callbacks ran.
    pub fn dispatch_events(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.events.try_recv() {
            let Some((context, action)) = self.action_paths.get(&event.action) else {
                warn!(action = ?event.action, "dropping state change for unknown action");
                continue;
            };
            let subscription = self
                .contexts
                .get_mut(context)
                .and_then(|c| c.actions.get_mut(action))
                .and_then(|a| a.subscription.as_mut());
            if let Some(subscription) = subscription {
                subscription.notify(event.state);
                delivered += 1;
            }
        }
        delivered
    }

    /// Destroys every context, action, binding and callback. Safe to repeat.
    pub fn cleanup(&mut self) {
        let contexts = std::mem::take(&mut self.contexts);
        let count = contexts.len();
        for (_, context) in contexts {
            context.destroy(&mut self.engine);
        }
        self.action_paths.clear();
        // Whatever is still queued belongs to actions that no longer exist.
        while self.events.try_recv().is_ok() {}
        self.next_sequence = 0;

        if count > 0 {
            info!(contexts = count, "input registry cleaned up");
        }
    }

    // ----------------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------------

    pub fn context(&self, name: &str) -> Option<&ContextRecord> {
        self.contexts.get(name)
    }

    pub fn action(&self, action: &str, context: &str) -> Option<&ActionRecord> {
        self.contexts.get(context)?.actions.get(action)
    }

    pub fn binding(&self, binding: &str, action: &str, context: &str) -> Option<&BindingRecord> {
        self.action(action, context)?.bindings.get(binding)
    }

    /// All contexts in creation order.
    pub fn contexts(&self) -> Vec<&ContextRecord> {
        let mut contexts: Vec<_> = self.contexts.values().collect();
        contexts.sort_by_key(|c| c.sequence);
        contexts
    }

    /// Enabled contexts in the order the engine offers them input.
    pub fn contexts_by_priority(&self) -> Vec<&ContextRecord> {
        let mut enabled: Vec<_> = self.contexts.values().filter(|c| c.enabled).collect();
        rank_by_priority(&mut enabled, |c| (c.priority, c.sequence));
        enabled
    }

    pub fn action_state(&self, action: &str, context: &str) -> Option<ActionState> {
        let handle = self.action(action, context)?.handle;
        self.engine.action_state(handle)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    // ----------------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------------

    fn context_path(&mut self, name: &str) -> ContextHandle {
        match self.ensure_path(name, None, None) {
            Ok(path) => path.context,
            Err(_) => unreachable!("a path without a binding level cannot fail"),
        }
    }

    fn action_mut(&mut self, action: &str, context: &str) -> Option<&mut ActionRecord> {
        self.contexts.get_mut(context)?.actions.get_mut(action)
    }

    /// Creates whatever is missing along `context / action / binding`, top-down,
    /// and returns the handles along the path. Only the binding level can fail.
    fn ensure_path(
        &mut self,
        context: &str,
        action: Option<(&str, ActionOptions)>,
        binding: Option<(&str, &BindingOptions)>,
    ) -> Result<Path, RegistryError> {
        let engine = &mut self.engine;
        let next_sequence = &mut self.next_sequence;
        let context_record = self
            .contexts
            .entry(context.to_string())
            .or_insert_with(|| {
                let handle = engine.create_context(context);
                let sequence = *next_sequence;
                *next_sequence += 1;
                debug!(context, ?handle, "created input context");
                ContextRecord::new(handle, context, sequence)
            });

        let context_handle = context_record.handle;
        let mut path = Path {
            context: context_handle,
            action: None,
            binding: None,
        };

        let Some((action_name, action_options)) = action else {
            return Ok(path);
        };
        let action_paths = &mut self.action_paths;
        let action_record = context_record
            .actions
            .entry(action_name.to_string())
            .or_insert_with(|| {
                let handle =
                    engine.create_action(context_handle, action_name, action_options.action_type);
                action_paths.insert(handle, (context.to_string(), action_name.to_string()));
                debug!(
                    context,
                    action = action_name,
                    action_type = ?action_options.action_type,
                    ?handle,
                    "created input action"
                );
                ActionRecord::new(handle, action_name, action_options.action_type)
            });
        path.action = Some(action_record.handle);

        let Some((binding_name, binding_options)) = binding else {
            return Ok(path);
        };
        if let Some(existing) = action_record.bindings.get(binding_name) {
            path.binding = Some(existing.handle);
            return Ok(path);
        }

        let params = binding_options
            .params(context, action_name, binding_name)
            .inspect_err(|err| warn!(%err, "rejected input binding"))?;
        let handle = engine
            .create_binding(action_record.handle, binding_name, &params)
            .inspect_err(|err| {
                warn!(
                    %err,
                    context,
                    action = action_name,
                    binding = binding_name,
                    "engine rejected input binding"
                )
            })?;
        action_record.bindings.insert(
            binding_name.to_string(),
            BindingRecord {
                handle,
                name: binding_name.to_string(),
                params,
            },
        );
        debug!(
            context,
            action = action_name,
            binding = binding_name,
            source = ?params.source,
            ?handle,
            "created input binding"
        );
        path.binding = Some(handle);
        Ok(path)
    }
}

impl<E: InputEngine> Drop for InputRegistry<E> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
