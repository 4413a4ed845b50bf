// crates/input_core/src/engine/sim.rs
//! Headless engine: keeps native mirrors of every object in memory and routes
//! `RawInput` through enabled contexts in priority order.

use std::collections::HashMap;

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Vec2;
use input_shared::{
    ActionHandle, ActionState, ActionType, BindingHandle, ContextHandle, HandleAllocator,
};
use tracing::{trace, warn};

use super::{ActionEvent, InputEngine};
use crate::error::EngineError;
use crate::input::arbiter::{rank_by_priority, Arbiter, Signal};
use crate::input::binding::{BindingParams, InputKey, InputSource, RawInput, UiButton};
use crate::input::map::InputMap;

struct NativeContext {
    name: String,
    enabled: bool,
    priority: i32,
    sink: bool,
    sequence: u64,
    actions: Vec<ActionHandle>,
}

struct NativeAction {
    context: ContextHandle,
    action_type: ActionType,
    state: ActionState,
    // Bindings whose source is currently held down.
    held: Vec<BindingHandle>,
    pointer: Option<Vec2>,
    bindings: Vec<BindingHandle>,
}

struct NativeBinding {
    action: ActionHandle,
    params: BindingParams,
}

enum Route {
    Press,
    Pointer(Vec2),
}

pub struct SimEngine {
    handles: HandleAllocator,
    contexts: HashMap<ContextHandle, NativeContext>,
    actions: HashMap<ActionHandle, NativeAction>,
    bindings: HashMap<BindingHandle, NativeBinding>,
    input_map: InputMap,
    arbiter: Arbiter,
    ui_buttons: Vec<String>,
    next_sequence: u64,
    sender: Sender<ActionEvent>,
    receiver: Receiver<ActionEvent>,
}

impl Default for SimEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimEngine {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            handles: HandleAllocator::new(),
            contexts: HashMap::new(),
            actions: HashMap::new(),
            bindings: HashMap::new(),
            input_map: InputMap::default(),
            arbiter: Arbiter::default(),
            ui_buttons: Vec::new(),
            next_sequence: 0,
            sender,
            receiver,
        }
    }

    pub fn register_ui_button(&mut self, label: &str) -> UiButton {
        self.ui_buttons.push(label.to_string());
        UiButton((self.ui_buttons.len() - 1) as u32)
    }

    pub fn ui_button_label(&self, button: UiButton) -> Option<&str> {
        self.ui_buttons.get(button.0 as usize).map(String::as_str)
    }

    /// Feeds one raw input. Returns true if any enabled context claimed it.
    pub fn handle_input(&mut self, input: RawInput) -> bool {
        match input {
            RawInput::Pressed(source) => self.route(source, Route::Press),
            RawInput::Released(source) => self.release(source),
            RawInput::PointerMoved(position) => self.route(
                InputSource::Key(InputKey::PointerMovement),
                Route::Pointer(position),
            ),
        }
    }

    /// Injects an engine-originated state change, as if a device had produced it.
    /// Ignored when the action is unknown, its context is disabled, or the state
    /// does not match the action's type.
    pub fn fire(&mut self, action: ActionHandle, state: ActionState) -> bool {
        let Some(native) = self.actions.get_mut(&action) else {
            warn!(?action, "fire on unknown action");
            return false;
        };
        if native.action_type != state.action_type() {
            warn!(?action, expected = ?native.action_type, got = ?state.action_type(), "fire with mismatched state type");
            return false;
        }
        let enabled = self
            .contexts
            .get(&native.context)
            .is_some_and(|c| c.enabled);
        if !enabled {
            return false;
        }
        if native.state != state {
            native.state = state;
            let _ = self.sender.send(ActionEvent { action, state });
        }
        true
    }

    /// Names of enabled contexts in the order they claim input.
    pub fn active_contexts(&self) -> Vec<&str> {
        self.ranked_enabled()
            .into_iter()
            .filter_map(|handle| self.contexts.get(&handle))
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn is_context_enabled(&self, context: ContextHandle) -> Option<bool> {
        self.contexts.get(&context).map(|c| c.enabled)
    }

    pub fn context_priority(&self, context: ContextHandle) -> Option<i32> {
        self.contexts.get(&context).map(|c| c.priority)
    }

    pub fn context_sink(&self, context: ContextHandle) -> Option<bool> {
        self.contexts.get(&context).map(|c| c.sink)
    }

    /// Total native objects alive (contexts, actions and bindings).
    pub fn live_objects(&self) -> usize {
        self.handles.live_count()
    }

    fn ranked_enabled(&self) -> Vec<ContextHandle> {
        let mut enabled: Vec<_> = self
            .contexts
            .iter()
            .filter(|(_, c)| c.enabled)
            .map(|(handle, c)| (*handle, c.priority, c.sequence))
            .collect();
        rank_by_priority(&mut enabled, |&(_, priority, sequence)| (priority, sequence));
        enabled.into_iter().map(|(handle, _, _)| handle).collect()
    }

    fn route(&mut self, source: InputSource, route: Route) -> bool {
        let candidates = self.input_map.bindings_for(source).to_vec();
        if candidates.is_empty() {
            return false;
        }

        let mut claimed = false;
        for context in self.ranked_enabled() {
            let hits: Vec<(BindingHandle, ActionHandle)> = candidates
                .iter()
                .filter_map(|binding| {
                    let native = self.bindings.get(binding)?;
                    let action = self.actions.get(&native.action)?;
                    (action.context == context).then_some((*binding, native.action))
                })
                .collect();
            if hits.is_empty() {
                continue;
            }

            claimed = true;
            for (binding, action) in hits {
                if let Some(native) = self.actions.get_mut(&action) {
                    match route {
                        Route::Press => {
                            if !native.held.contains(&binding) {
                                native.held.push(binding);
                            }
                        }
                        Route::Pointer(position) => native.pointer = Some(position),
                    }
                }
                self.refresh(action);
            }

            if self.contexts.get(&context).is_some_and(|c| c.sink) {
                trace!(?source, ?context, "input sunk");
                break;
            }
        }
        claimed
    }

    // Releases reach every action holding the source, whatever its priority,
    // so a key pressed before a context switch never sticks.
    fn release(&mut self, source: InputSource) -> bool {
        let mut released = false;
        for binding in self.input_map.bindings_for(source).to_vec() {
            let Some(action) = self.bindings.get(&binding).map(|b| b.action) else {
                continue;
            };
            if let Some(native) = self.actions.get_mut(&action) {
                if let Some(pos) = native.held.iter().position(|&h| h == binding) {
                    native.held.remove(pos);
                    released = true;
                }
            }
            self.refresh(action);
        }
        released
    }

    /// Recomputes an action's state from its held bindings; emits on change.
    fn refresh(&mut self, action: ActionHandle) {
        let Some(native) = self.actions.get_mut(&action) else {
            return;
        };

        self.arbiter.clear();
        for binding in &native.held {
            if let Some(b) = self.bindings.get(binding) {
                self.arbiter.add(Signal {
                    direction: b.params.direction,
                    scale: b.params.scale,
                });
            }
        }

        let state = self.arbiter.resolve(native.action_type, native.pointer);
        if native.state != state {
            native.state = state;
            trace!(?action, ?state, "action state changed");
            let _ = self.sender.send(ActionEvent { action, state });
        }
    }

    fn release_all(&mut self, context: ContextHandle) {
        let Some(actions) = self.contexts.get(&context).map(|c| c.actions.clone()) else {
            return;
        };
        for action in actions {
            if let Some(native) = self.actions.get_mut(&action) {
                native.held.clear();
                native.pointer = None;
            }
            self.refresh(action);
        }
    }
}

impl InputEngine for SimEngine {
    fn create_context(&mut self, name: &str) -> ContextHandle {
        let handle = ContextHandle(self.handles.allocate());
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.contexts.insert(
            handle,
            NativeContext {
                name: name.to_string(),
                enabled: false,
                priority: 0,
                sink: false,
                sequence,
                actions: Vec::new(),
            },
        );
        handle
    }

    fn set_context_enabled(&mut self, context: ContextHandle, enabled: bool) {
        let Some(native) = self.contexts.get_mut(&context) else {
            warn!(?context, "set_context_enabled on unknown context");
            return;
        };
        let was_enabled = native.enabled;
        native.enabled = enabled;
        if was_enabled && !enabled {
            self.release_all(context);
        }
    }

    fn set_context_priority(&mut self, context: ContextHandle, priority: i32) {
        match self.contexts.get_mut(&context) {
            Some(native) => native.priority = priority,
            None => warn!(?context, "set_context_priority on unknown context"),
        }
    }

    fn set_context_sink(&mut self, context: ContextHandle, sink: bool) {
        match self.contexts.get_mut(&context) {
            Some(native) => native.sink = sink,
            None => warn!(?context, "set_context_sink on unknown context"),
        }
    }

    fn destroy_context(&mut self, context: ContextHandle) {
        let Some(native) = self.contexts.remove(&context) else {
            return;
        };
        for action in native.actions {
            self.destroy_action(action);
        }
        self.handles.free(context.raw());
    }

    fn create_action(
        &mut self,
        context: ContextHandle,
        _name: &str,
        action_type: ActionType,
    ) -> ActionHandle {
        let handle = ActionHandle(self.handles.allocate());
        match self.contexts.get_mut(&context) {
            Some(native) => native.actions.push(handle),
            None => warn!(?context, "action created under unknown context"),
        }
        self.actions.insert(
            handle,
            NativeAction {
                context,
                action_type,
                state: action_type.default_state(),
                held: Vec::new(),
                pointer: None,
                bindings: Vec::new(),
            },
        );
        handle
    }

    fn destroy_action(&mut self, action: ActionHandle) {
        let Some(native) = self.actions.remove(&action) else {
            return;
        };
        for binding in native.bindings {
            if let Some(b) = self.bindings.remove(&binding) {
                self.input_map.unbind(b.params.source, binding);
                self.handles.free(binding.raw());
            }
        }
        if let Some(context) = self.contexts.get_mut(&native.context) {
            context.actions.retain(|&a| a != action);
        }
        self.handles.free(action.raw());
    }

    fn create_binding(
        &mut self,
        action: ActionHandle,
        _name: &str,
        params: &BindingParams,
    ) -> Result<BindingHandle, EngineError> {
        let action_type = self
            .actions
            .get(&action)
            .map(|a| a.action_type)
            .ok_or(EngineError::UnknownAction(action))?;

        if let InputSource::UiButton(button) = params.source {
            if self.ui_button_label(button).is_none() {
                return Err(EngineError::UnknownUiButton(button));
            }
        }

        let is_pointer = params.source == InputSource::Key(InputKey::PointerMovement);
        if is_pointer != (action_type == ActionType::ViewportPosition) {
            return Err(EngineError::UnsupportedSource {
                input: params.source,
                action_type,
            });
        }

        let handle = BindingHandle(self.handles.allocate());
        self.bindings.insert(
            handle,
            NativeBinding {
                action,
                params: *params,
            },
        );
        self.input_map.bind(params.source, handle);
        if let Some(native) = self.actions.get_mut(&action) {
            native.bindings.push(handle);
        }
        Ok(handle)
    }

    fn destroy_binding(&mut self, binding: BindingHandle) {
        let Some(native) = self.bindings.remove(&binding) else {
            return;
        };
        self.input_map.unbind(native.params.source, binding);
        if let Some(action) = self.actions.get_mut(&native.action) {
            action.bindings.retain(|&b| b != binding);
            action.held.retain(|&b| b != binding);
        }
        self.refresh(native.action);
        self.handles.free(binding.raw());
    }

    fn action_state(&self, action: ActionHandle) -> Option<ActionState> {
        self.actions.get(&action).map(|a| a.state)
    }

    fn events(&self) -> Receiver<ActionEvent> {
        self.receiver.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use winit::keyboard::KeyCode;

    fn key_params(key: KeyCode) -> BindingParams {
        BindingParams {
            source: InputSource::from(key),
            scale: 1.0,
            direction: Vec3::X,
        }
    }

    fn drain(engine: &SimEngine) -> Vec<ActionEvent> {
        engine.events().try_iter().collect()
    }

    /// Context with one Bool action bound to `key`.
    fn bound_context(
        engine: &mut SimEngine,
        name: &str,
        priority: i32,
        key: KeyCode,
    ) -> (ContextHandle, ActionHandle) {
        let context = engine.create_context(name);
        engine.set_context_priority(context, priority);
        engine.set_context_enabled(context, true);
        let action = engine.create_action(context, "Use", ActionType::Bool);
        engine
            .create_binding(action, "Keyboard", &key_params(key))
            .expect("key binding is valid");
        (context, action)
    }

    #[test]
    fn press_and_release_emit_changes() {
        let mut engine = SimEngine::new();
        let (_, action) = bound_context(&mut engine, "Play", 0, KeyCode::KeyE);
        let e = InputSource::from(KeyCode::KeyE);

        assert!(engine.handle_input(RawInput::Pressed(e)));
        // Still claimed, but a second press while held changes nothing.
        assert!(engine.handle_input(RawInput::Pressed(e)));
        assert!(engine.handle_input(RawInput::Released(e)));

        let states: Vec<_> = drain(&engine).into_iter().map(|ev| ev.state).collect();
        assert_eq!(states, vec![ActionState::Bool(true), ActionState::Bool(false)]);
        assert_eq!(engine.action_state(action), Some(ActionState::Bool(false)));
    }

    #[test]
    fn disabled_context_does_not_claim_input() {
        let mut engine = SimEngine::new();
        let (context, action) = bound_context(&mut engine, "Play", 0, KeyCode::KeyE);
        engine.set_context_enabled(context, false);

        assert!(!engine.handle_input(RawInput::Pressed(InputSource::from(KeyCode::KeyE))));
        assert!(drain(&engine).is_empty());
        assert_eq!(engine.action_state(action), Some(ActionState::Bool(false)));
    }

    #[test]
    fn non_sinking_contexts_share_input() {
        let mut engine = SimEngine::new();
        let (_, low) = bound_context(&mut engine, "Play", 1, KeyCode::Space);
        let (_, high) = bound_context(&mut engine, "Menu", 2, KeyCode::Space);

        engine.handle_input(RawInput::Pressed(InputSource::from(KeyCode::Space)));

        assert_eq!(engine.action_state(low), Some(ActionState::Bool(true)));
        assert_eq!(engine.action_state(high), Some(ActionState::Bool(true)));
        let order: Vec<_> = drain(&engine).into_iter().map(|ev| ev.action).collect();
        assert_eq!(order, vec![high, low]);
    }

    #[test]
    fn sinking_context_blocks_lower_priorities() {
        let mut engine = SimEngine::new();
        let (_, low) = bound_context(&mut engine, "Play", 1, KeyCode::Space);
        let (menu, high) = bound_context(&mut engine, "Menu", 2, KeyCode::Space);
        engine.set_context_sink(menu, true);

        engine.handle_input(RawInput::Pressed(InputSource::from(KeyCode::Space)));

        assert_eq!(engine.action_state(high), Some(ActionState::Bool(true)));
        assert_eq!(engine.action_state(low), Some(ActionState::Bool(false)));
    }

    #[test]
    fn sink_only_applies_to_inputs_the_context_binds() {
        let mut engine = SimEngine::new();
        let (_, low) = bound_context(&mut engine, "Play", 1, KeyCode::KeyW);
        let (menu, _) = bound_context(&mut engine, "Menu", 2, KeyCode::Escape);
        engine.set_context_sink(menu, true);

        engine.handle_input(RawInput::Pressed(InputSource::from(KeyCode::KeyW)));
        assert_eq!(engine.action_state(low), Some(ActionState::Bool(true)));
    }

    #[test]
    fn disabling_releases_held_inputs() {
        let mut engine = SimEngine::new();
        let (context, action) = bound_context(&mut engine, "Play", 0, KeyCode::ShiftLeft);
        engine.handle_input(RawInput::Pressed(InputSource::from(KeyCode::ShiftLeft)));
        assert_eq!(engine.action_state(action), Some(ActionState::Bool(true)));

        engine.set_context_enabled(context, false);
        assert_eq!(engine.action_state(action), Some(ActionState::Bool(false)));
        let states: Vec<_> = drain(&engine).into_iter().map(|ev| ev.state).collect();
        assert_eq!(states, vec![ActionState::Bool(true), ActionState::Bool(false)]);
    }

    #[test]
    fn fire_respects_enabled_state_and_type() {
        let mut engine = SimEngine::new();
        let (context, action) = bound_context(&mut engine, "Play", 0, KeyCode::KeyE);

        assert!(!engine.fire(action, ActionState::Direction1D(1.0)));
        assert!(engine.fire(action, ActionState::Bool(true)));
        engine.set_context_enabled(context, false);
        drain(&engine);
        assert!(!engine.fire(action, ActionState::Bool(true)));
        assert!(drain(&engine).is_empty());
    }

    #[test]
    fn rejects_unknown_ui_button_and_misplaced_pointer() {
        let mut engine = SimEngine::new();
        let context = engine.create_context("Hud");
        let tap = engine.create_action(context, "Tap", ActionType::Bool);
        let aim = engine.create_action(context, "Aim", ActionType::ViewportPosition);

        let ghost = BindingParams {
            source: InputSource::UiButton(UiButton(9)),
            ..key_params(KeyCode::KeyE)
        };
        assert_eq!(
            engine.create_binding(tap, "Touch", &ghost),
            Err(EngineError::UnknownUiButton(UiButton(9)))
        );

        let button = engine.register_ui_button("JumpButton");
        let real = BindingParams {
            source: InputSource::UiButton(button),
            ..ghost
        };
        assert!(engine.create_binding(tap, "Touch", &real).is_ok());

        let pointer = BindingParams {
            source: InputSource::Key(InputKey::PointerMovement),
            ..ghost
        };
        assert!(matches!(
            engine.create_binding(tap, "Mouse", &pointer),
            Err(EngineError::UnsupportedSource { .. })
        ));
        assert!(engine.create_binding(aim, "Mouse", &pointer).is_ok());
    }

    #[test]
    fn pointer_motion_drives_viewport_actions() {
        let mut engine = SimEngine::new();
        let context = engine.create_context("Hud");
        engine.set_context_enabled(context, true);
        let aim = engine.create_action(context, "Aim", ActionType::ViewportPosition);
        engine
            .create_binding(
                aim,
                "Mouse",
                &BindingParams {
                    source: InputSource::Key(InputKey::PointerMovement),
                    scale: 1.0,
                    direction: Vec3::X,
                },
            )
            .unwrap();

        assert!(engine.handle_input(RawInput::PointerMoved(Vec2::new(10.0, 20.0))));
        assert_eq!(
            engine.action_state(aim),
            Some(ActionState::ViewportPosition(Vec2::new(10.0, 20.0)))
        );
    }

    #[test]
    fn destroying_context_frees_every_native_object() {
        let mut engine = SimEngine::new();
        let (context, _) = bound_context(&mut engine, "Play", 0, KeyCode::KeyE);
        assert_eq!(engine.live_objects(), 3);

        engine.destroy_context(context);
        assert_eq!(engine.live_objects(), 0);
        assert!(!engine.handle_input(RawInput::Pressed(InputSource::from(KeyCode::KeyE))));
        assert!(engine.active_contexts().is_empty());
    }
}
