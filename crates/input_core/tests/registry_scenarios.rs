// crates/input_core/tests/registry_scenarios.rs
use std::cell::RefCell;
use std::rc::Rc;

use input_core::{
    ActionOptions, ActionState, ActionType, BindingOptions, InputRegistry, RawInput,
    RegistryError, SimEngine,
};
use winit::keyboard::KeyCode;

fn recorder() -> (Rc<RefCell<Vec<ActionState>>>, impl FnMut(ActionState) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |state| sink.borrow_mut().push(state))
}

fn registry() -> InputRegistry<SimEngine> {
    InputRegistry::new(SimEngine::new())
}

#[test]
fn context_accessor_is_idempotent() {
    let mut registry = registry();
    let first = registry.get_input_context("PlayContext");
    registry.set_context_priority("PlayContext", 5);
    registry.set_context_enabled("PlayContext", true);

    let second = registry.get_input_context("PlayContext");
    assert_eq!(first, second);

    let record = registry.context("PlayContext").unwrap();
    assert_eq!(record.priority(), 5);
    assert!(record.enabled());
    assert_eq!(registry.len(), 1);
}

#[test]
fn action_options_only_apply_on_first_creation() {
    let mut registry = registry();
    let first = registry.get_input_action(
        "Move",
        "PlayContext",
        ActionOptions::typed(ActionType::Direction2D),
    );
    let again = registry.get_input_action("Move", "PlayContext", ActionOptions::typed(ActionType::Bool));

    assert_eq!(first, again);
    assert_eq!(
        registry.action("Move", "PlayContext").unwrap().action_type(),
        ActionType::Direction2D
    );
}

#[test]
fn toggling_enabled_keeps_actions_and_bindings() {
    let mut registry = registry();
    registry
        .get_input_binding("Keyboard", "Sprint", "PlayContext", &BindingOptions::key(KeyCode::ShiftLeft))
        .unwrap();

    registry.set_context_enabled("PlayContext", true);
    registry.set_context_enabled("PlayContext", false);

    let context = registry.context("PlayContext").unwrap();
    assert!(!context.enabled());
    let handle = context.handle();
    assert_eq!(registry.engine().is_context_enabled(handle), Some(false));
    assert!(registry.binding("Keyboard", "Sprint", "PlayContext").is_some());
}

#[test]
fn replacing_a_callback_detaches_the_old_one() {
    let mut registry = registry();
    let sprint = registry.get_input_action("Sprint", "PlayContext", ActionOptions::default());
    registry.set_context_enabled("PlayContext", true);

    let (first, cb1) = recorder();
    let (second, cb2) = recorder();
    registry.set_action_callback("Sprint", "PlayContext", cb1);
    registry.engine_mut().fire(sprint, ActionState::Bool(true));
    registry.dispatch_events();

    registry.set_action_callback("Sprint", "PlayContext", cb2);
    registry.engine_mut().fire(sprint, ActionState::Bool(false));
    registry.dispatch_events();

    assert_eq!(*first.borrow(), vec![ActionState::Bool(true)]);
    assert_eq!(*second.borrow(), vec![ActionState::Bool(false)]);
    // The replaced closure was dropped along with its captured recorder handle.
    assert_eq!(Rc::strong_count(&first), 1);
}

#[test]
fn removed_callback_stops_receiving() {
    let mut registry = registry();
    let sprint = registry.get_input_action("Sprint", "PlayContext", ActionOptions::default());
    registry.set_context_enabled("PlayContext", true);

    let (seen, cb) = recorder();
    registry.set_action_callback("Sprint", "PlayContext", cb);
    registry.remove_action_callback("Sprint", "PlayContext");
    registry.remove_action_callback("Sprint", "PlayContext");

    registry.engine_mut().fire(sprint, ActionState::Bool(true));
    assert_eq!(registry.dispatch_events(), 0);
    assert!(seen.borrow().is_empty());
    assert!(!registry.action("Sprint", "PlayContext").unwrap().has_callback());
}

#[test]
fn cleanup_twice_leaves_registry_empty() {
    let mut registry = registry();
    let (seen, cb) = recorder();
    registry
        .get_input_binding("Keyboard", "Sprint", "PlayContext", &BindingOptions::key(KeyCode::ShiftLeft))
        .unwrap();
    registry.set_action_callback("Sprint", "PlayContext", cb);
    registry.get_input_context("MenuContext");

    registry.cleanup();
    assert!(registry.is_empty());
    assert_eq!(registry.engine().live_objects(), 0);
    assert_eq!(Rc::strong_count(&seen), 1, "callback must be released");

    registry.cleanup();
    assert!(registry.is_empty());
    assert!(registry.contexts().is_empty());
}

#[test]
fn handles_from_before_cleanup_never_alias_new_records() {
    let mut registry = registry();
    let before = registry.get_input_context("PlayContext");
    registry.cleanup();
    let after = registry.get_input_context("PlayContext");
    assert_ne!(before, after);
    assert_eq!(before.raw().index(), after.raw().index());
}

#[test]
fn sprint_scenario_records_true() {
    let mut registry = registry();
    registry.get_input_context("PlayContext");
    let sprint = registry.get_input_action("Sprint", "PlayContext", ActionOptions::typed(ActionType::Bool));
    registry
        .get_input_binding("Keyboard", "Sprint", "PlayContext", &BindingOptions::key(KeyCode::ShiftLeft))
        .unwrap();

    let (seen, cb) = recorder();
    registry.set_action_callback("Sprint", "PlayContext", cb);
    registry.set_context_enabled("PlayContext", true);

    assert!(registry.engine_mut().fire(sprint, ActionState::Bool(true)));
    assert_eq!(registry.dispatch_events(), 1);
    assert_eq!(*seen.borrow(), vec![ActionState::Bool(true)]);
}

#[test]
fn sprint_scenario_through_the_keyboard() {
    let mut registry = registry();
    registry
        .get_input_binding("Keyboard", "Sprint", "PlayContext", &BindingOptions::key(KeyCode::ShiftLeft))
        .unwrap();
    let (seen, cb) = recorder();
    registry.set_action_callback("Sprint", "PlayContext", cb);

    // Disabled contexts claim nothing.
    assert!(!registry
        .engine_mut()
        .handle_input(RawInput::Pressed(KeyCode::ShiftLeft.into())));
    registry.set_context_enabled("PlayContext", true);
    assert!(registry
        .engine_mut()
        .handle_input(RawInput::Pressed(KeyCode::ShiftLeft.into())));
    registry.dispatch_events();

    assert_eq!(*seen.borrow(), vec![ActionState::Bool(true)]);
}

#[test]
fn higher_priority_context_comes_first() {
    let mut registry = registry();
    registry.set_context_priority("PlayContext", 1);
    registry.set_context_priority("MenuContext", 2);
    registry.set_context_enabled("PlayContext", true);
    registry.set_context_enabled("MenuContext", true);

    let names: Vec<_> = registry
        .contexts_by_priority()
        .into_iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, ["MenuContext", "PlayContext"]);
    assert_eq!(registry.engine().active_contexts(), ["MenuContext", "PlayContext"]);
}

#[test]
fn binding_without_a_source_is_rejected() {
    let mut registry = registry();
    registry.get_input_action("Sprint", "PlayContext", ActionOptions::default());

    let result = registry.get_input_binding("Keyboard", "Sprint", "PlayContext", &BindingOptions::default());

    // Policy: rejected, nothing is created for the binding, the action is untouched.
    assert!(matches!(result, Err(RegistryError::MissingBindingSource { .. })));
    let action = registry.action("Sprint", "PlayContext").unwrap();
    assert!(action.bindings().is_empty());
    assert_eq!(registry.engine().live_objects(), 2);
}

#[test]
fn events_for_destroyed_actions_are_dropped() {
    let mut registry = registry();
    let sprint = registry.get_input_action("Sprint", "PlayContext", ActionOptions::default());
    registry.set_context_enabled("PlayContext", true);
    let (seen, cb) = recorder();
    registry.set_action_callback("Sprint", "PlayContext", cb);
    registry.engine_mut().fire(sprint, ActionState::Bool(true));

    registry.cleanup();
    assert_eq!(registry.dispatch_events(), 0);
    assert!(seen.borrow().is_empty());
}
