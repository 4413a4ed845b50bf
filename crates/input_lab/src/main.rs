use std::env;

use input_core::input::{InputDefaults, InputPoller};
use input_core::{logging, InputRegistry, SimEngine};
use tracing::{error, info};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

const DEFAULT_FRAMES: u32 = 12;

enum Step {
    Key(KeyCode, ElementState),
    Menu(bool),
}

/// Scripted input: walk diagonally, sprint, open the menu, back out.
fn script(frame: u32) -> Vec<Step> {
    use ElementState::{Pressed, Released};
    match frame {
        1 => vec![Step::Key(KeyCode::KeyW, Pressed)],
        2 => vec![Step::Key(KeyCode::KeyD, Pressed), Step::Key(KeyCode::ShiftLeft, Pressed)],
        4 => vec![Step::Key(KeyCode::KeyW, Released)],
        5 => vec![Step::Menu(true)],
        6 => vec![Step::Key(KeyCode::Escape, Pressed)],
        7 => vec![Step::Key(KeyCode::Escape, Released), Step::Menu(false)],
        9 => vec![
            Step::Key(KeyCode::KeyD, Released),
            Step::Key(KeyCode::ShiftLeft, Released),
        ],
        _ => Vec::new(),
    }
}

fn main() {
    logging::init();

    let args: Vec<String> = env::args().collect();
    let frames = args
        .get(1)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut registry = InputRegistry::new(SimEngine::new());
    if let Err(err) = InputDefaults::setup(&mut registry) {
        error!(%err, "failed to install default bindings");
        std::process::exit(1);
    }

    let play = InputDefaults::PLAY_CONTEXT;
    let menu = InputDefaults::MENU_CONTEXT;
    registry.set_action_callback("Move", play, |state| info!(?state, "Move"));
    registry.set_action_callback("Sprint", play, |state| info!(?state, "Sprint"));
    registry.set_action_callback("Back", menu, |state| info!(?state, "Back"));

    let mut poller = InputPoller::new();
    for frame in 0..frames {
        for step in script(frame) {
            match step {
                Step::Key(key, state) => {
                    if let Some(input) = poller.handle_key(key, state) {
                        let claimed = registry.engine_mut().handle_input(input);
                        if !claimed {
                            info!(frame, ?key, ?state, "input not claimed");
                        }
                    }
                }
                Step::Menu(open) => registry.set_context_enabled(menu, open),
            }
        }
        let delivered = registry.dispatch_events();
        if delivered > 0 {
            info!(frame, delivered, "dispatched action callbacks");
        }
    }

    // Anything still held when the script ends is released before teardown.
    for input in poller.release_all() {
        registry.engine_mut().handle_input(input);
    }
    registry.dispatch_events();
    registry.cleanup();
}
