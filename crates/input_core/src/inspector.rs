// crates/input_core/src/inspector.rs
use egui::{Color32, Context, Ui};

use crate::engine::InputEngine;
use crate::input::{ContextRecord, InputRegistry};

pub fn show<E: InputEngine>(ctx: &Context, registry: &InputRegistry<E>, open: &mut bool) {
    egui::Window::new("Input Inspector")
        .open(open)
        .show(ctx, |ui| {
            ui.heading("Input Contexts");
            ui.separator();

            // 1. Claim order (highest priority first)
            let ranked = registry.contexts_by_priority();
            let top = ranked.first().map(|c| c.name());
            ui.label(format!("Top Context: {}", top.unwrap_or("<none>")));
            for (rank, context) in ranked.iter().enumerate() {
                ui.label(format!("  {}. {} ({})", rank + 1, context.name(), context.priority()));
            }

            ui.separator();

            // 2. Full tree, including disabled contexts
            for context in registry.contexts() {
                let color = if !context.enabled() {
                    Color32::GRAY
                } else if Some(context.name()) == top {
                    Color32::GREEN
                } else {
                    Color32::LIGHT_GREEN
                };
                ui.colored_label(
                    color,
                    format!(
                        "[{}] {}{}{}",
                        context.priority(),
                        context.name(),
                        if context.enabled() { "" } else { " (disabled)" },
                        if context.sink() { " (sink)" } else { "" },
                    ),
                );
                ui.collapsing(format!("{} actions", context.name()), |ui| {
                    show_actions(ui, registry, context);
                });
            }
        });
}

fn show_actions<E: InputEngine>(ui: &mut Ui, registry: &InputRegistry<E>, context: &ContextRecord) {
    for action in context.actions() {
        let state = registry
            .action_state(action.name(), context.name())
            .map(|s| format!("{:?}", s))
            .unwrap_or_else(|| "?".to_string());
        let color = if action.has_callback() {
            Color32::WHITE
        } else {
            Color32::from_gray(100)
        };
        ui.colored_label(
            color,
            format!("{} : {:?} = {}", action.name(), action.action_type(), state),
        );
        for binding in action.bindings() {
            ui.label(format!("    {} -> {:?}", binding.name(), binding.source()));
        }
    }
}
