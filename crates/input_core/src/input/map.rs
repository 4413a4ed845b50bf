// crates/input_core/src/input/map.rs
use std::collections::HashMap;

use input_shared::BindingHandle;

use super::binding::InputSource;

/// Reverse lookup from physical source to every binding listening on it.
#[derive(Default)]
pub struct InputMap {
    source_bindings: HashMap<InputSource, Vec<BindingHandle>>,
}

impl InputMap {
    pub fn bind(&mut self, source: InputSource, binding: BindingHandle) {
        let bindings = self.source_bindings.entry(source).or_default();
        if !bindings.contains(&binding) {
            bindings.push(binding);
        }
    }

    pub fn unbind(&mut self, source: InputSource, binding: BindingHandle) {
        if let Some(bindings) = self.source_bindings.get_mut(&source) {
            bindings.retain(|&b| b != binding);
            if bindings.is_empty() {
                self.source_bindings.remove(&source);
            }
        }
    }

    pub fn bindings_for(&self, source: InputSource) -> &[BindingHandle] {
        self.source_bindings
            .get(&source)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.source_bindings.is_empty()
    }
}
