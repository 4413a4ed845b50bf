// crates/input_core/src/error.rs
use input_shared::{ActionHandle, ActionType};
use thiserror::Error;

use crate::input::binding::{InputSource, UiButton};

/// Failures reported by an engine backend when it refuses a native object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("UI button {0:?} is not registered with the engine")]
    UnknownUiButton(UiButton),

    #[error("no native action behind {0:?}")]
    UnknownAction(ActionHandle),

    #[error("{input:?} cannot drive a {action_type:?} action")]
    UnsupportedSource {
        input: InputSource,
        action_type: ActionType,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("binding `{context}/{action}/{binding}` sets neither a key code nor a UI button")]
    MissingBindingSource {
        context: String,
        action: String,
        binding: String,
    },

    #[error("binding `{context}/{action}/{binding}` sets both a key code and a UI button")]
    ConflictingBindingSource {
        context: String,
        action: String,
        binding: String,
    },

    #[error("engine rejected binding: {0}")]
    Engine(#[from] EngineError),
}
