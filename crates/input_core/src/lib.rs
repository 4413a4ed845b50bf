// crates/input_core/src/lib.rs

// Logic Modules
pub mod engine;
pub mod error;
pub mod input;
pub mod inspector;
pub mod logging;

// Re-export the registry surface so hosts can `use input_core::InputRegistry`
pub use engine::{ActionEvent, InputEngine, SimEngine};
pub use error::{EngineError, RegistryError};
pub use input::{
    ActionOptions, BindingOptions, GamepadButton, InputKey, InputRegistry, InputSource, RawInput,
    UiButton,
};
pub use input_shared::{ActionHandle, ActionState, ActionType, BindingHandle, ContextHandle};
