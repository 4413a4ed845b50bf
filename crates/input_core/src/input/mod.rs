// crates/input_core/src/input/mod.rs
pub mod arbiter;
pub mod binding;
pub mod config;
pub mod map;
pub mod options;
pub mod poller;
pub mod records;
pub mod registry;

// Re-export core types to keep the API flat: `crate::input::InputRegistry`
pub use arbiter::Arbiter;
pub use binding::{BindingParams, GamepadButton, InputKey, InputSource, RawInput, UiButton};
pub use config::InputDefaults;
pub use map::InputMap;
pub use options::{ActionOptions, BindingOptions};
pub use poller::InputPoller;
pub use records::{ActionRecord, BindingRecord, ContextRecord, Subscription};
pub use registry::InputRegistry;
