// crates/input_shared/src/lib.rs
//! Plain data types shared between the input registry and engine backends.

pub mod handle;
pub mod input_types;

pub use handle::{ActionHandle, BindingHandle, ContextHandle, Handle, HandleAllocator};
pub use input_types::{ActionState, ActionType};
