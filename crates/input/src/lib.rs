//! Input: per-frame snapshot of keys, buttons, cursor and scroll.
//!
//! # Invariants
//! - Input state is an explicit value passed to consumers, never a global.
//! - One-shot triggers stay consumed until a new, non-repeat press arrives.
//! - Missing input reads as released / zero, never as an error.

pub mod bindings;
pub mod event;
pub mod key;
pub mod script;
pub mod snapshot;
pub mod source;

pub use bindings::Bindings;
pub use event::InputEvent;
pub use key::{Key, MouseButton};
pub use script::{ScriptError, ScriptStep, ScriptedInput};
pub use snapshot::InputSnapshot;
pub use source::{IdleInput, InputSource};

pub fn crate_info() -> &'static str {
    "stagehand-input v0.1.0"
}
