//! State Module - Runtime state for the priorities step
//!
//! - **Selection** - Reactive labels, label callbacks, clicked flags
//! - **Input** - Terminal key events mapped to wizard commands

mod selection;
pub mod input;

pub use selection::*;
pub use input::{SlotCursor, WizardCommand};
