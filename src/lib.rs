//! # wizard-priorities
//!
//! The priorities step of the car search wizard.
//!
//! The user clicks up to six criteria ("Comfort", "Safety", ...). Each click
//! hands out the smallest free rank label, each un-click returns it, and the
//! ranking on screen stays dense. On confirmation the click-ordered list goes
//! to the backend and the wizard moves on to the price step.
//!
//! ## Architecture
//!
//! The flow is a straight line:
//! ```text
//! Key/click → PrioritySelection::toggle → SlotAllocator → label signals + callbacks → renderer
//!                                                       ↘ selection list → submission
//! ```
//!
//! Label text per slot lives in a [spark-signals](https://crates.io/crates/spark-signals)
//! `Signal<String>`, so anything reading it reacts to toggles.
//!
//! ## Modules
//!
//! - [`types`] - Labels, label sets, criteria
//! - [`engine`] - The slot allocator
//! - [`state`] - Reactive selection, label callbacks, key mapping
//! - [`renderer`] - Terminal frames and the diff renderer
//! - [`submission`] - Payload, session store, submission channel
//! - [`config`] - Backend locations from the environment

pub mod config;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod state;
pub mod submission;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::WizardConfig;

pub use engine::{LabelChange, SlotAllocator};

pub use error::{ConfigError, InvalidToggleReason, SlotError, SubmitError};

pub use renderer::{DiffRenderer, Frame, RowView};

pub use state::{
    LabelCallbacks, LabelChangedHandler, PrioritySelection, SlotCursor, WizardCommand,
};

pub use submission::{
    prepare_payload, submit_priorities, JsonLineChannel, MemorySessionStore, PrioritiesPayload,
    SessionStore, SubmissionChannel, SubmitRequest,
};
