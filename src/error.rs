//! Error types.

use std::fmt;

use thiserror::Error;

/// Why a toggle was rejected as an integration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidToggleReason {
    /// Slot index outside `0..6`.
    OutOfRange,
    /// Deselect requested on a slot holding no label.
    NotSelected,
    /// Deselect named a different item than the one bound to the slot.
    ItemMismatch,
}

impl fmt::Display for InvalidToggleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidToggleReason::OutOfRange => "slot index out of range",
            InvalidToggleReason::NotSelected => "slot holds no label",
            InvalidToggleReason::ItemMismatch => "item is not bound to this slot",
        };
        f.write_str(text)
    }
}

/// Rejected allocator operation. State is unchanged whenever one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("all {capacity} priority labels are in use")]
    PoolExhausted { capacity: usize },

    #[error("invalid toggle on slot {slot}: {reason}")]
    InvalidToggle {
        slot: usize,
        reason: InvalidToggleReason,
    },
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("session id not found in session store")]
    MissingSession,

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write request: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend rejected submission with status {status}")]
    Rejected { status: u16 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}
