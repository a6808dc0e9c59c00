//! Renderer - Terminal output for the priorities step
//!
//! - [`frame`] - Row views derived from the selection state
//! - [`diff`] - Differential renderer that redraws only changed rows

pub mod frame;
mod diff;

pub use diff::DiffRenderer;
pub use frame::{Frame, RowView};
