//! Priority Engine - Label allocation for the priorities step.
//!
//! The engine owns the one piece of state with real rules:
//! - SlotAllocator: Slot → Label mapping, recycled and fresh label pools,
//!   selection list in click order
//!
//! # Architecture
//!
//! Slots are NOT objects. They are indices into parallel columns:
//!
//! ```text
//! Slot 0: label=Some(2), item=Some(Economy)
//! Slot 1: label=None,    item=None
//! Slot 2: label=Some(1), item=Some(Safety)
//! ```
//!
//! Everything above the engine (reactive text, input, rendering, submission)
//! reads this state and never mutates it directly.

mod allocator;

pub use allocator::*;
