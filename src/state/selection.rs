//! Selection State - Reactive priority selection for the wizard page
//!
//! Wraps the slot allocator with what the page needs:
//! - One reactive label text per slot (`"{label}:"` or `""`)
//! - Label-changed callbacks fired synchronously once per toggle
//! - The "clicked" flag of each answer button
//! - The selection list as wire names for submission
//!
//! # Example
//!
//! ```ignore
//! use wizard_priorities::state::{PrioritySelection, LabelCallbacks};
//!
//! let selection = PrioritySelection::new();
//! let cleanup = selection.register_callbacks(LabelCallbacks {
//!     on_label_changed: Some(Box::new(|slot, display| {
//!         println!("slot {slot} now shows {display:?}");
//!     })),
//! });
//!
//! selection.toggle(2)?;
//! assert_eq!(selection.label_text(2), "1:");
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::warn;

use crate::engine::{LabelChange, SlotAllocator};
use crate::error::{InvalidToggleReason, SlotError};
use crate::types::{Criterion, Label, LabelDisplay, SLOT_COUNT};

// =============================================================================
// LABEL CALLBACKS
// =============================================================================

/// Called with the slot and its new display after every successful toggle.
pub type LabelChangedHandler = Box<dyn Fn(usize, LabelDisplay)>;

/// Callbacks fired when a slot's label changes
#[derive(Default)]
pub struct LabelCallbacks {
    pub on_label_changed: Option<LabelChangedHandler>,
}

struct CallbackRegistry {
    entries: Vec<(usize, Rc<LabelCallbacks>)>,
    next_id: usize,
}

impl CallbackRegistry {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

// =============================================================================
// PRIORITY SELECTION
// =============================================================================

struct Inner {
    allocator: SlotAllocator<Criterion>,
    texts: Vec<Signal<String>>,
}

/// Priority selection for one visit to the priorities step.
///
/// Cheap to clone; clones share state. Dropped when the user leaves the step.
#[derive(Clone)]
pub struct PrioritySelection {
    inner: Rc<RefCell<Inner>>,
    callbacks: Rc<RefCell<CallbackRegistry>>,
}

impl Default for PrioritySelection {
    fn default() -> Self {
        Self::new()
    }
}

impl PrioritySelection {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                allocator: SlotAllocator::new(),
                texts: (0..SLOT_COUNT).map(|_| signal(String::new())).collect(),
            })),
            callbacks: Rc::new(RefCell::new(CallbackRegistry::new())),
        }
    }

    // -------------------------------------------------------------------------
    // Toggles
    // -------------------------------------------------------------------------

    /// Toggle the criterion shown in `slot`.
    pub fn toggle(&self, slot: usize) -> Result<LabelChange, SlotError> {
        let Some(criterion) = Criterion::from_slot(slot) else {
            let err = SlotError::InvalidToggle {
                slot,
                reason: InvalidToggleReason::OutOfRange,
            };
            warn!(%err, "toggle rejected");
            return Err(err);
        };
        self.toggle_item(criterion)
    }

    /// Toggle a criterion in its own slot.
    pub fn toggle_item(&self, criterion: Criterion) -> Result<LabelChange, SlotError> {
        let (change, text) = {
            let mut inner = self.inner.borrow_mut();
            let change = inner.allocator.toggle(criterion, criterion.slot())?;
            (change, inner.texts[change.slot].clone())
        };
        // Borrow released: effects and handlers may read the selection
        text.set(change.display.to_string());
        self.fire(change);
        Ok(change)
    }

    /// Clear every selection, firing callbacks for each slot that changes.
    pub fn reset(&self) {
        let (cleared, texts): (Vec<usize>, Vec<Signal<String>>) = {
            let mut inner = self.inner.borrow_mut();
            let cleared = (0..SLOT_COUNT)
                .filter(|&slot| inner.allocator.is_selected(slot))
                .collect();
            inner.allocator.reset();
            (cleared, inner.texts.clone())
        };
        for text in &texts {
            text.set(String::new());
        }
        for slot in cleared {
            self.fire(LabelChange {
                slot,
                display: LabelDisplay::Unassigned,
            });
        }
    }

    fn fire(&self, change: LabelChange) {
        // Snapshot so handlers may register or unregister while firing
        let entries: Vec<Rc<LabelCallbacks>> = self
            .callbacks
            .borrow()
            .entries
            .iter()
            .map(|(_, callbacks)| callbacks.clone())
            .collect();
        for callbacks in entries {
            if let Some(ref on_label_changed) = callbacks.on_label_changed {
                on_label_changed(change.slot, change.display);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Callbacks
    // -------------------------------------------------------------------------

    /// Register label callbacks.
    /// Returns cleanup function to unregister.
    pub fn register_callbacks(&self, callbacks: LabelCallbacks) -> impl FnOnce() + use<> {
        let id = {
            let mut registry = self.callbacks.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Rc::new(callbacks)));
            id
        };

        let registry = Rc::downgrade(&self.callbacks);
        move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn label_of(&self, slot: usize) -> Option<Label> {
        self.inner.borrow().allocator.label_of(slot)
    }

    /// Current label text for `slot`.
    pub fn label_text(&self, slot: usize) -> String {
        self.label_signal(slot).map(|s| s.get()).unwrap_or_default()
    }

    /// Reactive label text for `slot`, for binding into a text view.
    pub fn label_signal(&self, slot: usize) -> Option<Signal<String>> {
        self.inner.borrow().texts.get(slot).cloned()
    }

    /// Whether the answer button in `slot` is drawn as clicked.
    pub fn is_clicked(&self, slot: usize) -> bool {
        self.inner.borrow().allocator.is_selected(slot)
    }

    pub fn selected_count(&self) -> usize {
        self.inner.borrow().allocator.selected_count()
    }

    /// Selected criteria in click order.
    pub fn selection(&self) -> Vec<Criterion> {
        self.inner.borrow().allocator.snapshot()
    }

    /// Selection list as the names sent to the backend.
    pub fn priorities(&self) -> Vec<String> {
        self.inner
            .borrow()
            .allocator
            .selection_list()
            .iter()
            .map(|c| c.wire_name().to_string())
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
