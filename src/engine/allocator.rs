//! Slot Allocator - Priority label allocation for the six slots.
//!
//! Manages the lifecycle of priority labels:
//! - Slot → Label mapping for selected slots
//! - Recycled label pool, reissued smallest-first
//! - Fresh label cursor over 1..=6
//! - Selection list in click order
//!
//! When every label has come back to the recycled pool both pools are
//! re-seeded, so issue order restarts from 1.

use tracing::{debug, info, warn};

use crate::error::{InvalidToggleReason, SlotError};
use crate::types::{Label, LabelDisplay, LabelSet, SLOT_COUNT};

/// Result of a successful toggle: which slot changed and what it now shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelChange {
    pub slot: usize,
    pub display: LabelDisplay,
}

// =============================================================================
// Fresh Labels
// =============================================================================

/// Cursor over labels never issued since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FreshLabels {
    next: u8,
}

impl FreshLabels {
    const fn new() -> Self {
        Self { next: 1 }
    }

    fn peek(&self) -> Option<Label> {
        Label::new(self.next)
    }

    fn take(&mut self) -> Option<Label> {
        let label = self.peek()?;
        self.next += 1;
        Some(label)
    }

    fn remaining(&self) -> LabelSet {
        let mut set = LabelSet::empty();
        for label in Label::all().filter(|l| l.get() >= self.next) {
            set.add(label);
        }
        set
    }
}

// =============================================================================
// Slot Allocator
// =============================================================================

/// Assigns labels 1–6 to selected slots and tracks the selection list.
///
/// `I` is the item bound to a slot. The allocator only clones and compares it.
/// A page may offer more slots than there are labels; at most six of them are
/// selected at once.
#[derive(Debug, Clone)]
pub struct SlotAllocator<I> {
    labels: Vec<Option<Label>>,
    items: Vec<Option<I>>,
    selection: Vec<I>,
    fresh: FreshLabels,
    recycled: LabelSet,
}

impl<I> Default for SlotAllocator<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> SlotAllocator<I> {
    /// Create an allocator over six slots, every slot unselected.
    pub fn new() -> Self {
        Self::with_slots(SLOT_COUNT)
    }

    /// Create an allocator over `slots` positions.
    pub fn with_slots(slots: usize) -> Self {
        Self {
            labels: vec![None; slots],
            items: (0..slots).map(|_| None).collect(),
            selection: Vec::with_capacity(SLOT_COUNT),
            fresh: FreshLabels::new(),
            recycled: LabelSet::empty(),
        }
    }

    /// Number of slots on the page.
    pub fn slot_count(&self) -> usize {
        self.labels.len()
    }

    /// Return to the initial empty state.
    pub fn reset(&mut self) {
        self.labels.iter_mut().for_each(|l| *l = None);
        self.items.iter_mut().for_each(|i| *i = None);
        self.selection.clear();
        self.reseed_pools();
    }

    fn reseed_pools(&mut self) {
        self.fresh = FreshLabels::new();
        self.recycled = LabelSet::empty();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Label held by `slot`, if selected.
    pub fn label_of(&self, slot: usize) -> Option<Label> {
        self.labels.get(slot).copied().flatten()
    }

    pub fn is_selected(&self, slot: usize) -> bool {
        self.label_of(slot).is_some()
    }

    pub fn selected_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_some()).count()
    }

    /// All six labels are in use.
    pub fn is_full(&self) -> bool {
        self.free_labels().is_empty()
    }

    /// Labels currently assigned to slots.
    pub fn assigned_labels(&self) -> LabelSet {
        let mut set = LabelSet::empty();
        for label in self.labels.iter().flatten() {
            set.add(*label);
        }
        set
    }

    /// Labels available for the next selection.
    pub fn free_labels(&self) -> LabelSet {
        self.recycled | self.fresh.remaining()
    }

    /// Label the next successful selection would receive.
    pub fn next_label(&self) -> Option<Label> {
        self.recycled.smallest().or_else(|| self.fresh.peek())
    }

    /// Selected items in click order.
    pub fn selection_list(&self) -> &[I] {
        &self.selection
    }

    /// Item bound to `slot`, if selected.
    pub fn item_at(&self, slot: usize) -> Option<&I> {
        self.items.get(slot).and_then(Option::as_ref)
    }

    fn check_slot(&self, slot: usize) -> Result<(), SlotError> {
        if slot < self.slot_count() {
            Ok(())
        } else {
            Err(invalid(slot, InvalidToggleReason::OutOfRange))
        }
    }

    /// Verify the pool and selection bookkeeping agree.
    ///
    /// Labels are unique and in range, the selection list has one entry per
    /// assigned label, and no assigned label is also free.
    pub fn check_invariants(&self) -> bool {
        let assigned = self.assigned_labels();
        let unique = assigned.len() == self.selected_count();
        let counted = self.selection.len() == assigned.len();
        let disjoint = (assigned & self.free_labels()).is_empty();
        let covered = (assigned | self.free_labels()) == LabelSet::all();
        let bound = self
            .labels
            .iter()
            .zip(self.items.iter())
            .all(|(label, item)| label.is_some() == item.is_some());
        unique && counted && disjoint && covered && bound
    }

    // -------------------------------------------------------------------------
    // Allocation
    // -------------------------------------------------------------------------

    fn allocate(&mut self) -> Result<Label, SlotError> {
        if let Some(label) = self.recycled.take_smallest() {
            return Ok(label);
        }
        self.fresh.take().ok_or(SlotError::PoolExhausted {
            capacity: SLOT_COUNT,
        })
    }

    fn reclaim(&mut self, label: Label) {
        self.recycled.add(label);
        if self.recycled == LabelSet::all() {
            info!("all priority labels recycled, re-seeding pools");
            self.reseed_pools();
        }
    }
}

impl<I: Clone + PartialEq> SlotAllocator<I> {
    /// Flip the selection state of `slot`.
    ///
    /// Selecting takes the smallest free label (recycled before fresh) and
    /// appends `item` to the selection list. Deselecting frees the label and
    /// drops `item` from the list.
    pub fn toggle(&mut self, item: I, slot: usize) -> Result<LabelChange, SlotError> {
        self.check_slot(slot).inspect_err(log_rejected)?;
        if self.is_selected(slot) {
            self.deselect_item(&item, slot)
        } else {
            self.select(item, slot)
        }
    }

    /// Assign a label to an unselected slot.
    ///
    /// Selecting an already-selected slot returns its current label unchanged.
    pub fn select(&mut self, item: I, slot: usize) -> Result<LabelChange, SlotError> {
        self.check_slot(slot).inspect_err(log_rejected)?;
        if let Some(label) = self.label_of(slot) {
            return Ok(LabelChange {
                slot,
                display: LabelDisplay::Assigned(label),
            });
        }

        let label = self.allocate().inspect_err(log_rejected)?;
        self.labels[slot] = Some(label);
        self.items[slot] = Some(item.clone());
        self.selection.push(item);
        debug!(slot, label = label.get(), "priority label assigned");

        debug_assert!(self.check_invariants());
        Ok(LabelChange {
            slot,
            display: LabelDisplay::Assigned(label),
        })
    }

    /// Free the label held by `slot`.
    pub fn deselect(&mut self, slot: usize) -> Result<LabelChange, SlotError> {
        self.check_slot(slot).inspect_err(log_rejected)?;
        let item = self
            .item_at(slot)
            .cloned()
            .ok_or_else(|| invalid(slot, InvalidToggleReason::NotSelected))
            .inspect_err(log_rejected)?;
        self.deselect_item(&item, slot)
    }

    fn deselect_item(&mut self, item: &I, slot: usize) -> Result<LabelChange, SlotError> {
        let Some(label) = self.label_of(slot) else {
            let err = invalid(slot, InvalidToggleReason::NotSelected);
            log_rejected(&err);
            return Err(err);
        };
        if self.items[slot].as_ref() != Some(item) {
            let err = invalid(slot, InvalidToggleReason::ItemMismatch);
            log_rejected(&err);
            return Err(err);
        }

        self.labels[slot] = None;
        self.items[slot] = None;
        if let Some(pos) = self.selection.iter().position(|i| i == item) {
            self.selection.remove(pos);
        }
        self.reclaim(label);
        debug!(slot, label = label.get(), "priority label freed");

        debug_assert!(self.check_invariants());
        Ok(LabelChange {
            slot,
            display: LabelDisplay::Unassigned,
        })
    }

    /// Copy of the selection list, detached from later toggles.
    pub fn snapshot(&self) -> Vec<I> {
        self.selection.clone()
    }
}

fn invalid(slot: usize, reason: InvalidToggleReason) -> SlotError {
    SlotError::InvalidToggle { slot, reason }
}

fn log_rejected(err: &SlotError) {
    match err {
        SlotError::PoolExhausted { .. } => debug!(%err, "selection rejected"),
        SlotError::InvalidToggle { .. } => warn!(%err, "toggle rejected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(n: u8) -> Label {
        Label::new(n).unwrap()
    }

    fn assigned(change: LabelChange) -> u8 {
        change.display.label().map(Label::get).unwrap_or(0)
    }

    fn setup_full() -> SlotAllocator<&'static str> {
        let mut alloc = SlotAllocator::new();
        for (slot, item) in ["a", "b", "c", "d", "e", "f"].into_iter().enumerate() {
            alloc.toggle(item, slot).unwrap();
        }
        alloc
    }

    #[test]
    fn test_initial_state() {
        let alloc: SlotAllocator<&str> = SlotAllocator::new();
        assert_eq!(alloc.selected_count(), 0);
        assert!(alloc.selection_list().is_empty());
        assert_eq!(alloc.free_labels(), LabelSet::all());
        assert_eq!(alloc.next_label(), Some(label(1)));
        assert!(alloc.check_invariants());
    }

    #[test]
    fn test_sequential_labels() {
        let mut alloc = SlotAllocator::new();
        assert_eq!(assigned(alloc.toggle("a", 0).unwrap()), 1);
        assert_eq!(assigned(alloc.toggle("b", 1).unwrap()), 2);
        assert_eq!(assigned(alloc.toggle("c", 2).unwrap()), 3);
        assert_eq!(alloc.label_of(1), Some(label(2)));
    }

    #[test]
    fn test_smallest_first_reuse() {
        let mut alloc = SlotAllocator::new();
        alloc.toggle("a", 0).unwrap();
        alloc.toggle("b", 1).unwrap();
        alloc.toggle("c", 2).unwrap();

        let change = alloc.toggle("b", 1).unwrap();
        assert_eq!(change.display, LabelDisplay::Unassigned);
        assert!(!alloc.is_selected(1));

        // Freed 2 goes out before fresh 4
        assert_eq!(assigned(alloc.toggle("d", 3).unwrap()), 2);
        assert!(alloc.check_invariants());
    }

    #[test]
    fn test_recycled_labels_ascending() {
        let mut alloc = SlotAllocator::new();
        for (slot, item) in ["a", "b", "c", "d"].into_iter().enumerate() {
            alloc.toggle(item, slot).unwrap();
        }
        alloc.toggle("d", 3).unwrap();
        alloc.toggle("b", 1).unwrap();
        alloc.toggle("c", 2).unwrap();

        assert_eq!(assigned(alloc.toggle("x", 4).unwrap()), 2);
        assert_eq!(assigned(alloc.toggle("y", 5).unwrap()), 3);
        assert_eq!(assigned(alloc.toggle("z", 1).unwrap()), 4);
        assert_eq!(assigned(alloc.toggle("w", 2).unwrap()), 5);
    }

    #[test]
    fn test_full_cycle_reset() {
        let mut alloc = setup_full();
        assert_eq!(alloc.assigned_labels(), LabelSet::all());

        // Release in an order that would leave 6 first if pools drifted
        for (slot, item) in [(5, "f"), (0, "a"), (3, "d"), (1, "b"), (4, "e"), (2, "c")] {
            alloc.toggle(item, slot).unwrap();
        }

        assert_eq!(alloc.selected_count(), 0);
        assert_eq!(alloc.recycled, LabelSet::empty());
        assert_eq!(alloc.fresh, FreshLabels::new());
        assert_eq!(assigned(alloc.toggle("g", 4).unwrap()), 1);
    }

    #[test]
    fn test_overflow_rejected() {
        let mut alloc = SlotAllocator::with_slots(8);
        for (slot, item) in ["a", "b", "c", "d", "e", "f"].into_iter().enumerate() {
            alloc.toggle(item, slot).unwrap();
        }
        assert!(alloc.is_full());
        assert_eq!(alloc.next_label(), None);

        let labels_before = alloc.labels.clone();
        let list_before = alloc.snapshot();

        let err = alloc.toggle("g", 6).unwrap_err();
        assert_eq!(err, SlotError::PoolExhausted { capacity: SLOT_COUNT });
        assert!(!alloc.is_selected(6));
        assert_eq!(alloc.labels, labels_before);
        assert_eq!(alloc.snapshot(), list_before);
        assert!(alloc.check_invariants());

        // A freed label makes room again
        alloc.toggle("c", 2).unwrap();
        assert_eq!(assigned(alloc.toggle("g", 6).unwrap()), 3);
    }

    #[test]
    fn test_out_of_range_slot() {
        let mut alloc = setup_full();
        let labels_before = alloc.labels.clone();
        let list_before = alloc.snapshot();

        let err = alloc.toggle("g", SLOT_COUNT).unwrap_err();
        assert_eq!(
            err,
            SlotError::InvalidToggle {
                slot: SLOT_COUNT,
                reason: InvalidToggleReason::OutOfRange,
            }
        );
        assert_eq!(alloc.labels, labels_before);
        assert_eq!(alloc.snapshot(), list_before);
        assert!(alloc.check_invariants());
    }

    #[test]
    fn test_selection_list_click_order() {
        let mut alloc = SlotAllocator::new();
        alloc.toggle("c", 2).unwrap();
        alloc.toggle("a", 0).unwrap();
        alloc.toggle("b", 1).unwrap();
        assert_eq!(alloc.selection_list(), &["c", "a", "b"]);
        assert_eq!(alloc.label_of(2), Some(label(1)));
        assert_eq!(alloc.label_of(0), Some(label(2)));
    }

    #[test]
    fn test_deselect_then_reselect() {
        let mut alloc = SlotAllocator::new();
        alloc.toggle("a", 0).unwrap();
        alloc.toggle("b", 1).unwrap();
        alloc.toggle("c", 2).unwrap();

        alloc.toggle("b", 1).unwrap();
        assert_eq!(assigned(alloc.toggle("b", 1).unwrap()), 2);
        assert_eq!(alloc.selection_list(), &["a", "c", "b"]);
        assert!(alloc.check_invariants());
    }

    #[test]
    fn test_deselect_unselected_slot() {
        let mut alloc: SlotAllocator<&str> = SlotAllocator::new();
        let err = alloc.deselect(3).unwrap_err();
        assert_eq!(
            err,
            SlotError::InvalidToggle {
                slot: 3,
                reason: InvalidToggleReason::NotSelected,
            }
        );
        assert!(alloc.check_invariants());
    }

    #[test]
    fn test_deselect_wrong_item() {
        let mut alloc = SlotAllocator::new();
        alloc.toggle("a", 0).unwrap();
        let err = alloc.toggle("b", 0).unwrap_err();
        assert_eq!(
            err,
            SlotError::InvalidToggle {
                slot: 0,
                reason: InvalidToggleReason::ItemMismatch,
            }
        );
        assert_eq!(alloc.label_of(0), Some(label(1)));
        assert_eq!(alloc.selection_list(), &["a"]);
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut alloc = SlotAllocator::new();
        alloc.select("a", 0).unwrap();
        let change = alloc.select("a", 0).unwrap();
        assert_eq!(change.display, LabelDisplay::Assigned(label(1)));
        assert_eq!(alloc.selection_list(), &["a"]);
    }

    #[test]
    fn test_snapshot_detached() {
        let mut alloc = SlotAllocator::new();
        alloc.toggle("a", 0).unwrap();
        let snapshot = alloc.snapshot();
        alloc.toggle("b", 1).unwrap();
        alloc.toggle("a", 0).unwrap();
        assert_eq!(snapshot, vec!["a"]);
        assert_eq!(alloc.selection_list(), &["b"]);
    }

    #[test]
    fn test_reset() {
        let mut alloc = setup_full();
        alloc.reset();
        assert_eq!(alloc.selected_count(), 0);
        assert!(alloc.selection_list().is_empty());
        assert_eq!(alloc.next_label(), Some(label(1)));
        assert!(alloc.check_invariants());
    }

    #[test]
    fn test_invariants_under_churn() {
        let mut alloc: SlotAllocator<usize> = SlotAllocator::new();
        // Deterministic walk over slots
        let mut state = 7usize;
        for _ in 0..500 {
            state = (state * 31 + 11) % 97;
            let slot = state % SLOT_COUNT;
            alloc.toggle(slot, slot).unwrap();
            assert!(alloc.check_invariants());
            assert_eq!(alloc.selection_list().len(), alloc.assigned_labels().len());
        }
    }
}
