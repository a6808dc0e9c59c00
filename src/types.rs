//! Core types for wizard-priorities.
//!
//! Labels, label sets and the criteria the priorities step offers.
//! Everything else in the crate is expressed in terms of these.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of slots on the priorities step, and the number of labels.
pub const SLOT_COUNT: usize = 6;

// =============================================================================
// Label
// =============================================================================

/// A priority rank in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(u8);

impl Label {
    pub const MIN: Label = Label(1);
    pub const MAX: Label = Label(SLOT_COUNT as u8);

    /// Create a label, rejecting values outside `1..=6`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= SLOT_COUNT as u8 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The rank as shown to the user.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate all labels in issue order (1 first).
    pub fn all() -> impl Iterator<Item = Label> {
        (1..=SLOT_COUNT as u8).map(Label)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// LabelSet (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Set of labels as a bitfield. Bit `n - 1` holds label `n`.
    ///
    /// The lowest set bit is the smallest label, so min-ordered access is a
    /// `trailing_zeros`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LabelSet: u8 {
        const L1 = 1 << 0;
        const L2 = 1 << 1;
        const L3 = 1 << 2;
        const L4 = 1 << 3;
        const L5 = 1 << 4;
        const L6 = 1 << 5;
    }
}

impl LabelSet {
    #[inline]
    pub const fn of(label: Label) -> Self {
        Self::from_bits_truncate(1 << (label.get() - 1))
    }

    /// Insert a label. Inserting twice is a no-op.
    pub fn add(&mut self, label: Label) {
        self.insert(Self::of(label));
    }

    pub fn has(&self, label: Label) -> bool {
        self.contains(Self::of(label))
    }

    /// Smallest label in the set.
    pub fn smallest(&self) -> Option<Label> {
        if self.is_empty() {
            return None;
        }
        Label::new(self.bits().trailing_zeros() as u8 + 1)
    }

    /// Remove and return the smallest label.
    pub fn take_smallest(&mut self) -> Option<Label> {
        let label = self.smallest()?;
        self.remove(Self::of(label));
        Some(label)
    }

    /// Number of labels in the set.
    pub fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> Vec<Label> {
        Label::all().filter(|l| self.has(*l)).collect()
    }
}

// =============================================================================
// LabelDisplay
// =============================================================================

/// What the renderer shows next to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDisplay {
    Assigned(Label),
    Unassigned,
}

impl LabelDisplay {
    pub fn label(&self) -> Option<Label> {
        match self {
            LabelDisplay::Assigned(label) => Some(*label),
            LabelDisplay::Unassigned => None,
        }
    }
}

impl From<Option<Label>> for LabelDisplay {
    fn from(label: Option<Label>) -> Self {
        match label {
            Some(label) => LabelDisplay::Assigned(label),
            None => LabelDisplay::Unassigned,
        }
    }
}

/// `"{label}:"` when assigned, empty otherwise.
impl fmt::Display for LabelDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelDisplay::Assigned(label) => write!(f, "{label}:"),
            LabelDisplay::Unassigned => Ok(()),
        }
    }
}

// =============================================================================
// Criterion
// =============================================================================

/// The car-ranking criteria offered on the priorities step, in slot order.
///
/// Serialized as the names the ranking backend matches its fuzzy sets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    #[serde(rename = "Экономичность")]
    Economy,
    #[serde(rename = "Комфорт")]
    Comfort,
    #[serde(rename = "Безопасность")]
    Safety,
    #[serde(rename = "Динамика")]
    Dynamics,
    #[serde(rename = "Управляемость")]
    Handling,
    #[serde(rename = "Цена")]
    Price,
}

impl Criterion {
    /// All criteria in slot order.
    pub const ALL: [Criterion; SLOT_COUNT] = [
        Criterion::Economy,
        Criterion::Comfort,
        Criterion::Safety,
        Criterion::Dynamics,
        Criterion::Handling,
        Criterion::Price,
    ];

    /// Slot this criterion occupies on the page.
    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    /// Name sent to the backend.
    pub fn wire_name(self) -> &'static str {
        match self {
            Criterion::Economy => "Экономичность",
            Criterion::Comfort => "Комфорт",
            Criterion::Safety => "Безопасность",
            Criterion::Dynamics => "Динамика",
            Criterion::Handling => "Управляемость",
            Criterion::Price => "Цена",
        }
    }

    /// Button caption.
    pub fn title(self) -> &'static str {
        match self {
            Criterion::Economy => "Fuel economy",
            Criterion::Comfort => "Comfort",
            Criterion::Safety => "Safety",
            Criterion::Dynamics => "Dynamics",
            Criterion::Handling => "Handling",
            Criterion::Price => "Low price",
        }
    }
}
