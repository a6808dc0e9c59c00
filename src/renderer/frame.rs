//! Frame - What the priorities step looks like at one instant.
//!
//! A frame is plain data computed from [`PrioritySelection`]. The renderer
//! compares frames; it never reads the selection itself.

use crate::state::PrioritySelection;
use crate::types::Criterion;

/// One answer button with its priority label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// `"{label}:"` or empty.
    pub label_text: String,
    pub title: &'static str,
    /// Drawn reversed, like the page's "clicked" class.
    pub clicked: bool,
    pub cursor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<RowView>,
    /// Status line under the rows (errors, submission result).
    pub status: String,
}

impl Frame {
    /// Build a frame from the selection, cursor row and status text.
    pub fn capture(selection: &PrioritySelection, cursor: usize, status: impl Into<String>) -> Self {
        let rows = Criterion::ALL
            .iter()
            .map(|criterion| {
                let slot = criterion.slot();
                RowView {
                    label_text: selection.label_text(slot),
                    title: criterion.title(),
                    clicked: selection.is_clicked(slot),
                    cursor: slot == cursor,
                }
            })
            .collect();

        Self {
            rows,
            status: status.into(),
        }
    }

    /// Text of one row without styling.
    pub fn row_text(row: &RowView) -> String {
        let marker = if row.cursor { '>' } else { ' ' };
        format!("{marker} {:>3} {}", row.label_text, row.title)
    }
}
