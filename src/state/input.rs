//! Input Module - Terminal key events to wizard commands
//!
//! Bridges crossterm's event system with the priorities step.
//! The terminal plays the part of the page's answer buttons.
//!
//! # Key map
//!
//! - `1`..`6` - toggle that slot
//! - `Up` / `k`, `Down` / `j` - move the cursor
//! - `Space` - toggle the slot under the cursor
//! - `r` - clear all priorities
//! - `Enter` - submit
//! - `Esc` / `q` / `Ctrl+C` - quit
//!
//! # Example
//!
//! ```ignore
//! use wizard_priorities::state::input::{poll_command, WizardCommand};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(command)) = poll_command(Duration::from_millis(50)) {
//!         // apply command
//!     }
//! }
//! ```

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEventKind, KeyModifiers,
    KeyEvent as CrosstermKeyEvent,
    poll, read,
};

use crate::types::SLOT_COUNT;

// =============================================================================
// WIZARD COMMAND
// =============================================================================

/// What a key press asks the priorities step to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardCommand {
    /// Toggle a specific slot
    Toggle(usize),
    /// Toggle the slot under the cursor
    ToggleCursor,
    CursorUp,
    CursorDown,
    /// Clear every selection
    Reset,
    /// Send the selection list and move to the next step
    Submit,
    Quit,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to a WizardCommand.
/// Releases and unmapped keys give None.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<WizardCommand> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(WizardCommand::Quit),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Char(c @ '1'..='9') => {
            let slot = (c as u8 - b'1') as usize;
            (slot < SLOT_COUNT).then_some(WizardCommand::Toggle(slot))
        }
        KeyCode::Char(' ') => Some(WizardCommand::ToggleCursor),
        KeyCode::Up | KeyCode::Char('k') => Some(WizardCommand::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(WizardCommand::CursorDown),
        KeyCode::Char('r') => Some(WizardCommand::Reset),
        KeyCode::Enter => Some(WizardCommand::Submit),
        KeyCode::Esc | KeyCode::Char('q') => Some(WizardCommand::Quit),
        _ => None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for a command with timeout.
/// Returns None if no mapped key arrives within timeout.
pub fn poll_command(timeout: Duration) -> std::io::Result<Option<WizardCommand>> {
    if poll(timeout)? {
        read_command()
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking) and map it.
pub fn read_command() -> std::io::Result<Option<WizardCommand>> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(convert_key_event(key)),
        _ => Ok(None),
    }
}

// =============================================================================
// CURSOR
// =============================================================================

/// Row cursor over the slots, wrapping at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotCursor {
    row: usize,
}

impl SlotCursor {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn up(&mut self) {
        self.row = (self.row + SLOT_COUNT - 1) % SLOT_COUNT;
    }

    pub fn down(&mut self) {
        self.row = (self.row + 1) % SLOT_COUNT;
    }
}

// =============================================================================
// TESTS
// =============================================================================
