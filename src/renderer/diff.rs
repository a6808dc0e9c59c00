//! Differential renderer for the priorities step.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! redraws rows that have changed. Toggling one slot touches one row.
//!
//! # Algorithm
//!
//! 1. For each row in the new frame:
//!    - If previous frame exists and row is unchanged: skip
//!    - Otherwise: move to the row, clear it, draw it
//! 2. Same for the status line
//! 3. Flush the writer (single syscall for stdout)
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::frame::{Frame, RowView};

const TITLE: &str = "Rank what matters most when choosing a car";

/// Differential renderer.
///
/// Keeps track of the previous frame to enable diff-based rendering.
pub struct DiffRenderer<W: Write> {
    out: W,
    previous: Option<Frame>,
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, previous: None }
    }

    /// Render a frame, drawing only changed rows.
    ///
    /// Returns the number of lines drawn.
    pub fn render(&mut self, frame: &Frame) -> io::Result<usize> {
        let mut drawn = 0;

        if self.previous.is_none() {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
            queue!(self.out, SetAttribute(Attribute::Bold), Print(TITLE))?;
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }

        for (y, row) in frame.rows.iter().enumerate() {
            let changed = match &self.previous {
                Some(prev) => prev.rows.get(y) != Some(row),
                None => true,
            };
            if changed {
                self.draw_row(y as u16 + 2, row)?;
                drawn += 1;
            }
        }

        let status_changed = match &self.previous {
            Some(prev) => prev.status != frame.status,
            None => true,
        };
        if status_changed {
            let y = frame.rows.len() as u16 + 3;
            queue!(self.out, MoveTo(0, y), Clear(ClearType::CurrentLine), Print(&frame.status))?;
            drawn += 1;
        }

        self.out.flush()?;
        self.previous = Some(frame.clone());
        Ok(drawn)
    }

    fn draw_row(&mut self, y: u16, row: &RowView) -> io::Result<()> {
        queue!(self.out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
        if row.cursor {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if row.clicked {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(
            self.out,
            Print(Frame::row_text(row)),
            SetAttribute(Attribute::Reset)
        )
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen mode (alternate screen buffer).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, EnterAlternateScreen, Hide)?;
        self.out.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Exit fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// =============================================================================
// Tests
// =============================================================================
