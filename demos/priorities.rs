//! Priorities Example - The wizard's priorities step in a terminal
//!
//! This example demonstrates everything working together:
//! - Slot allocation with smallest-first label reuse
//! - Label signals feeding the diff renderer
//! - Label callbacks
//! - Submission of the click-ordered list
//!
//! Keys: 1-6 or Space toggle, arrows move, r clears, Enter submits, q quits.
//!
//! Run with: RUST_LOG=debug cargo run --example priorities 2> priorities.log

use std::cell::RefCell;
use std::io::{self, stdout};
use std::rc::Rc;
use std::time::Duration;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing_subscriber::EnvFilter;
use wizard_priorities::{
    state::input::poll_command, submit_priorities, DiffRenderer, Frame, JsonLineChannel,
    LabelCallbacks, MemorySessionStore, PrioritySelection, SlotCursor, WizardCommand,
    WizardConfig,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match WizardConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return;
        }
    };

    let session = MemorySessionStore::new(
        std::env::var("WIZARD_SESSION_ID").unwrap_or_else(|_| "demo-session".to_string()),
    );

    if let Err(e) = enable_raw_mode() {
        eprintln!("Failed to enter raw mode: {e}");
        return;
    }
    let mut renderer = DiffRenderer::new(stdout());
    let result = renderer
        .enter_fullscreen()
        .and_then(|_| run(&mut renderer, &config, &session));
    let _ = renderer.exit_fullscreen();
    let _ = disable_raw_mode();

    match result {
        Ok(Some(request_log)) => print!("{request_log}"),
        Ok(None) => println!("No priorities submitted"),
        Err(e) => eprintln!("Terminal error: {e}"),
    }
}

/// Event loop. Returns the submitted request, if any.
fn run(
    renderer: &mut DiffRenderer<io::Stdout>,
    config: &WizardConfig,
    session: &MemorySessionStore,
) -> io::Result<Option<String>> {
    let selection = PrioritySelection::new();
    let mut cursor = SlotCursor::default();

    let status = Rc::new(RefCell::new(String::from("Pick up to six priorities")));
    let _cleanup = selection.register_callbacks(LabelCallbacks {
        on_label_changed: Some(Box::new({
            let status = status.clone();
            move |slot, display| {
                *status.borrow_mut() = match display.label() {
                    Some(label) => format!("Slot {} ranked {label}", slot + 1),
                    None => format!("Slot {} cleared", slot + 1),
                };
            }
        })),
    });

    loop {
        renderer.render(&Frame::capture(&selection, cursor.row(), status.borrow().clone()))?;

        let Some(command) = poll_command(Duration::from_millis(100))? else {
            continue;
        };

        let toggled = match command {
            WizardCommand::Toggle(slot) => Some(selection.toggle(slot)),
            WizardCommand::ToggleCursor => Some(selection.toggle(cursor.row())),
            WizardCommand::CursorUp => {
                cursor.up();
                None
            }
            WizardCommand::CursorDown => {
                cursor.down();
                None
            }
            WizardCommand::Reset => {
                selection.reset();
                *status.borrow_mut() = "Priorities cleared".to_string();
                None
            }
            WizardCommand::Submit => {
                let mut channel = JsonLineChannel::new(Vec::new());
                match submit_priorities(&selection, session, &mut channel, config) {
                    Ok(next) => {
                        let mut log = String::from_utf8_lossy(&channel.into_inner()).into_owned();
                        log.push_str(&format!("Next step: {next}\n"));
                        return Ok(Some(log));
                    }
                    Err(e) => {
                        *status.borrow_mut() = format!("Submission failed: {e}");
                        None
                    }
                }
            }
            WizardCommand::Quit => return Ok(None),
        };

        if let Some(Err(e)) = toggled {
            *status.borrow_mut() = e.to_string();
        }
    }
}
