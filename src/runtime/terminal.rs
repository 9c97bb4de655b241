//! Terminal setup and restore.
//!
//! The terminal is restored on normal exit and on panic.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enables raw mode, enters the alternate screen and turns on bracketed paste.
/// If anything after raw mode fails, the terminal is restored before the
/// error is returned.
///
/// Call [`install_panic_hook`] first.
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    or_undo(enter_screen, || {
        let _ = restore_terminal();
    })
}

fn enter_screen() -> Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

/// Runs `step`; on failure runs `undo` before handing back the error.
fn or_undo<T>(step: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    step().inspect_err(|_| undo())
}

/// Idempotent; safe to call from the panic hook. Raw mode is disabled even
/// when leaving the alternate screen fails.
pub fn restore_terminal() -> Result<()> {
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    let left =
        execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen");
    disable_raw_mode().context("Failed to disable raw mode")?;
    left
}

pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
