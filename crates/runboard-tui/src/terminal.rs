//! Terminal lifecycle management.
//!
//! Handles terminal setup, restore, and panic hooks. Terminal state is
//! restored on normal exit, panic, and Ctrl+C (which arrives as a key event
//! in raw mode and goes through the normal quit path).

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Sets up the terminal for the dashboard.
///
/// - Enables raw mode
/// - Enters alternate screen
/// - Creates the terminal instance
///
/// Call `install_panic_hook()` before this to ensure restore on panic.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Enables additional terminal features for the event loop.
///
/// - Focus change reporting (drives the auto-refresh pause/resume)
/// - Mouse capture (row clicks open the detail panel)
pub fn enable_input_features() -> Result<()> {
    execute!(io::stdout(), EnableFocusChange, EnableMouseCapture)
        .context("Failed to enable input features")?;
    Ok(())
}

/// Disables the features enabled by `enable_input_features()`.
///
/// Call this before `restore_terminal()` in normal exit paths.
pub fn disable_input_features() -> Result<()> {
    execute!(io::stdout(), DisableMouseCapture, DisableFocusChange)
        .context("Failed to disable input features")?;
    Ok(())
}

/// Restores terminal state.
///
/// This function is idempotent and safe to call multiple times.
pub fn restore_terminal() -> Result<()> {
    // Safe even if the features were never enabled.
    let _ = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);

    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
///
/// Call this BEFORE `setup_terminal()`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
