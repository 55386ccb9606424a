//! Full-screen terminal dashboard for runboard.

pub mod common;
pub mod details;
pub mod effects;
pub mod events;
pub mod notifications;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{stderr, IsTerminal};

use anyhow::Result;
use runboard_core::config::Config;
use runboard_core::filter::FilterState;
pub use runtime::TuiRuntime;

/// Runs the interactive dashboard until the user quits.
///
/// `filter` seeds the initial filter state (the CLI equivalent of opening the
/// dashboard through a saved locator); `auto_refresh` enables the periodic
/// refresh timer.
pub async fn run_dashboard(config: Config, filter: FilterState, auto_refresh: bool) -> Result<()> {
    // The dashboard needs a terminal to render into
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `runboard events` for non-interactive output."
        );
    }

    let mut runtime = TuiRuntime::new(config, filter, auto_refresh)?;
    runtime.run()
}
