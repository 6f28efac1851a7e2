//! Full-screen TUI for phonegate: landing redirect, login form, dashboard.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use features::{dashboard, login};
use phonegate_core::config::Config;
use phonegate_core::profile::RandomUserClient;
use phonegate_core::session::SessionContext;
pub use runtime::TuiRuntime;

/// Runs the interactive app against the default session storage.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the config holds an invalid
/// profile endpoint, or the terminal fails.
pub fn run_app(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive app requires a terminal.\n\
             Use `phonegate login --phone <NUMBER>` for non-interactive login."
        );
    }

    let client = RandomUserClient::from_config(config)?;
    let session = SessionContext::open_default();

    let mut runtime = TuiRuntime::new(session, client)?;
    runtime.run()
}
