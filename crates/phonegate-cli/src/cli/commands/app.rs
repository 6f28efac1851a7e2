//! Interactive app command handler.

use anyhow::Result;
use phonegate_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    tracing::info!("starting interactive app");
    phonegate_tui::run_app(config)
}
