//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use phonegate_core::config::Config;
use phonegate_core::logging::{self, WorkerGuard};

mod commands;

#[derive(Parser)]
#[command(name = "phonegate")]
#[command(version)]
#[command(about = "Phone number login with a terminal dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with an Iranian phone number (non-interactive)
    Login {
        /// Phone number, e.g. 09123456789
        #[arg(long, value_name = "NUMBER")]
        phone: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the logged-in profile
    Whoami,

    /// Print where the landing page would redirect
    Route,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Loads config and installs logging. The guard must outlive the command.
fn setup() -> Result<(Config, WorkerGuard)> {
    let config = Config::load().context("load config")?;
    let guard = logging::init(&config).context("init logging")?;
    Ok((config, guard))
}

/// Installs logging for commands that only touch the session store.
/// A broken config falls back to defaults instead of blocking them.
fn setup_logging() -> Result<WorkerGuard> {
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let guard = logging::init(&config).context("init logging")?;
    if let Some(e) = load_error {
        tracing::warn!(error = %format!("{e:#}"), "ignoring unusable config");
    }
    Ok(guard)
}

async fn dispatch(cli: Cli) -> Result<()> {
    // default to the interactive app
    let Some(command) = cli.command else {
        let (config, _log_guard) = setup()?;
        return commands::app::run(&config);
    };

    match command {
        Commands::Login { phone } => {
            let (config, _log_guard) = setup()?;
            commands::session::login(&config, &phone).await
        }
        Commands::Logout => {
            let _log_guard = setup_logging()?;
            commands::session::logout()
        }
        Commands::Whoami => {
            let _log_guard = setup_logging()?;
            commands::session::whoami()
        }
        Commands::Route => {
            let _log_guard = setup_logging()?;
            commands::session::route();
            Ok(())
        }

        // Config commands must work even when the config file is broken.
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
