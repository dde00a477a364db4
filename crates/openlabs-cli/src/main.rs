//! OpenLabs CLI binary entrypoint.
//!
//! Parses arguments, wires up logging, and dispatches to the command
//! handlers. Every error prints as a single line on stderr and the
//! process exits nonzero.

mod cli;
mod commands;
mod output;
mod prompt;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use openlabs_core::Overrides;

/// Initialize the tracing subscriber for logging.
///
/// `--debug` forces request/response detail; otherwise RUST_LOG controls
/// the level, defaulting to warnings only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env if present; silently ignore when absent.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        api_url: cli.api_url,
        token: cli.token,
        enc_key: cli.enc_key,
    };

    match cli.command {
        Commands::User { command } => commands::auth::run(&overrides, command).await,
        Commands::Blueprints { command } => commands::blueprint::run(&overrides, command).await,
        Commands::Range { command } => commands::range::run(&overrides, command).await,
        Commands::Workspace { command } => commands::workspace::run(&overrides, command).await,
        Commands::Secrets { command } => commands::secrets::run(&overrides, command).await,
        Commands::Config { command } => commands::config::run(command),
        Commands::Version => {
            println!("OpenLabs CLI v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
