//! mcdr-testbed CLI
//!
//! Provisions and drives disposable MCDReforged plugin test environments.

mod cli;
mod commands;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;
use mcdrt_core::TestbedConfig;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenConfig => {
            setup_tracing(cli.verbose);
            commands::run_gen_config()
        }
        Commands::Init { config, yes } => {
            let config = TestbedConfig::load(&config)?;
            setup_tracing(cli.verbose || config.debug);
            commands::run_init(&config, yes)
        }
        Commands::Test { config, yes } => {
            let config = TestbedConfig::load(&config)?;
            setup_tracing(cli.verbose || config.debug);
            commands::run_test(&config, yes)
        }
    }
}

/// Install the global subscriber; DEBUG when `--verbose` or the config's
/// `debug` flag asks for it
fn setup_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
    if debug {
        tracing::debug!("Logging level is set to debug");
    }
}
