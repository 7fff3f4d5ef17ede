//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// mcdr-testbed - Disposable MCDReforged plugin test environments
#[derive(Parser, Debug)]
#[command(name = "mcdrt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write a default configuration file to ./env1.json
    ///
    /// Touches no environment. Edit the generated file (at least
    /// plugin_code_path) before running init against it.
    #[command(name = "gen_config")]
    GenConfig,

    /// Provision a fresh test environment from a configuration file
    Init {
        /// Path to the JSON configuration file
        config: PathBuf,

        /// Answer every prompt with its default instead of asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Package the plugin under test into a provisioned environment
    ///
    /// Requires an environment that init has already completed.
    Test {
        /// Path to the JSON configuration file
        config: PathBuf,

        /// Answer every prompt with its default instead of asking
        #[arg(short, long)]
        yes: bool,
    },
}
