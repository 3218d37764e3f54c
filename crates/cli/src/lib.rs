//! Shimhook CLI library
//!
//! This library contains the CLI logic for shimhook, making it reusable
//! for testing and integration with other tools.

pub mod cmd;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shimhook - run OCI container lifecycle hooks
#[derive(Parser)]
#[command(name = "shimhook")]
#[command(about = "Run OCI container lifecycle hooks")]
#[command(version)]
#[command(long_about = "Run OCI container lifecycle hooks

Executes the pre-start, post-start or post-stop hooks configured in a
bundle's config.json, the way a runtime shim does around a container's
lifecycle. Each hook receives the container state as JSON on stdin.

Examples:
  • shimhook run pre-start --bundle /run/bundles/c1 --id c1
  • shimhook run post-stop --bundle /run/bundles/c1 --id c1 --spec hooks.json
  • shimhook state --bundle /run/bundles/c1 --id c1")]
pub struct Cli {
    /// Path to the config file
    #[arg(long, env = "SHIMHOOK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file
    #[arg(long, env = "SHIMHOOK_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the shimhook CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Run the hooks of one lifecycle phase
    Run(cmd::run::RunCommand),

    /// Print the lifecycle state a hook would receive on stdin
    State(cmd::state::StateCommand),
}

/// Main entry point for the CLI logic
pub fn run(cli: Cli) -> Result<()> {
    let config = shimhook_config::Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    // Command line flags take precedence over the config file
    let verbose = cli.verbose || config.log.verbose;
    let log_file = cli.log_file.or(config.log.file);
    shimhook_config::logging::init(verbose, log_file.as_deref())
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Run(run_cmd) => run_cmd.execute(),
        Commands::State(state_cmd) => state_cmd.execute(),
    }
}
