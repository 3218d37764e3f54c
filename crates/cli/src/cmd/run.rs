//! Run the hooks of one lifecycle phase
//!
//! Plays the orchestration side: loads the bundle's hook specification and
//! hands the requested phase's hooks to the engine.

use anyhow::{Context, Result};
use clap::Args;
use shimhook_config::bundle::{load_runtime_spec, load_spec_file};
use shimhook_core::Phase;
use shimhook_engine::{TracingReporter, run_phase_hooks};
use std::path::PathBuf;

/// Run one lifecycle phase
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Lifecycle phase: pre-start, post-start or post-stop
    #[arg(value_name = "PHASE")]
    pub phase: Phase,

    /// Container bundle directory
    #[arg(short, long, value_name = "DIR")]
    pub bundle: PathBuf,

    /// Container id
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Read hooks from this file instead of the bundle's config.json
    #[arg(long, value_name = "FILE")]
    pub spec: Option<PathBuf>,
}

impl RunCommand {
    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let bundle = std::path::absolute(&self.bundle)
            .with_context(|| format!("Invalid bundle path {}", self.bundle.display()))?;

        let spec = match &self.spec {
            Some(path) => load_spec_file(path),
            None => load_runtime_spec(&bundle),
        }
        .context("Failed to load runtime spec")?;

        run_phase_hooks(&spec, self.phase, &self.id, &bundle, TracingReporter)
            .with_context(|| format!("{} hooks failed", self.phase))?;

        tracing::info!(phase = %self.phase, container_id = %self.id, "Hooks completed");
        Ok(())
    }
}
