//! Print the lifecycle state payload

use anyhow::{Context, Result};
use clap::Args;
use shimhook_engine::LifecycleState;
use std::path::PathBuf;

/// Show the JSON a hook would read from stdin
#[derive(Debug, Args)]
pub struct StateCommand {
    /// Container bundle directory
    #[arg(short, long, value_name = "DIR")]
    pub bundle: PathBuf,

    /// Container id
    #[arg(long, value_name = "ID")]
    pub id: String,
}

impl StateCommand {
    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let bundle = std::path::absolute(&self.bundle)
            .with_context(|| format!("Invalid bundle path {}", self.bundle.display()))?;

        let state = LifecycleState::current(&self.id, &bundle);
        let json = serde_json::to_string_pretty(&state).context("Failed to encode state")?;
        println!("{json}");
        Ok(())
    }
}
