//! Lifecycle state payload
//!
//! The JSON object every hook reads from its standard input. Field names are
//! a contract with third-party hook executables.

use serde::{Deserialize, Serialize};
use shimhook_core::Result;
use std::path::Path;

/// State of the container a hook is invoked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleState {
    /// Process id of the runtime issuing the hook
    pub pid: u32,

    /// Absolute path of the container's bundle directory
    pub bundle: String,

    /// Container identifier
    pub id: String,
}

impl LifecycleState {
    /// Create a state from explicit values
    pub fn new(pid: u32, bundle: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            pid,
            bundle: bundle.into(),
            id: id.into(),
        }
    }

    /// State for the current process
    pub fn current(container_id: &str, bundle: &Path) -> Self {
        Self::new(
            std::process::id(),
            bundle.to_string_lossy(),
            container_id,
        )
    }

    /// Serialize to the payload written to a hook's stdin
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
