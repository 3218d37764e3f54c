//! Bundle specification loading
//!
//! Reads the hooks section of an OCI bundle's `config.json`. Only
//! deserialization happens here; the hooks are not validated.

use crate::Result;
use shimhook_core::{Error, RuntimeSpec};
use std::fs;
use std::path::Path;

/// Name of the runtime specification file inside a bundle
pub const SPEC_FILE_NAME: &str = "config.json";

/// Load the runtime specification of the bundle at `bundle_dir`
pub fn load_runtime_spec(bundle_dir: &Path) -> Result<RuntimeSpec> {
    load_spec_file(&bundle_dir.join(SPEC_FILE_NAME))
}

/// Load a runtime specification from an explicit file
pub fn load_spec_file(path: &Path) -> Result<RuntimeSpec> {
    let content = fs::read(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read runtime spec {}: {e}",
            path.display()
        ))
    })?;

    let spec: RuntimeSpec = serde_json::from_slice(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse runtime spec {}: {e}",
            path.display()
        ))
    })?;

    tracing::debug!(
        path = %path.display(),
        hook_count = spec.hooks.as_ref().map_or(0, shimhook_core::Hooks::total),
        "Loaded runtime spec"
    );

    Ok(spec)
}
