//! Logging configuration for the shimhook CLI
//!
//! Logs go to stderr, and optionally to a file, using tracing.
//! Library crates only emit events; the binary decides where they end up.

use crate::Result;
use shimhook_core::Error;
use std::io::IsTerminal;
use std::path::Path;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for our crates
fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("shimhook={level},shimhook_engine={level},shimhook_config={level}")
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging (and timestamps) on stderr
/// * `log_file` - Optional path to append debug level logs to
///
/// `RUST_LOG` overrides the stderr filter.
///
/// # Examples
/// ```ignore
/// // Basic usage with info level
/// init(false, None)?;
///
/// // Verbose mode, also writing to a file
/// init(true, Some(Path::new("/var/log/shimhook.log")))?;
/// ```
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .map_err(|e| Error::Config(format!("Invalid log filter: {e}")))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(std::io::stderr().is_terminal())
        .compact();
    // No timestamps in normal mode
    let stderr_layer = if verbose {
        stderr_layer.boxed()
    } else {
        stderr_layer.without_time().boxed()
    };

    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(env_filter))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(
            default_directive(false),
            "shimhook=info,shimhook_engine=info,shimhook_config=info"
        );
        assert!(default_directive(true).contains("shimhook_engine=debug"));
    }

    #[test]
    fn test_default_directive_parses() {
        EnvFilter::try_new(default_directive(true)).unwrap();
    }
}
