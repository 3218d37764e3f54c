//! Error types for shimhook
//!
//! Every failure of a single hook invocation is one variant of [`Error`].
//! A phase run wraps the first of them in a [`PhaseError`] without altering it.

use crate::spec::Phase;
use thiserror::Error;

/// Error raised while running a single hook
#[derive(Error, Debug)]
pub enum Error {
    /// The lifecycle state could not be serialized
    #[error("Failed to encode lifecycle state: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The hook process could not be started
    #[error("Failed to start hook '{path}': {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The hook exited non-zero, or waiting on it failed
    ///
    /// Captured output is kept as two separate streams and only joined when displayed.
    #[error("{reason}: stdout: {stdout}, stderr: {stderr}")]
    HookFailed {
        reason: String,
        stdout: String,
        stderr: String,
    },

    /// The configured timeout elapsed and the hook was sent SIGKILL
    #[error("Hook timeout after {timeout} seconds")]
    HookTimeout { timeout: u64 },

    /// The timeout elapsed but SIGKILL could not be delivered
    #[error("Failed to kill hook process {pid}: {source}")]
    Kill {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown lifecycle phase name
    #[error("Unknown hook phase '{0}' (expected pre-start, post-start or post-stop)")]
    InvalidPhase(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// First hook failure of a phase run, attributed to the phase and hook position
#[derive(Error, Debug)]
#[error("{phase} hook #{index} ({path}) failed: {source}")]
pub struct PhaseError {
    /// Phase the failing hook belongs to
    pub phase: Phase,
    /// Position of the failing hook in the phase's list
    pub index: usize,
    /// Executable path of the failing hook
    pub path: String,
    /// The hook's own error, unchanged
    #[source]
    pub source: Error,
}

impl PhaseError {
    /// Whether the hook was killed for exceeding its timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.source, Error::HookTimeout { .. })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_hook_failed_joins_streams_at_display() {
        let err = Error::HookFailed {
            reason: "exit status: 1".to_string(),
            stdout: "out".to_string(),
            stderr: "boom".to_string(),
        };

        assert_eq!(err.to_string(), "exit status: 1: stdout: out, stderr: boom");
    }

    #[test]
    fn test_kill_error_keeps_source() {
        let err = Error::Kill {
            pid: 4242,
            source: std::io::Error::from_raw_os_error(1),
        };

        assert!(err.to_string().starts_with("Failed to kill hook process 4242: "));
        let source = std::error::Error::source(&err).unwrap();
        let source = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(source.raw_os_error(), Some(1));
    }

    #[test]
    fn test_phase_error_keeps_source() {
        let err = PhaseError {
            phase: Phase::PostStop,
            index: 2,
            path: "/usr/bin/cleanup".to_string(),
            source: Error::HookTimeout { timeout: 3 },
        };

        assert!(err.is_timeout());
        assert!(matches!(err.source, Error::HookTimeout { timeout: 3 }));
        assert_eq!(
            err.to_string(),
            "post-stop hook #2 (/usr/bin/cleanup) failed: Hook timeout after 3 seconds"
        );

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Hook timeout after 3 seconds");
    }
}
