//! Hook specification data model
//!
//! Mirrors the `hooks` section of an OCI runtime `config.json`. The types only
//! carry data; validating them is the job of whoever produced the specification.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single hook: an executable plus how to invoke it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookDescriptor {
    /// Absolute path of the executable
    pub path: String,

    /// Argument vector; the first element becomes the child's `argv[0]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment as `KEY=VALUE` entries
    ///
    /// `None` leaves the caller's environment in place. `Some` replaces it
    /// entirely, so an explicit empty list runs the hook with no environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<String>>,

    /// Timeout in seconds (`None` = wait forever)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl HookDescriptor {
    /// Create a descriptor for `path` with no arguments or timeout
    ///
    /// The hook inherits the caller's environment.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the argument vector
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the environment with `env`
    #[must_use]
    pub fn with_env<I, S>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env = Some(env.into_iter().map(Into::into).collect());
        self
    }

    /// Set the timeout in seconds
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }
}

/// Hook lists for each lifecycle phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hooks {
    /// Hooks run after the container is created, before its process starts
    #[serde(default)]
    pub prestart: Vec<HookDescriptor>,

    /// Hooks run after the container process has started
    #[serde(default)]
    pub poststart: Vec<HookDescriptor>,

    /// Hooks run after the container has been torn down
    #[serde(default)]
    pub poststop: Vec<HookDescriptor>,
}

impl Hooks {
    /// Hooks configured for `phase`
    #[must_use]
    pub fn for_phase(&self, phase: Phase) -> &[HookDescriptor] {
        match phase {
            Phase::PreStart => &self.prestart,
            Phase::PostStart => &self.poststart,
            Phase::PostStop => &self.poststop,
        }
    }

    /// Get total number of hooks
    #[must_use]
    pub fn total(&self) -> usize {
        self.prestart.len() + self.poststart.len() + self.poststop.len()
    }
}

/// The part of a container specification this crate cares about
///
/// Every key other than `hooks` is ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Hooks section; `None` when the specification has none at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Hooks>,
}

/// Lifecycle phase at which a hook list runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the container process starts
    PreStart,
    /// After the container process has started
    PostStart,
    /// After the container has stopped
    PostStop,
}

impl Phase {
    /// All phases, in lifecycle order
    pub const ALL: [Phase; 3] = [Phase::PreStart, Phase::PostStart, Phase::PostStop];

    /// Label used in failure reports
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PreStart => "pre-start",
            Self::PostStart => "post-start",
            Self::PostStop => "post-stop",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.name() == s)
            .ok_or_else(|| Error::InvalidPhase(s.to_string()))
    }
}
