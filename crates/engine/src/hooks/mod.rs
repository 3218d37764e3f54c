//! Hook system for container lifecycle phases
//!
//! Runs the external executables configured for a container's pre-start,
//! post-start and post-stop phases.
//!
//! ## Execution Model
//!
//! - Hooks of one phase run strictly one after another, in list order
//! - The first failing hook stops the phase; later hooks never run
//! - Every hook receives the lifecycle state as JSON on its standard input
//! - A hook with a timeout is sent SIGKILL once the timeout elapses
//!
//! ## Module Organization
//!
//! - `state`: Lifecycle state payload written to each hook's stdin
//! - `executor`: Single hook invocation with timeout enforcement
//! - `phase`: Sequential phase runner and failure reporting
//! - `lifecycle`: Per-phase entry points taking a runtime specification

pub mod executor;
pub mod lifecycle;
pub mod phase;
pub mod state;

// Re-export main types for convenience
pub use executor::invoke;
pub use lifecycle::{post_start_hooks, post_stop_hooks, pre_start_hooks, run_phase_hooks};
pub use phase::{FailureReporter, PhaseRunner, TracingReporter};
pub use state::LifecycleState;
