//! # Shimhook Engine
//!
//! Runs OCI container lifecycle hooks on behalf of a runtime shim.
//!
//! This crate provides:
//!
//! - **Lifecycle State**: The JSON payload each hook reads from stdin
//! - **Hook Invocation**: Spawning one hook, capturing its output, enforcing its timeout
//! - **Phase Runner**: Ordered, fail-fast execution of a phase's hook list
//! - **Entry Points**: `pre_start_hooks`, `post_start_hooks`, `post_stop_hooks`

pub mod hooks;

// Re-export error types from core
pub use shimhook_core::{Error, PhaseError, Result};

// Re-export commonly used types
pub use hooks::{
    FailureReporter, LifecycleState, PhaseRunner, TracingReporter, post_start_hooks,
    post_stop_hooks, pre_start_hooks, run_phase_hooks,
};
pub use shimhook_core::{HookDescriptor, Hooks, Phase, RuntimeSpec};
