//! Lifecycle phase entry points
//!
//! Called by container lifecycle orchestration at creation (pre-start), after
//! the container process starts (post-start) and after teardown (post-stop).

use super::phase::{FailureReporter, PhaseRunner, TracingReporter};
use shimhook_core::{Phase, PhaseError, RuntimeSpec};
use std::path::Path;

/// Run the hooks `spec` configures for `phase`
pub fn run_phase_hooks<R: FailureReporter>(
    spec: &RuntimeSpec,
    phase: Phase,
    container_id: &str,
    bundle: &Path,
    reporter: R,
) -> Result<(), PhaseError> {
    // No hooks section at all: nothing to do
    let Some(hooks) = &spec.hooks else {
        return Ok(());
    };

    PhaseRunner::new(container_id, bundle)
        .with_reporter(reporter)
        .run(phase, hooks.for_phase(phase))
}

/// Run the pre-start hooks
pub fn pre_start_hooks(
    spec: &RuntimeSpec,
    container_id: &str,
    bundle: &Path,
) -> Result<(), PhaseError> {
    run_phase_hooks(spec, Phase::PreStart, container_id, bundle, TracingReporter)
}

/// Run the post-start hooks
pub fn post_start_hooks(
    spec: &RuntimeSpec,
    container_id: &str,
    bundle: &Path,
) -> Result<(), PhaseError> {
    run_phase_hooks(spec, Phase::PostStart, container_id, bundle, TracingReporter)
}

/// Run the post-stop hooks
pub fn post_stop_hooks(
    spec: &RuntimeSpec,
    container_id: &str,
    bundle: &Path,
) -> Result<(), PhaseError> {
    run_phase_hooks(spec, Phase::PostStop, container_id, bundle, TracingReporter)
}
