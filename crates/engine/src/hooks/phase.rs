//! Phase runner
//!
//! Runs the hooks of one lifecycle phase in order and stops at the first
//! failure. The failure is handed to a [`FailureReporter`] before it is
//! returned, so where it gets logged stays the caller's choice.

use super::executor;
use super::state::LifecycleState;
use shimhook_core::{HookDescriptor, Phase, PhaseError};
use std::path::Path;
use std::time::Instant;

/// Receiver of phase failure records
pub trait FailureReporter {
    /// Record the failure of a phase
    fn report(&self, failure: &PhaseError);
}

/// Implement FailureReporter for closures
impl<F> FailureReporter for F
where
    F: Fn(&PhaseError),
{
    fn report(&self, failure: &PhaseError) {
        self(failure);
    }
}

/// Reports failures as `tracing` error events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, failure: &PhaseError) {
        tracing::error!(
            hook_type = %failure.phase,
            hook_index = failure.index,
            hook_path = %failure.path,
            error = %failure.source,
            "hook error"
        );
    }
}

/// Sequential hook runner for one container
///
/// At most one hook runs at a time. A fresh [`LifecycleState`] is built for
/// every hook.
pub struct PhaseRunner<'a, R = TracingReporter>
where
    R: FailureReporter,
{
    container_id: &'a str,
    bundle: &'a Path,
    reporter: R,
}

impl<'a> PhaseRunner<'a, TracingReporter> {
    /// Create a runner that reports failures through `tracing`
    pub fn new(container_id: &'a str, bundle: &'a Path) -> Self {
        Self {
            container_id,
            bundle,
            reporter: TracingReporter,
        }
    }
}

impl<'a, R> PhaseRunner<'a, R>
where
    R: FailureReporter,
{
    /// Replace the failure reporter
    #[must_use]
    pub fn with_reporter<R2: FailureReporter>(self, reporter: R2) -> PhaseRunner<'a, R2> {
        PhaseRunner {
            container_id: self.container_id,
            bundle: self.bundle,
            reporter,
        }
    }

    /// Run `hooks` for `phase`, in order
    ///
    /// Returns the first failure; hooks after it are not started. An empty
    /// list succeeds without spawning anything.
    #[tracing::instrument(skip(self, hooks), fields(phase = %phase, container_id = %self.container_id, hook_count = hooks.len()))]
    pub fn run(&self, phase: Phase, hooks: &[HookDescriptor]) -> Result<(), PhaseError> {
        if hooks.is_empty() {
            tracing::debug!("No hooks defined for phase");
            return Ok(());
        }

        for (index, hook) in hooks.iter().enumerate() {
            let state = LifecycleState::current(self.container_id, self.bundle);
            let start = Instant::now();

            if let Err(source) = executor::invoke(hook, &state) {
                let failure = PhaseError {
                    phase,
                    index,
                    path: hook.path.clone(),
                    source,
                };
                self.reporter.report(&failure);
                return Err(failure);
            }

            tracing::debug!(
                hook_index = index,
                elapsed_ms = start.elapsed().as_millis(),
                "Hook completed successfully"
            );
        }

        Ok(())
    }
}
