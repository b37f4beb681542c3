//! Step observer trait for monitoring simulation progress.

/// Hooks called at each phase of a fixed step.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after all free particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each relaxation sweep.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after pending cuts were applied, with the number of constraints
    /// they deactivated.
    fn on_cut(&mut self, _deactivated: usize) {}

    /// Called when a fixed step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Emits a `tracing` event per phase at trace level.
#[derive(Debug, Default)]
pub struct TracingObserver {
    steps: u64,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed steps completed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl StepObserver for TracingObserver {
    fn on_integrate(&mut self) {
        tracing::trace!(step = self.steps, "integrated particles");
    }

    fn on_constraint_iteration(&mut self, iteration: usize) {
        tracing::trace!(step = self.steps, iteration, "relaxation sweep");
    }

    fn on_cut(&mut self, deactivated: usize) {
        if deactivated > 0 {
            tracing::trace!(step = self.steps, deactivated, "cut constraints");
        }
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}
