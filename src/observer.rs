//! Step observer trait for monitoring solver progress.

/// Hooks called by the simulator as a frame advances.
///
/// All methods default to no-ops; implement only what you need
/// (debug overlays, profiling, tests that count sweeps).
pub trait StepObserver {
    /// Called after every point has been integrated for `substep`.
    fn on_integrate(&mut self, _substep: usize) {}

    /// Called after each Gauss-Seidel sweep over all constraints.
    fn on_constraint_sweep(&mut self, _substep: usize, _sweep: usize) {}

    /// Called once velocities are rebuilt and damped for `substep`.
    fn on_substep_complete(&mut self, _substep: usize) {}

    /// Called when a whole frame has been advanced.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards every hook to the `log` facade at trace level.
#[derive(Default)]
pub struct LogObserver {
    sweeps: usize,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sweeps seen since the last completed frame.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }
}

impl StepObserver for LogObserver {
    fn on_integrate(&mut self, substep: usize) {
        log::trace!("substep {}: integrated", substep);
    }

    fn on_constraint_sweep(&mut self, substep: usize, sweep: usize) {
        self.sweeps += 1;
        log::trace!("substep {}: sweep {}", substep, sweep);
    }

    fn on_substep_complete(&mut self, substep: usize) {
        log::trace!("substep {}: velocities updated", substep);
    }

    fn on_step_complete(&mut self) {
        log::trace!("frame complete after {} sweeps", self.sweeps);
        self.sweeps = 0;
    }
}
