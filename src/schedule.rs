//! How many Gauss-Seidel sweeps each sub-step of a frame gets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sweep count per sub-step.
///
/// `Ramp` gives sub-step `i` exactly `i` sweeps, so the first sub-step of
/// every frame projects nothing and the last projects `sub_steps - 1`
/// times. `Fixed(n)` gives every sub-step `n` sweeps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IterationSchedule {
    #[default]
    Ramp,
    Fixed(usize),
}

impl IterationSchedule {
    pub fn sweeps(self, substep: usize) -> usize {
        match self {
            IterationSchedule::Ramp => substep,
            IterationSchedule::Fixed(n) => n,
        }
    }

    /// Total sweeps over a frame of `sub_steps` sub-steps.
    pub fn total_sweeps(self, sub_steps: usize) -> usize {
        (0..sub_steps).map(|i| self.sweeps(i)).sum()
    }
}
