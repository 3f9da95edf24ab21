//! Rope parameters and their human-readable export.

use core::fmt;

use crate::constraint::SolverKind;
use crate::error::RopeError;
use crate::float::Float;
use crate::schedule::IterationSchedule;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything a host sets to build and drive a rope.
///
/// # Builder Pattern
/// ```
/// use tether::{RopeConfig, SolverKind};
///
/// let config: RopeConfig<f32> = RopeConfig::new()
///     .with_point_count(20)
///     .with_rest_length(0.5)
///     .with_solver(SolverKind::Xpbd)
///     .with_compliance(1e-5)
///     .with_damping(2.0, 1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RopeConfig<F: Float> {
    /// Number of mass points. Point 0 is the fixed anchor. Default: 14.
    pub point_count: usize,
    /// Rest length of every segment, also the initial spacing. Default: 1.0.
    pub rest_length: F,
    /// Mass of each point. Default: 1.0.
    pub mass: F,
    /// Gravity magnitude, pulling toward `-z`. Default: 19.6.
    pub gravity: F,
    /// Per-point velocity damping coefficient. Default: 0.0.
    pub global_damping: F,
    /// Relative velocity damping along each segment. Default: 0.0.
    pub edge_damping: F,
    /// Constraint solver. Default: PBD.
    pub solver: SolverKind,
    /// PBD stiffness in [0, 1]. Default: 1.0.
    pub stiffness: F,
    /// XPBD compliance, `>= 0`. Default: 1e-4.
    pub compliance: F,
    /// Sub-steps per frame. Default: 10.
    pub sub_steps: usize,
    /// Sweeps per sub-step. Default: ramp.
    pub schedule: IterationSchedule,
    /// Position of point 0; the rope is laid out along `+x`. Default: zero.
    pub origin: Vec3<F>,
}

impl<F: Float> RopeConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        RopeConfig {
            point_count: 14,
            rest_length: F::one(),
            mass: F::one(),
            gravity: F::from_f32(9.8 * 2.0),
            global_damping: F::zero(),
            edge_damping: F::zero(),
            solver: SolverKind::Pbd,
            stiffness: F::one(),
            compliance: F::from_f32(1e-4),
            sub_steps: 10,
            schedule: IterationSchedule::Ramp,
            origin: Vec3::zero(),
        }
    }

    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    pub fn with_rest_length(mut self, rest_length: F) -> Self {
        self.rest_length = rest_length;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set global and edge damping coefficients.
    pub fn with_damping(mut self, global: F, edge: F) -> Self {
        self.global_damping = global;
        self.edge_damping = edge;
        self
    }

    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_compliance(mut self, compliance: F) -> Self {
        self.compliance = compliance;
        self
    }

    /// Set the number of sub-steps (at least 1).
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    pub fn with_schedule(mut self, schedule: IterationSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_origin(mut self, origin: Vec3<F>) -> Self {
        self.origin = origin;
        self
    }

    /// Stiffness or compliance, whichever the selected solver reads.
    pub fn solver_parameter(&self) -> F {
        match self.solver {
            SolverKind::Pbd => self.stiffness,
            SolverKind::Xpbd => self.compliance,
        }
    }

    /// Reject configurations that cannot produce a rope.
    pub fn validate(&self) -> Result<(), RopeError> {
        if self.point_count == 0 {
            return Err(RopeError::InvalidPointCount);
        }
        if !(self.mass > F::zero() && self.mass.is_finite()) {
            return Err(RopeError::InvalidMass);
        }
        Ok(())
    }
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line parameter dump, for pasting into notes or bug reports.
impl<F: Float> fmt::Display for RopeConfig<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sub_steps[{}], global_damping[{:.2}], edge_damping[{:.2}], point_count[{}], \
             gravity[{:.2}], rest_length[{:.2}], stiffness[{:.2}], compliance[{:.2}], \
             mass[{:.2}], solver[{}]",
            self.sub_steps,
            self.global_damping,
            self.edge_damping,
            self.point_count,
            self.gravity,
            self.rest_length,
            self.stiffness,
            self.compliance,
            self.mass,
            self.solver.label(),
        )
    }
}
