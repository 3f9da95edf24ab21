//! Sub-stepped PBD/XPBD rope simulator.

use crate::config::RopeConfig;
use crate::constraint::DistanceConstraint;
use crate::error::RopeError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::point::MassPoint;
use crate::schedule::IterationSchedule;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// A rope: a chain of mass points joined by one distance constraint per
/// consecutive pair.
///
/// The point array is allocated once and never resized, so the index
/// pairs held by the constraints stay valid for the rope's lifetime.
pub struct RopeSimulator<F: Float> {
    points: AllocVec<MassPoint<F>>,
    constraints: AllocVec<DistanceConstraint<F>>,
    config: RopeConfig<F>,
}

impl<F: Float> RopeSimulator<F> {
    /// Build the rope described by `config`.
    ///
    /// Points are laid out from `config.origin` along `+x`, spaced by the
    /// rest length, all at rest. Point 0 is pinned.
    pub fn new(config: RopeConfig<F>) -> Result<Self, RopeError> {
        config.validate()?;

        let count = config.point_count;
        let inv_mass = F::one() / config.mass;
        let spacing = config.rest_length.max(F::zero());

        let mut points = AllocVec::with_capacity(count);
        for i in 0..count {
            let offset = Vec3::new(spacing * F::from_usize(i), F::zero(), F::zero());
            let pos = config.origin + offset;
            if i == 0 {
                points.push(MassPoint::anchored(pos, inv_mass));
            } else {
                points.push(MassPoint::new(pos, inv_mass));
            }
        }

        let parameter = config.solver_parameter();
        let mut constraints = AllocVec::with_capacity(count.saturating_sub(1));
        for i in 0..count.saturating_sub(1) {
            constraints.push(DistanceConstraint::with_kind(
                config.solver,
                i, i + 1,
                config.rest_length,
                parameter,
            ));
        }

        log::debug!(
            "built {} rope: {} points, {} constraints ({})",
            config.solver.label(),
            points.len(),
            constraints.len(),
            config,
        );

        Ok(RopeSimulator { points, constraints, config })
    }

    /// Tear down and rebuild from a new config. On error the current rope
    /// is left untouched.
    pub fn configure(&mut self, config: RopeConfig<F>) -> Result<(), RopeError> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Advance one frame with the configured sub-step count and schedule.
    pub fn step<O: StepObserver>(&mut self, elapsed: F, observer: &mut O) {
        let sub_steps = self.config.sub_steps;
        let schedule = self.config.schedule;
        self.advance(elapsed, sub_steps, schedule, observer);
    }

    /// Split `elapsed` into `sub_steps` equal slices and run one pass per
    /// slice, with the sweep count for slice `i` taken from `schedule`.
    pub fn advance<O: StepObserver>(
        &mut self,
        elapsed: F,
        sub_steps: usize,
        schedule: IterationSchedule,
        observer: &mut O,
    ) {
        if sub_steps == 0 || elapsed <= F::zero() || !elapsed.is_finite() {
            log::trace!("skipping frame: elapsed {}, sub_steps {}", elapsed, sub_steps);
            return;
        }

        log::trace!(
            "advancing {} over {} sub-steps, {} sweeps",
            elapsed,
            sub_steps,
            schedule.total_sweeps(sub_steps),
        );

        let dt = elapsed / F::from_usize(sub_steps);
        for i in 0..sub_steps {
            self.pass(i, dt, schedule.sweeps(i), observer);
        }

        observer.on_step_complete();
    }

    /// One integration pass of size `dt` with `iterations` sweeps.
    /// `dt` must be positive.
    pub fn substep<O: StepObserver>(&mut self, dt: F, iterations: usize, observer: &mut O) {
        self.pass(0, dt, iterations, observer);
    }

    fn pass<O: StepObserver>(&mut self, substep: usize, dt: F, iterations: usize, observer: &mut O) {
        for p in self.points.iter_mut() {
            p.integrate_position(dt);
        }
        observer.on_integrate(substep);

        for c in self.constraints.iter_mut() {
            c.reset_accumulator();
        }

        for sweep in 0..iterations {
            for c in self.constraints.iter_mut() {
                c.solve_position(&mut self.points, dt);
            }
            observer.on_constraint_sweep(substep, sweep);
        }

        let gravity = -self.config.gravity;
        for p in self.points.iter_mut() {
            p.reconstruct_velocity(dt, gravity);
        }

        let global_damping = self.config.global_damping;
        for p in self.points.iter_mut() {
            p.damp_velocity(global_damping, dt);
        }

        let edge_damping = self.config.edge_damping;
        for c in self.constraints.iter() {
            c.damp_relative_velocity(&mut self.points, dt, edge_damping);
        }

        observer.on_substep_complete(substep);
    }

    /// Pin point `index` and place it at `position` with no velocity
    /// carried into the next reconstruction. Used to make an endpoint
    /// follow something the host owns.
    pub fn set_external_anchor(&mut self, index: usize, position: Vec3<F>) -> Result<(), RopeError> {
        let count = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(RopeError::PointOutOfBounds { index, count })?;
        point.set_position(position);
        point.pin();
        Ok(())
    }

    /// `set_external_anchor` on the last point.
    pub fn anchor_end(&mut self, position: Vec3<F>) -> Result<(), RopeError> {
        let index = self.points.len().saturating_sub(1);
        self.set_external_anchor(index, position)
    }

    /// Release a pinned point so it moves with the rope again.
    pub fn release(&mut self, index: usize) -> Result<(), RopeError> {
        let count = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(RopeError::PointOutOfBounds { index, count })?;
        point.unpin();
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: F) {
        self.config.gravity = gravity;
    }

    pub fn set_damping(&mut self, global: F, edge: F) {
        self.config.global_damping = global;
        self.config.edge_damping = edge;
    }

    pub fn config(&self) -> &RopeConfig<F> {
        &self.config
    }

    pub fn points(&self) -> &[MassPoint<F>] {
        &self.points
    }

    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Use `points().get(index)` for a
    /// checked lookup.
    pub fn point(&self, index: usize) -> &MassPoint<F> {
        &self.points[index]
    }

    pub fn constraints(&self) -> &[DistanceConstraint<F>] {
        &self.constraints
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Endpoint positions of every constraint, in rope order.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3<F>, Vec3<F>)> + '_ {
        self.constraints.iter().map(move |c| c.endpoints(&self.points))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
