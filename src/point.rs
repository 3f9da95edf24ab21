//! Mass points: the nodes of the rope.

use crate::float::Float;
use crate::vec::Vec3;

/// A rope node with explicit velocity and a position history.
///
/// `prev_position` holds the position at the start of the current sub-step,
/// so velocity can be rebuilt from the net displacement after the
/// constraints have moved the point.
#[derive(Clone, Debug, PartialEq)]
pub struct MassPoint<F: Float> {
    pub position: Vec3<F>,
    pub prev_position: Vec3<F>,
    pub velocity: Vec3<F>,
    pub inv_mass: F,
    pub pinned: bool,
}

impl<F: Float> MassPoint<F> {
    /// Free point at rest with the given inverse mass (clamped to `>= 0`).
    pub fn new(position: Vec3<F>, inv_mass: F) -> Self {
        MassPoint {
            position,
            prev_position: position,
            velocity: Vec3::zero(),
            inv_mass: inv_mass.max(F::zero()),
            pinned: false,
        }
    }

    /// Free point from a mass. Non-positive mass yields an immovable point.
    pub fn with_mass(position: Vec3<F>, mass: F) -> Self {
        let inv_mass = if mass > F::zero() { F::one() / mass } else { F::zero() };
        Self::new(position, inv_mass)
    }

    /// Pinned point. The stored inverse mass is kept so the point can be
    /// released later with `unpin`.
    pub fn anchored(position: Vec3<F>, inv_mass: F) -> Self {
        let mut p = Self::new(position, inv_mass);
        p.pinned = true;
        p
    }

    /// Inverse mass seen by integration and every constraint: zero when pinned.
    pub fn effective_inv_mass(&self) -> F {
        if self.pinned { F::zero() } else { self.inv_mass }
    }

    /// Inertial position step. Gravity is not applied here.
    pub fn integrate_position(&mut self, dt: F) {
        if dt <= F::zero() || self.pinned {
            return;
        }
        self.prev_position = self.position;
        self.position += self.velocity.scale(dt);
    }

    /// Rebuild velocity from the sub-step's net displacement, then add the
    /// gravity impulse on the vertical axis. `dt` must be positive.
    pub fn reconstruct_velocity(&mut self, dt: F, gravity: F) {
        self.velocity = (self.position - self.prev_position).scale(F::one() / dt);
        self.velocity.z = self.velocity.z + gravity * dt;
    }

    /// Shrink the speed toward zero without ever reversing direction.
    pub fn damp_velocity(&mut self, damping: F, dt: F) {
        let speed = self.velocity.length();
        if speed <= F::zero() {
            return;
        }
        let dir = self.velocity.scale(F::one() / speed);
        let dv = -speed * F::one().min(damping * dt * self.effective_inv_mass());
        self.velocity += dir.scale(dv);
    }

    /// Teleport without introducing velocity on the next reconstruction.
    pub fn set_position(&mut self, position: Vec3<F>) {
        self.position = position;
        self.prev_position = position;
    }

    pub fn pin(&mut self) {
        self.pinned = true;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }
}
