//! Distance constraints between consecutive rope points, solved with
//! either PBD (stiffness) or XPBD (compliance + Lagrange multiplier).

use crate::float::Float;
use crate::point::MassPoint;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which solver a rope's constraints use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverKind {
    #[default]
    Pbd,
    Xpbd,
}

impl SolverKind {
    pub fn label(self) -> &'static str {
        match self {
            SolverKind::Pbd => "PBD",
            SolverKind::Xpbd => "XPBD",
        }
    }
}

/// Solver-specific state of a distance constraint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConstraintModel<F: Float> {
    /// Fraction of the violation removed per projection, in [0, 1].
    Pbd { stiffness: F },
    /// Inverse rigidity and the multiplier accumulated within one sub-step.
    Xpbd { compliance: F, lambda: F },
}

/// Keeps two points `rest_length` apart.
///
/// Endpoints are indices into the point slice handed to each call; the
/// slice must not be reordered while the constraint exists.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    a: usize,
    b: usize,
    rest_length: F,
    model: ConstraintModel<F>,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn pbd(a: usize, b: usize, rest_length: F, stiffness: F) -> Self {
        DistanceConstraint {
            a,
            b,
            rest_length: rest_length.max(F::zero()),
            model: ConstraintModel::Pbd { stiffness: stiffness.clamp(F::zero(), F::one()) },
        }
    }

    pub fn xpbd(a: usize, b: usize, rest_length: F, compliance: F) -> Self {
        DistanceConstraint {
            a,
            b,
            rest_length: rest_length.max(F::zero()),
            model: ConstraintModel::Xpbd { compliance: compliance.max(F::zero()), lambda: F::zero() },
        }
    }

    /// Build with the variant picked by `kind`; `parameter` is the stiffness
    /// for PBD and the compliance for XPBD.
    pub fn with_kind(kind: SolverKind, a: usize, b: usize, rest_length: F, parameter: F) -> Self {
        match kind {
            SolverKind::Pbd => Self::pbd(a, b, rest_length, parameter),
            SolverKind::Xpbd => Self::xpbd(a, b, rest_length, parameter),
        }
    }

    pub fn a(&self) -> usize { self.a }
    pub fn b(&self) -> usize { self.b }
    pub fn rest_length(&self) -> F { self.rest_length }
    pub fn model(&self) -> &ConstraintModel<F> { &self.model }

    pub fn kind(&self) -> SolverKind {
        match self.model {
            ConstraintModel::Pbd { .. } => SolverKind::Pbd,
            ConstraintModel::Xpbd { .. } => SolverKind::Xpbd,
        }
    }

    /// Accumulated multiplier, `None` for PBD.
    pub fn lambda(&self) -> Option<F> {
        match self.model {
            ConstraintModel::Pbd { .. } => None,
            ConstraintModel::Xpbd { lambda, .. } => Some(lambda),
        }
    }

    /// Current endpoint positions, for drawing.
    pub fn endpoints(&self, points: &[MassPoint<F>]) -> (Vec3<F>, Vec3<F>) {
        (points[self.a].position, points[self.b].position)
    }

    /// Start-of-sub-step reset. Only XPBD carries state across projections.
    pub fn reset_accumulator(&mut self) {
        if let ConstraintModel::Xpbd { lambda, .. } = &mut self.model {
            *lambda = F::zero();
        }
    }

    /// Project both endpoints toward the rest length. Writes land in
    /// `points` immediately so later constraints in the sweep see them.
    pub fn solve_position(&mut self, points: &mut [MassPoint<F>], dt: F) {
        let w_a = points[self.a].effective_inv_mass();
        let w_b = points[self.b].effective_inv_mass();
        let w_total = w_a + w_b;
        if w_total <= F::zero() {
            return; // both pinned
        }

        let delta = points[self.b].position - points[self.a].position;
        let dist = delta.length();
        if dist <= F::zero() {
            return; // coincident, no direction
        }

        let violation = dist - self.rest_length;
        let correction = match &mut self.model {
            ConstraintModel::Pbd { stiffness } => {
                delta.scale(violation / (dist * w_total) * *stiffness)
            }
            ConstraintModel::Xpbd { compliance, lambda } => {
                let alpha = *compliance / (dt * dt);
                let d_lambda = (violation - alpha * *lambda) / (w_total + alpha);
                *lambda = *lambda + d_lambda;
                delta.scale(d_lambda / dist)
            }
        };

        points[self.a].position += correction.scale(w_a);
        points[self.b].position -= correction.scale(w_b);
    }

    /// Even out the endpoints' velocities along the edge. Each side closes
    /// at most half the gap per call.
    pub fn damp_relative_velocity(&self, points: &mut [MassPoint<F>], dt: F, damping: F) {
        let delta = points[self.b].position - points[self.a].position;
        let dist = delta.length();
        if dist <= F::zero() {
            return;
        }

        let n = delta.scale(F::one() / dist);
        let v_a = n.dot(points[self.a].velocity);
        let v_b = n.dot(points[self.b].velocity);
        let dv_a = (v_b - v_a) * F::half().min(damping * dt * points[self.a].effective_inv_mass());
        let dv_b = (v_a - v_b) * F::half().min(damping * dt * points[self.b].effective_inv_mass());

        points[self.a].velocity += n.scale(dv_a);
        points[self.b].velocity += n.scale(dv_b);
    }
}
