//! Position-based rope simulation.
//!
//! `tether` models a rope as a chain of mass points joined by distance
//! constraints and advances it once per frame with a sub-stepped
//! Position-Based Dynamics (PBD) or Extended PBD (XPBD) solver.
//!
//! # Features
//!
//! - **Two solvers**: stiffness-based PBD and compliance-based XPBD with a
//!   per-sub-step Lagrange multiplier
//! - **Gauss-Seidel projection**: each correction is visible to the next
//!   constraint in the same sweep
//! - **Velocity damping**: global per-point damping plus relative damping
//!   along each segment
//! - **External anchors**: pin any point to a host-driven position
//! - **Observable**: monitor sub-steps and sweeps via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`
//!
//! # Example
//! ```
//! use tether::{NoOpStepObserver, RopeConfig, RopeSimulator};
//!
//! let mut rope: RopeSimulator<f32> = RopeSimulator::new(
//!     RopeConfig::new().with_point_count(8).with_damping(2.0, 1.0),
//! ).unwrap();
//! for _ in 0..60 {
//!     rope.step(1.0 / 60.0, &mut NoOpStepObserver);
//! }
//! assert_eq!(rope.point(0).position.z, 0.0);
//! assert!(rope.point(7).position.z < 0.0);
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod float;
pub mod vec;
pub mod point;
pub mod constraint;
pub mod schedule;
pub mod simulator;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use point::MassPoint;
pub use constraint::{ConstraintModel, DistanceConstraint, SolverKind};
pub use schedule::IterationSchedule;
pub use simulator::RopeSimulator;
pub use config::RopeConfig;
pub use observer::{LogObserver, NoOpStepObserver, StepObserver};
pub use error::RopeError;
