//! Error types for rope construction and host calls.

use core::fmt;

/// Errors returned at the host boundary. The solver itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum RopeError {
    /// A rope needs at least one point.
    InvalidPointCount,
    /// Mass must be positive and finite.
    InvalidMass,
    /// Point index is out of bounds.
    PointOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for RopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RopeError::InvalidPointCount => write!(f, "rope needs at least one point"),
            RopeError::InvalidMass => write!(f, "mass must be positive and finite"),
            RopeError::PointOutOfBounds { index, count } => {
                write!(f, "point index {} out of bounds (count: {})", index, count)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RopeError {}
