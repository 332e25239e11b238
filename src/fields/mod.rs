//! Electrostatic field evaluation, superposition and normalization.

mod electrostatic;
mod normalize;

pub use electrostatic::{
    electric_field_at, superpose, FieldMap, PointCharge, SingularityPolicy, SINGULARITY_RADIUS,
};
pub use normalize::{normalize, NormalizedField};

use crate::math::Scalar;

/// Errors raised while sampling or normalizing a field.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Raised when a grid axis has unusable bounds or resolution.
    #[error("invalid {axis} axis: {reason}")]
    InvalidAxis {
        /// Axis name (`"x"` or `"y"`).
        axis: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// Raised when a charge carries a non-finite value.
    #[error("charge #{index} is invalid: {reason}")]
    InvalidCharge {
        /// Position of the charge in the input list.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Raised when an evaluation point has a non-finite coordinate.
    #[error("evaluation point ({x}, {y}) is not finite")]
    InvalidPoint {
        /// Evaluation x coordinate.
        x: Scalar,
        /// Evaluation y coordinate.
        y: Scalar,
    },
    /// Raised when an evaluation point coincides with a charge.
    #[error("field is singular at ({x}, {y}) (cell {row},{col}): coincides with charge #{charge}")]
    Singular {
        /// Index of the coinciding charge.
        charge: usize,
        /// Grid row, or 0 for single-point evaluation.
        row: usize,
        /// Grid column, or 0 for single-point evaluation.
        col: usize,
        /// Evaluation x coordinate.
        x: Scalar,
        /// Evaluation y coordinate.
        y: Scalar,
    },
    /// Raised when the superposed field vanishes and has no direction.
    #[error("field vanishes at cell {row},{col}; direction is undefined")]
    ZeroField {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
    },
}
