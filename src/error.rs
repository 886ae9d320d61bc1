//! Error types for relationship evaluation.
//!
//! Errors here are contract violations: mismatched reference frames,
//! malformed temporal values, or predicate/kind combinations that have no
//! implementation. Legitimate non-evaluability (empty static operand,
//! time-disjoint operands) is *not* an error; it surfaces as `Ok(None)`
//! from the evaluator.

use crate::point::SpatialKind;
use thiserror::Error;

/// Errors raised by `trajrel` operations.
#[derive(Debug, Error)]
pub enum RelError {
    /// The two operands carry different spatial reference identifiers.
    #[error("SRID mismatch: {0} vs {1}")]
    SridMismatch(i32, i32),

    /// The two operands have different coordinate dimensionality.
    #[error("dimensionality mismatch: {0}D vs {1}D")]
    DimensionalityMismatch(u8, u8),

    /// The relation has no implementation for the operands' spatial kind.
    #[error("{relation} is not defined for {kind} operands")]
    UnsupportedKind {
        relation: &'static str,
        kind: SpatialKind,
    },

    /// A temporal value violates its structural invariants.
    #[error("invalid temporal value: {0}")]
    InvalidTemporal(String),

    /// Malformed caller input (bad distance, bad DE-9IM pattern, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, RelError>;
