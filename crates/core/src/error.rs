//! # Error Types
//!
//! Composition is only defined between operands of the same dimension.
//! A mismatch is not a numeric accident: it means two vectors from
//! different spaces were wired together, so the operation is undefined.

use thiserror::Error;

/// Errors raised while composing two vectors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Operand dimensions differ at a composition boundary.
    #[error("Dimension mismatch in {op}: left has {left}, right has {right}")]
    DimensionMismatch {
        op: String,
        left: usize,
        right: usize,
    },

    /// A matrix operator received a vector that is not a flattened square matrix.
    #[error("{op} needs a flattened square matrix, got dimension {dim}")]
    NotSquare { op: String, dim: usize },
}
