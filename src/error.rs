//! Error types for curve construction and collection operations.
//!
//! Distance computations never return these: following the input-rejection
//! contract, they emit a warning and yield a NaN-valued result instead. The
//! variants below cover the places where an operation can refuse its input
//! outright, such as adding a curve of the wrong dimension to a collection.

use thiserror::Error;

/// Errors raised by curve constructors and collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The dimensions of the operands do not agree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimension required by the receiver.
        expected: usize,
        /// Dimension of the rejected operand.
        got: usize,
    },

    /// An empty point sequence where a non-empty one is required.
    #[error("empty point sequence")]
    Empty,
}
