//! Error types for vector and matrix operations
//!
//! Every shape, index or degenerate-value precondition of the public API is
//! reported through [`AlgebraError`]. Elimination never fails on a missing
//! pivot; that is a normal outcome and is only logged.

use thiserror::Error;

/// Errors raised when an operation's preconditions do not hold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    /// Operands have incompatible shapes
    #[error("Dimension mismatch in {op}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Name of the operation that rejected its operands
        op: &'static str,
        expected: String,
        found: String,
    },

    /// A row, column or element index lies outside `[0, extent)`
    #[error("{axis} index {index} out of range for extent {extent}")]
    IndexOutOfRange {
        axis: &'static str,
        index: usize,
        extent: usize,
    },

    /// Division by zero, row scaling by zero, normalizing a zero vector,
    /// or a row operation that references the same row twice
    #[error("Degenerate operation: {0}")]
    DegenerateOperation(&'static str),

    /// A vector or matrix was requested with a zero extent
    #[error("Empty dimension: {0} must be at least 1")]
    EmptyDimension(&'static str),
}

impl AlgebraError {
    /// Create a dimension mismatch error from any displayable shapes
    pub fn mismatch(
        op: &'static str,
        expected: impl std::fmt::Display,
        found: impl std::fmt::Display,
    ) -> Self {
        AlgebraError::DimensionMismatch {
            op,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn row_index(index: usize, extent: usize) -> Self {
        AlgebraError::IndexOutOfRange {
            axis: "Row",
            index,
            extent,
        }
    }

    pub fn col_index(index: usize, extent: usize) -> Self {
        AlgebraError::IndexOutOfRange {
            axis: "Column",
            index,
            extent,
        }
    }

    pub fn element_index(index: usize, extent: usize) -> Self {
        AlgebraError::IndexOutOfRange {
            axis: "Element",
            index,
            extent,
        }
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, AlgebraError>;
