//! Error types for resampling operations.

use thiserror::Error;

/// Errors that can occur during subsampling or aggregation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// Aggregation was requested but no aggregator is configured.
    #[error("aggregation requested but no aggregator configured")]
    MissingAggregator,

    /// The input sequence is empty.
    #[error("cannot aggregate an empty sequence")]
    EmptyInput,

    /// The boundary list is malformed.
    #[error("invalid boundaries: {reason}")]
    InvalidBoundaries {
        /// Description of the problem.
        reason: String,
    },

    /// Rows of a summed sequence disagree on their dimension.
    #[error("row dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the first row.
        expected: usize,
        /// Dimension of the offending row.
        actual: usize,
    },

    /// A quaternion row does not have exactly four components.
    #[error("invalid quaternion row: expected 4 components, got {len}")]
    InvalidQuaternion {
        /// Length of the offending row.
        len: usize,
    },
}

impl ResampleError {
    /// Create an invalid boundaries error.
    #[must_use]
    pub fn invalid_boundaries(reason: impl Into<String>) -> Self {
        Self::InvalidBoundaries {
            reason: reason.into(),
        }
    }
}

/// Result type for resampling operations.
pub type Result<T> = std::result::Result<T, ResampleError>;
