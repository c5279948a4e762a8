//! Error types for replay operations.

use thiserror::Error;

/// Errors that can occur while building or validating replay data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// A homogeneous transform could not be converted into a pose.
    #[error("invalid transform: {reason}")]
    InvalidTransform {
        /// Description of what's wrong with the transform.
        reason: String,
    },

    /// A flattened state vector has the wrong dimension.
    #[error("state dimension mismatch: expected {expected}, got {actual}")]
    StateDimMismatch {
        /// Expected flattened length.
        expected: usize,
        /// Actual flattened length.
        actual: usize,
    },

    /// Per-step sequences of an episode disagree on the step count.
    #[error(
        "episode length mismatch: {states} states, {grippers} gripper commands, \
         {joint_velocities} joint velocity rows"
    )]
    EpisodeLengthMismatch {
        /// Number of recorded simulation states.
        states: usize,
        /// Number of recorded gripper commands.
        grippers: usize,
        /// Number of recorded joint velocity rows.
        joint_velocities: usize,
    },

    /// An episode retains too few waypoints to replay.
    #[error("episode too short to replay: {steps} step(s) retained")]
    EpisodeTooShort {
        /// Number of retained steps.
        steps: usize,
    },

    /// A replayed sequence is longer than the packaging target.
    #[error("sequence length {length} exceeds target length {target_length}")]
    SequenceTooLong {
        /// Replayed sequence length.
        length: usize,
        /// Packaging target length.
        target_length: usize,
    },

    /// A packaged buffer disagrees with the declared sequence length.
    #[error("{field} length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Name of the offending buffer.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Invalid replay configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl ReplayError {
    /// Create an invalid transform error.
    #[must_use]
    pub fn invalid_transform(reason: impl Into<String>) -> Self {
        Self::InvalidTransform {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a buffer length mismatch error.
    #[must_use]
    pub const fn length_mismatch(field: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            field,
            expected,
            actual,
        }
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}
