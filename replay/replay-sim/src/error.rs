//! Error types for simulation operations.

use replay_types::ReplayError;
use thiserror::Error;

/// Errors that can occur while driving the simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// The simulation reported a fault (malformed state, bad command, …).
    #[error("simulation fault: {reason}")]
    Fault {
        /// Description of what went wrong.
        reason: String,
    },

    /// Restoring the caller's state after a kinematic probe failed.
    ///
    /// After this error the live simulation state must be considered
    /// corrupt; continuing the episode is unsound.
    #[error("state restore failed after probe: {reason}")]
    RestoreFailed {
        /// Description of the restore failure.
        reason: String,
    },

    /// A pose was read before kinematics were recomputed with `forward`.
    #[error("kinematics stale: forward() must run before reading poses")]
    KinematicsStale,

    /// The simulation was driven before a scene was loaded.
    #[error("no scene loaded: reset_from_scene() must run first")]
    MissingScene,

    /// A type-level validation failed (state dimension, transform, …).
    #[error(transparent)]
    Types(#[from] ReplayError),
}

impl SimulationError {
    /// Create a simulation fault error.
    #[must_use]
    pub fn fault(reason: impl Into<String>) -> Self {
        Self::Fault {
            reason: reason.into(),
        }
    }

    /// Create a restore failure error.
    #[must_use]
    pub fn restore_failed(reason: impl Into<String>) -> Self {
        Self::RestoreFailed {
            reason: reason.into(),
        }
    }

    /// Check if this error leaves the simulation state corrupt.
    #[must_use]
    pub fn is_state_corrupt(&self) -> bool {
        matches!(self, Self::RestoreFailed { .. })
    }
}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;
