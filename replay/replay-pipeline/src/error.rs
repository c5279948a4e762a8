//! Error types for the replay pipeline.

use replay_resample::ResampleError;
use replay_sim::SimulationError;
use replay_types::ReplayError;
use thiserror::Error;

/// Errors that can occur while generating a dataset.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Type-level validation failed (episode shape, packaging lengths, …).
    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// Subsampling or aggregation failed.
    #[error(transparent)]
    Resample(#[from] ResampleError),

    /// The simulation collaborator reported a failure.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// A requested episode is not present in the source.
    #[error("episode not found: {0}")]
    EpisodeNotFound(String),

    /// The external frame encoder exited with a failure.
    #[error("frame encoding failed (status {status}): {stderr}")]
    Encoder {
        /// The command line that was run.
        command: String,
        /// Process exit status, `-1` when killed by a signal.
        status: i32,
        /// Captured diagnostic output.
        stderr: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    /// Creates an IO error.
    #[must_use]
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization(reason.into())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
