//! Replay configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// How the orientation delta is distributed across replay sub-steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubstepOrientationPolicy {
    /// Zero rotation per sub-step; only the final waypoint probe corrects
    /// orientation drift.
    Identity,
    /// Uniform interpolation: every sub-step issues the constant increment
    /// `slerp(identity, dquat, 1/n)`, so the `n` sub-steps compose to
    /// exactly `dquat`.
    #[default]
    Slerp,
}

impl SubstepOrientationPolicy {
    /// Returns the policy name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Slerp => "slerp",
        }
    }
}

impl std::fmt::Display for SubstepOrientationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for episode replay.
///
/// # Example
///
/// ```
/// use replay_types::ReplayConfig;
///
/// let config = ReplayConfig::with_skip(1).target_length(11);
/// assert_eq!(config.n_substeps, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReplayConfig {
    /// Number of full-frequency steps skipped between retained samples.
    /// Zero disables subsampling entirely.
    pub n_skip: usize,
    /// Number of simulation sub-steps used to replay one waypoint's delta
    /// action.
    pub n_substeps: usize,
    /// Orientation distribution across sub-steps.
    pub substep_orientation: SubstepOrientationPolicy,
    /// Episodes retaining more waypoints than this are skipped (policy, not
    /// error). `None` disables the filter and the padding mask.
    pub target_length: Option<usize>,
    /// Stop replay after this many waypoints. Debug aid; `None` replays the
    /// whole episode.
    pub max_waypoints: Option<usize>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            n_skip: 0,
            n_substeps: 10,
            substep_orientation: SubstepOrientationPolicy::default(),
            target_length: None,
            max_waypoints: None,
        }
    }
}

impl ReplayConfig {
    /// Create a configuration with the given skip factor.
    #[must_use]
    pub fn with_skip(n_skip: usize) -> Self {
        Self {
            n_skip,
            ..Default::default()
        }
    }

    /// Set the number of replay sub-steps.
    #[must_use]
    pub fn substeps(mut self, n_substeps: usize) -> Self {
        self.n_substeps = n_substeps;
        self
    }

    /// Set the sub-step orientation policy.
    #[must_use]
    pub fn orientation(mut self, policy: SubstepOrientationPolicy) -> Self {
        self.substep_orientation = policy;
        self
    }

    /// Set the packaging target length.
    #[must_use]
    pub fn target_length(mut self, target_length: usize) -> Self {
        self.target_length = Some(target_length);
        self
    }

    /// Limit replay to the first `max_waypoints` waypoints.
    #[must_use]
    pub fn max_waypoints(mut self, max_waypoints: usize) -> Self {
        self.max_waypoints = Some(max_waypoints);
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidConfig`] for a zero sub-step count or a
    /// zero target length.
    pub fn validate(&self) -> Result<(), ReplayError> {
        if self.n_substeps == 0 {
            return Err(ReplayError::invalid_config(
                "n_substeps must be at least 1",
            ));
        }
        if self.target_length == Some(0) {
            return Err(ReplayError::invalid_config(
                "target_length must be at least 1",
            ));
        }
        Ok(())
    }
}
