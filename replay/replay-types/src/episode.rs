//! Recorded demonstration episodes.

use nalgebra::DVector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ReplayError;
use crate::state::{SceneDescription, SimState};

/// One recorded demonstration trajectory.
///
/// An episode is read once per pipeline iteration and never mutated. All
/// per-step sequences share the same length (the episode's step count)
/// before subsampling; [`Episode::validate`] enforces this.
///
/// # Example
///
/// ```
/// use replay_types::{Episode, SceneDescription, SimState};
/// use nalgebra::DVector;
///
/// let episode = Episode::new(
///     vec![SimState::from_vec(vec![0.0; 7]); 3],
///     vec![DVector::from_vec(vec![0.0]); 3],
///     vec![DVector::from_vec(vec![0.0; 7]); 3],
///     SceneDescription::new("<mujoco/>"),
/// );
/// assert_eq!(episode.len(), 3);
/// assert!(episode.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Episode {
    /// Ordered full-frequency simulation states.
    pub states: Vec<SimState>,
    /// Ordered per-step gripper commands.
    pub gripper_commands: Vec<DVector<f64>>,
    /// Ordered per-step joint velocities.
    pub joint_velocities: Vec<DVector<f64>>,
    /// Scene description used to reconstruct the simulation.
    pub scene: SceneDescription,
}

impl Episode {
    /// Create an episode from its per-step sequences.
    #[must_use]
    pub fn new(
        states: Vec<SimState>,
        gripper_commands: Vec<DVector<f64>>,
        joint_velocities: Vec<DVector<f64>>,
        scene: SceneDescription,
    ) -> Self {
        Self {
            states,
            gripper_commands,
            joint_velocities,
            scene,
        }
    }

    /// The episode's step count (length of the state sequence).
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the episode holds no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Validate the shared-length invariant across all per-step sequences.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::EpisodeLengthMismatch`] when the sequences
    /// disagree on the step count.
    pub fn validate(&self) -> Result<(), ReplayError> {
        let states = self.states.len();
        let grippers = self.gripper_commands.len();
        let joint_velocities = self.joint_velocities.len();

        if states != grippers || states != joint_velocities {
            return Err(ReplayError::EpisodeLengthMismatch {
                states,
                grippers,
                joint_velocities,
            });
        }
        Ok(())
    }
}
