//! The physics simulator collaborator trait.

use nalgebra::Matrix4;
use replay_types::{DeltaAction, Observation, SceneDescription, SimState};

use crate::error::Result;

/// The boundary between the replay pipeline and a live physics simulation.
///
/// Implementations own the full simulation state. The pipeline drives one
/// simulator sequentially and is its only writer; nothing here is expected
/// to be thread-safe.
///
/// `forward` recomputes kinematics for the currently loaded state without
/// integrating time; it must be called after `load_state` before poses are
/// read. `step` advances the simulation by one control sub-step under the
/// given delta command.
pub trait Simulator {
    /// Rebuild the simulated scene from a recorded scene description and
    /// reset all state.
    fn reset_from_scene(&mut self, scene: &SceneDescription) -> Result<()>;

    /// Load a flattened state snapshot into the live simulation.
    fn load_state(&mut self, state: &SimState) -> Result<()>;

    /// Flatten the current live state into an opaque snapshot.
    fn flatten_state(&self) -> SimState;

    /// Recompute kinematics for the loaded state. No time integration.
    fn forward(&mut self) -> Result<()>;

    /// Advance one control sub-step under a relative end-effector command.
    fn step(&mut self, command: &DeltaAction) -> Result<()>;

    /// Read the current observation, including a rendered image.
    fn observe(&mut self) -> Result<Observation>;

    /// The current end-effector pose as a 4x4 homogeneous transform.
    fn eef_transform(&self) -> Result<Matrix4<f64>>;
}
