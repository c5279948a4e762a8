//! Waypoint replay controller.

use nalgebra::UnitQuaternion;
use replay_resample::{Aggregator, FixedFreqSubsampler};
use replay_sim::{probe_pose, Simulator};
use replay_types::{
    DeltaAction, Episode, Frame, Pose, ReplayConfig, ReplayError, SceneDescription, SimState,
    SubstepOrientationPolicy,
};
use tracing::debug;

use crate::error::Result;

/// The accumulated output of replaying one episode.
#[derive(Debug, Clone)]
pub struct ReplayedEpisode {
    /// Per-waypoint frames; frame `i` is the observation seen prior to the
    /// action targeting waypoint `i`.
    pub frames: Vec<Frame>,
    /// Delta actions, one fewer than frames: the first waypoint only seeds
    /// the initial observation.
    pub actions: Vec<DeltaAction>,
    /// The retained waypoint states (replay targets), aligned with frames.
    pub waypoint_states: Vec<SimState>,
    /// Aggregated joint velocities, aligned with frames.
    pub joint_velocities: Vec<nalgebra::DVector<f64>>,
    /// End-effector orientation at the first waypoint. Unused for control,
    /// retained for diagnostics.
    pub initial_orientation: UnitQuaternion<f64>,
    /// Scene description to persist alongside the packaged sequence.
    pub scene: SceneDescription,
}

/// Per-episode result of the replay controller.
#[derive(Debug, Clone)]
pub enum ReplayOutcome {
    /// The episode was replayed.
    Replayed(ReplayedEpisode),
    /// The episode retained more waypoints than the packaging target allows.
    /// A policy outcome, not an error; the caller moves on to the next
    /// episode.
    SkippedTooLong {
        /// Retained waypoint count.
        length: usize,
        /// Configured target length.
        target_length: usize,
    },
}

/// Replays episodes waypoint-by-waypoint against a live simulator.
///
/// Per episode: subsample the recorded sequences, then for each retained
/// waypoint probe the pose the recorded state would produce, compute the
/// relative motion from the live pose, and replay it over a fixed number of
/// sub-steps.
///
/// # Example
///
/// ```
/// use replay_pipeline::WaypointReplayer;
/// use replay_types::ReplayConfig;
///
/// let replayer = WaypointReplayer::new(ReplayConfig::with_skip(1)).unwrap();
/// assert_eq!(replayer.config().n_skip, 1);
/// ```
#[derive(Debug, Clone)]
pub struct WaypointReplayer {
    config: ReplayConfig,
}

impl WaypointReplayer {
    /// Create a replayer, validating the configuration up front, before
    /// any simulation work begins.
    pub fn new(config: ReplayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Replay one episode.
    ///
    /// Returns [`ReplayOutcome::SkippedTooLong`] when the retained waypoint
    /// count exceeds the configured target length. Simulation faults abort
    /// the episode as errors.
    pub fn replay<S: Simulator>(&self, sim: &mut S, episode: &Episode) -> Result<ReplayOutcome> {
        episode.validate()?;

        let subsampler = FixedFreqSubsampler::new(self.config.n_skip);
        let (states, _) = subsampler.decimate(&episode.states);
        let (grippers, _) = subsampler.decimate(&episode.gripper_commands);
        let (joint_velocities, _) = subsampler
            .with_aggregator(Aggregator::Sum)
            .subsample_aggregated(&episode.joint_velocities)?;

        let retained = states.len();
        if retained < 2 {
            return Err(ReplayError::EpisodeTooShort { steps: retained }.into());
        }
        if let Some(target_length) = self.config.target_length {
            if retained > target_length {
                return Ok(ReplayOutcome::SkippedTooLong {
                    length: retained,
                    target_length,
                });
            }
        }

        // Init: rebuild the scene, seed the first waypoint, take the
        // initial observation.
        sim.reset_from_scene(&episode.scene)?;
        sim.load_state(&states[0])?;
        sim.forward()?;

        let mut frames = Vec::with_capacity(retained);
        frames.push(sim.observe()?.image.flipped_vertical());
        let initial_orientation = live_pose(sim)?.rotation;

        let waypoints = &states[1..];
        let n_waypoints = self
            .config
            .max_waypoints
            .map_or(waypoints.len(), |limit| limit.min(waypoints.len()));
        debug!(retained, n_waypoints, "replaying episode");

        let mut actions = Vec::with_capacity(n_waypoints);
        for (i, waypoint) in waypoints.iter().take(n_waypoints).enumerate() {
            // Pre-action observation: the post-sub-step view of the previous
            // waypoint. The view after the final waypoint is not captured,
            // keeping one frame per retained waypoint.
            frames.push(sim.observe()?.image.flipped_vertical());

            let current_pose = live_pose(sim)?;
            let live_state = sim.flatten_state();
            let desired_pose = probe_pose(sim, waypoint, &live_state)?;

            let (dpos, dquat) = Pose::relative_to(&desired_pose, &current_pose);
            debug!(
                waypoint = i,
                dpos = %dpos.norm(),
                dquat_angle = %dquat.angle(),
                "replaying delta action"
            );

            let gripper = grippers[i].clone();
            actions.push(DeltaAction::new(dpos, dquat, gripper.clone()));
            self.substep(sim, dpos, dquat, gripper)?;
        }

        let kept = n_waypoints + 1;
        Ok(ReplayOutcome::Replayed(ReplayedEpisode {
            frames,
            actions,
            waypoint_states: states[..kept].to_vec(),
            joint_velocities: joint_velocities[..kept].to_vec(),
            initial_orientation,
            scene: episode.scene.clone(),
        }))
    }

    /// Issue the sub-step commands for one waypoint's delta action.
    fn substep<S: Simulator>(
        &self,
        sim: &mut S,
        dpos: nalgebra::Vector3<f64>,
        dquat: UnitQuaternion<f64>,
        gripper: nalgebra::DVector<f64>,
    ) -> Result<()> {
        let n = self.config.n_substeps;
        let sub_dpos = dpos / n as f64;
        let sub_dquat = match self.config.substep_orientation {
            SubstepOrientationPolicy::Identity => UnitQuaternion::identity(),
            // The constant increment slerp(identity, dquat, 1/n): the n
            // sub-steps compose to exactly dquat.
            SubstepOrientationPolicy::Slerp => {
                UnitQuaternion::from_scaled_axis(dquat.scaled_axis() / n as f64)
            }
        };

        let command = DeltaAction::new(sub_dpos, sub_dquat, gripper);
        for _ in 0..n {
            sim.step(&command)?;
        }
        Ok(())
    }
}

fn live_pose<S: Simulator>(sim: &mut S) -> Result<Pose> {
    let transform = sim.eef_transform()?;
    Ok(Pose::from_homogeneous(&transform)?)
}
