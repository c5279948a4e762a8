//! Minimal reference simulator backend.

use nalgebra::{DVector, Point3, Quaternion, UnitQuaternion};
use replay_types::{
    DeltaAction, Frame, Observation, Pose, ReplayError, SceneDescription, SimState,
};

use crate::error::{Result, SimulationError};
use crate::simulator::Simulator;

/// Flattened length of the pose part of a state: position + quaternion.
const POSE_DIM: usize = 7;

/// A free-floating end effector whose flattened state *is* its pose.
///
/// State layout: `[px, py, pz, qw, qx, qy, qz, gripper…]`. Delta commands
/// integrate directly into the pose, rendering produces a small
/// deterministic gradient image keyed on position.
///
/// This backend exists so the pipeline can be exercised end-to-end (tests,
/// examples, the CLI) without a physics engine. Real engines implement
/// [`Simulator`] out of tree.
///
/// Kinematic discipline is enforced the way heavier engines require it:
/// after `load_state`, poses are unreadable until `forward` recomputes them.
#[derive(Debug, Clone)]
pub struct PointMassSimulator {
    pose: Pose,
    gripper: DVector<f64>,
    gripper_dim: usize,
    scene: Option<SceneDescription>,
    width: u32,
    height: u32,
    kinematics_fresh: bool,
}

impl PointMassSimulator {
    /// Create a simulator rendering `width` x `height` frames, with a
    /// single-value gripper.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pose: Pose::identity(),
            gripper: DVector::zeros(1),
            gripper_dim: 1,
            scene: None,
            width,
            height,
            kinematics_fresh: true,
        }
    }

    /// Set the gripper command width.
    #[must_use]
    pub fn with_gripper_dim(mut self, gripper_dim: usize) -> Self {
        self.gripper_dim = gripper_dim;
        self.gripper = DVector::zeros(gripper_dim);
        self
    }

    /// Flattened state length this simulator expects.
    #[must_use]
    pub const fn state_dim(&self) -> usize {
        POSE_DIM + self.gripper_dim
    }

    /// The current end-effector pose.
    #[must_use]
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Build a flattened state for a pose and gripper command.
    ///
    /// Useful for constructing synthetic episodes against this backend.
    #[must_use]
    pub fn state_from_pose(pose: &Pose, gripper: &DVector<f64>) -> SimState {
        let q = pose.rotation.quaternion();
        let mut values = Vec::with_capacity(POSE_DIM + gripper.len());
        values.extend_from_slice(pose.position.coords.as_slice());
        values.extend_from_slice(&[q.w, q.i, q.j, q.k]);
        values.extend_from_slice(gripper.as_slice());
        SimState::from_vec(values)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&self) -> Frame {
        let (w, h) = (self.width as usize, self.height as usize);
        let base = [
            channel(self.pose.position.x),
            channel(self.pose.position.y),
            channel(self.pose.position.z),
        ];
        let mut pixels = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                pixels.push(base[0].wrapping_add((x * 3) as u8));
                pixels.push(base[1].wrapping_add((y * 3) as u8));
                pixels.push(base[2]);
            }
        }
        Frame {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Map a coordinate onto a color channel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(v: f64) -> u8 {
    (v * 64.0).rem_euclid(256.0) as u8
}

impl Simulator for PointMassSimulator {
    fn reset_from_scene(&mut self, scene: &SceneDescription) -> Result<()> {
        self.scene = Some(scene.clone());
        self.pose = Pose::identity();
        self.gripper = DVector::zeros(self.gripper_dim);
        self.kinematics_fresh = true;
        Ok(())
    }

    fn load_state(&mut self, state: &SimState) -> Result<()> {
        if state.len() != self.state_dim() {
            return Err(ReplayError::StateDimMismatch {
                expected: self.state_dim(),
                actual: state.len(),
            }
            .into());
        }
        if !state.is_finite() {
            return Err(SimulationError::fault("non-finite value in state"));
        }

        let v = state.as_slice();
        let quat = Quaternion::new(v[3], v[4], v[5], v[6]);
        if quat.norm() < 1e-12 {
            return Err(SimulationError::fault("zero-norm quaternion in state"));
        }

        self.pose = Pose::from_position_rotation(
            Point3::new(v[0], v[1], v[2]),
            UnitQuaternion::new_normalize(quat),
        );
        self.gripper = DVector::from_column_slice(&v[POSE_DIM..]);
        // Loaded state is raw; kinematics must be recomputed before reads.
        self.kinematics_fresh = false;
        Ok(())
    }

    fn flatten_state(&self) -> SimState {
        Self::state_from_pose(&self.pose, &self.gripper)
    }

    fn forward(&mut self) -> Result<()> {
        self.kinematics_fresh = true;
        Ok(())
    }

    fn step(&mut self, command: &DeltaAction) -> Result<()> {
        if self.scene.is_none() {
            return Err(SimulationError::MissingScene);
        }
        if command.gripper.len() != self.gripper_dim {
            return Err(SimulationError::fault(format!(
                "gripper command width {} does not match simulator width {}",
                command.gripper.len(),
                self.gripper_dim
            )));
        }

        self.pose.position += command.dpos;
        self.pose.rotation = command.dquat * self.pose.rotation;
        self.gripper = command.gripper.clone();
        self.kinematics_fresh = true;
        Ok(())
    }

    fn observe(&mut self) -> Result<Observation> {
        if self.scene.is_none() {
            return Err(SimulationError::MissingScene);
        }
        Ok(Observation::new(self.render()))
    }

    fn eef_transform(&self) -> Result<nalgebra::Matrix4<f64>> {
        if !self.kinematics_fresh {
            return Err(SimulationError::KinematicsStale);
        }
        Ok(self.pose.to_homogeneous())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::FRAC_PI_2;

    fn reset(sim: &mut PointMassSimulator) {
        sim.reset_from_scene(&SceneDescription::new("<scene/>")).unwrap();
    }

    #[test]
    fn state_round_trip() {
        let mut sim = PointMassSimulator::new(4, 4);
        reset(&mut sim);

        let state = SimState::from_vec(vec![1.0, -2.0, 0.5, 1.0, 0.0, 0.0, 0.0, 0.75]);
        sim.load_state(&state).unwrap();
        sim.forward().unwrap();

        assert_eq!(sim.flatten_state(), state);
    }

    #[test]
    fn load_rejects_wrong_dimension() {
        let mut sim = PointMassSimulator::new(4, 4);
        let err = sim.load_state(&SimState::from_vec(vec![0.0; 5])).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Types(ReplayError::StateDimMismatch { expected: 8, actual: 5 })
        ));
    }

    #[test]
    fn load_rejects_non_finite_and_degenerate_states() {
        let mut sim = PointMassSimulator::new(4, 4);

        let nan = SimState::from_vec(vec![f64::NAN; 8]);
        assert!(matches!(
            sim.load_state(&nan),
            Err(SimulationError::Fault { .. })
        ));

        let zero_quat = SimState::from_vec(vec![0.0; 8]);
        assert!(matches!(
            sim.load_state(&zero_quat),
            Err(SimulationError::Fault { .. })
        ));
    }

    #[test]
    fn pose_reads_require_forward_after_load() {
        let mut sim = PointMassSimulator::new(4, 4);
        reset(&mut sim);

        sim.load_state(&SimState::from_vec(vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]))
            .unwrap();
        assert!(matches!(
            sim.eef_transform(),
            Err(SimulationError::KinematicsStale)
        ));

        sim.forward().unwrap();
        assert!(sim.eef_transform().is_ok());
    }

    #[test]
    fn step_integrates_delta_command() {
        let mut sim = PointMassSimulator::new(4, 4);
        reset(&mut sim);

        let dquat = UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2);
        let command = DeltaAction::new(
            Vector3::new(0.1, 0.0, 0.0),
            dquat,
            DVector::from_vec(vec![1.0]),
        );
        sim.step(&command).unwrap();

        assert_relative_eq!(sim.pose().position.x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(sim.pose().rotation.angle_to(&dquat), 0.0, epsilon = 1e-12);

        // Two more quarter turns end up at three quarters.
        sim.step(&command).unwrap();
        sim.step(&command).unwrap();
        assert_relative_eq!(sim.pose().rotation.angle(), FRAC_PI_2, epsilon = 1e-10);
    }

    #[test]
    fn step_requires_scene() {
        let mut sim = PointMassSimulator::new(4, 4);
        let command = DeltaAction::hold(DVector::zeros(1));
        assert!(matches!(sim.step(&command), Err(SimulationError::MissingScene)));
    }

    #[test]
    fn observe_renders_position_keyed_frame() {
        let mut sim = PointMassSimulator::new(4, 4);
        reset(&mut sim);

        let at_origin = sim.observe().unwrap().image;
        sim.step(&DeltaAction::new(
            Vector3::new(1.0, 0.0, 0.0),
            UnitQuaternion::identity(),
            DVector::zeros(1),
        ))
        .unwrap();
        let moved = sim.observe().unwrap().image;

        assert_eq!(at_origin.pixels.len(), 4 * 4 * 3);
        assert_ne!(at_origin.pixels, moved.pixels);
    }

    #[test]
    fn gripper_width_is_enforced() {
        let mut sim = PointMassSimulator::new(4, 4).with_gripper_dim(2);
        reset(&mut sim);
        assert_eq!(sim.state_dim(), 9);

        let narrow = DeltaAction::hold(DVector::zeros(1));
        assert!(matches!(sim.step(&narrow), Err(SimulationError::Fault { .. })));
    }
}
