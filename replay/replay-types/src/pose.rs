//! End-effector pose and relative-pose algebra.

use nalgebra::{Isometry3, Matrix4, Point3, Rotation3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// Position and orientation of the end effector.
///
/// Poses are extracted from 4x4 homogeneous transforms at the simulator
/// boundary and carried as position + unit quaternion everywhere downstream;
/// raw transforms are never stored.
///
/// # Example
///
/// ```
/// use replay_types::Pose;
/// use nalgebra::Matrix4;
///
/// let pose = Pose::from_homogeneous(&Matrix4::identity()).unwrap();
/// assert!(pose.position.coords.norm() < 1e-12);
/// assert!(pose.rotation.angle() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Position in world coordinates.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Create an identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position only (identity rotation).
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position and rotation.
    #[must_use]
    pub const fn from_position_rotation(
        position: Point3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        Self { position, rotation }
    }

    /// Extract a pose from a 4x4 homogeneous transform.
    ///
    /// The translation is taken from the fourth column and the upper-left
    /// 3x3 block is re-orthonormalized into a unit quaternion, so slightly
    /// drifted rotation matrices are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidTransform`] if the transform contains
    /// non-finite values.
    pub fn from_homogeneous(transform: &Matrix4<f64>) -> Result<Self, ReplayError> {
        if !transform.iter().all(|x| x.is_finite()) {
            return Err(ReplayError::invalid_transform(
                "transform contains non-finite values",
            ));
        }

        let position = Point3::new(transform[(0, 3)], transform[(1, 3)], transform[(2, 3)]);
        let linear = transform.fixed_view::<3, 3>(0, 0).into_owned();
        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix(&linear));

        Ok(Self { position, rotation })
    }

    /// Convert to a 4x4 homogeneous transform.
    #[must_use]
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        self.to_isometry().to_homogeneous()
    }

    /// Convert to an isometry.
    #[must_use]
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(self.position.coords.into(), self.rotation)
    }

    /// Compute the relative motion from `current` to `desired`.
    ///
    /// Returns the translation `desired.position - current.position` and the
    /// world-frame orientation delta `desired.rotation * current.rotation⁻¹`,
    /// so that `dquat * current.rotation ≈ desired.rotation` up to the
    /// quaternion double-cover sign. `relative_to(p, p)` is zero translation
    /// and the identity rotation.
    #[must_use]
    pub fn relative_to(desired: &Self, current: &Self) -> (Vector3<f64>, UnitQuaternion<f64>) {
        let dpos = desired.position - current.position;
        let dquat = desired.rotation * current.rotation.inverse();
        (dpos, dquat)
    }

    /// Check that the pose contains no `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn from_homogeneous_identity() {
        let pose = Pose::from_homogeneous(&Matrix4::identity()).unwrap();
        assert_relative_eq!(pose.position.coords.norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(pose.rotation.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn from_homogeneous_extracts_translation_and_rotation() {
        let rotation = UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2);
        let source = Pose::from_position_rotation(Point3::new(1.0, 2.0, 3.0), rotation);

        let pose = Pose::from_homogeneous(&source.to_homogeneous()).unwrap();

        assert_relative_eq!(pose.position.x, 1.0, epsilon = 1e-10);
        assert_relative_eq!(pose.position.y, 2.0, epsilon = 1e-10);
        assert_relative_eq!(pose.position.z, 3.0, epsilon = 1e-10);
        assert_relative_eq!(pose.rotation.angle_to(&rotation), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn from_homogeneous_normalizes_scaled_rotation() {
        // Uniformly scaled rotation block still extracts a unit quaternion.
        let rotation = UnitQuaternion::from_euler_angles(0.3, -0.2, 0.5);
        let mut transform = Pose::from_position_rotation(Point3::origin(), rotation)
            .to_homogeneous();
        for r in 0..3 {
            for c in 0..3 {
                transform[(r, c)] *= 1.001;
            }
        }

        let pose = Pose::from_homogeneous(&transform).unwrap();
        assert_relative_eq!(pose.rotation.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(pose.rotation.angle_to(&rotation), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn from_homogeneous_rejects_non_finite() {
        let mut transform = Matrix4::identity();
        transform[(0, 0)] = f64::NAN;
        assert!(Pose::from_homogeneous(&transform).is_err());
    }

    #[test]
    fn relative_to_self_is_identity() {
        let pose = Pose::from_position_rotation(
            Point3::new(0.4, -1.2, 0.9),
            UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
        );

        let (dpos, dquat) = Pose::relative_to(&pose, &pose);
        assert_relative_eq!(dpos.norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(dquat.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn relative_to_recovers_desired_orientation() {
        let current = Pose::from_position_rotation(
            Point3::new(0.0, 0.0, 1.0),
            UnitQuaternion::from_euler_angles(0.1, -0.3, 0.7),
        );
        let desired = Pose::from_position_rotation(
            Point3::new(0.2, 0.1, 0.9),
            UnitQuaternion::from_euler_angles(-0.4, 0.2, 1.1),
        );

        let (dpos, dquat) = Pose::relative_to(&desired, &current);

        assert_relative_eq!(
            (current.position + dpos).coords,
            desired.position.coords,
            epsilon = 1e-12
        );
        let reached = dquat * current.rotation;
        assert_relative_eq!(reached.angle_to(&desired.rotation), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn homogeneous_round_trip() {
        let pose = Pose::from_position_rotation(
            Point3::new(-0.5, 0.25, 2.0),
            UnitQuaternion::from_euler_angles(0.9, 0.1, -0.6),
        );

        let back = Pose::from_homogeneous(&pose.to_homogeneous()).unwrap();
        assert_relative_eq!(back.position.coords, pose.position.coords, epsilon = 1e-10);
        assert_relative_eq!(back.rotation.angle_to(&pose.rotation), 0.0, epsilon = 1e-10);
    }
}
