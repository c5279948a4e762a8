//! Relative end-effector motion commands.

use nalgebra::{DVector, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The command needed to move the end effector from one pose to another
/// over one logical step.
///
/// A delta action is computed per retained waypoint and consumed in equal
/// fractions across the replay sub-steps. The orientation delta is a
/// world-frame left factor: applying the action to orientation `q` targets
/// `dquat * q`.
///
/// # Example
///
/// ```
/// use replay_types::DeltaAction;
/// use nalgebra::{DVector, UnitQuaternion, Vector3};
///
/// let action = DeltaAction::new(
///     Vector3::new(0.1, 0.0, 0.0),
///     UnitQuaternion::identity(),
///     DVector::from_vec(vec![1.0]),
/// );
/// assert_eq!(action.flatten().len(), 3 + 4 + 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeltaAction {
    /// Position delta in world coordinates.
    pub dpos: Vector3<f64>,
    /// Orientation delta as a unit quaternion (world-frame left factor).
    pub dquat: UnitQuaternion<f64>,
    /// Gripper command, repeated verbatim across sub-steps.
    pub gripper: DVector<f64>,
}

impl DeltaAction {
    /// Create a delta action.
    #[must_use]
    pub fn new(
        dpos: Vector3<f64>,
        dquat: UnitQuaternion<f64>,
        gripper: DVector<f64>,
    ) -> Self {
        Self {
            dpos,
            dquat,
            gripper,
        }
    }

    /// Create a zero-motion action with the given gripper command.
    #[must_use]
    pub fn hold(gripper: DVector<f64>) -> Self {
        Self {
            dpos: Vector3::zeros(),
            dquat: UnitQuaternion::identity(),
            gripper,
        }
    }

    /// Flatten into the persisted row `[dpos, dquat (wxyz), gripper]`.
    #[must_use]
    pub fn flatten(&self) -> DVector<f64> {
        let q = self.dquat.quaternion();
        let mut row = Vec::with_capacity(3 + 4 + self.gripper.len());
        row.extend_from_slice(self.dpos.as_slice());
        row.extend_from_slice(&[q.w, q.i, q.j, q.k]);
        row.extend_from_slice(self.gripper.as_slice());
        DVector::from_vec(row)
    }

    /// Check that the action contains no `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.dpos.iter().all(|x| x.is_finite())
            && self.dquat.coords.iter().all(|x| x.is_finite())
            && self.gripper.iter().all(|x| x.is_finite())
    }
}
