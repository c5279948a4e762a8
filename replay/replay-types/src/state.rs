//! Opaque simulation state snapshots and scene descriptions.

use nalgebra::DVector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An opaque, flattened snapshot of the full physics configuration.
///
/// The pipeline never interprets the contents; it only moves snapshots
/// between the recorded demonstration and the live simulator. The layout is
/// whatever the simulator's flatten/load pair agrees on.
///
/// # Example
///
/// ```
/// use replay_types::SimState;
///
/// let state = SimState::from_vec(vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
/// assert_eq!(state.len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimState(DVector<f64>);

impl SimState {
    /// Create a state from a flattened vector.
    #[must_use]
    pub fn new(flattened: DVector<f64>) -> Self {
        Self(flattened)
    }

    /// Create a state from a plain `Vec<f64>`.
    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self(DVector::from_vec(values))
    }

    /// Length of the flattened state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// View the flattened values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// Borrow the underlying vector.
    #[must_use]
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.0
    }

    /// Check that the snapshot contains no `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl From<DVector<f64>> for SimState {
    fn from(flattened: DVector<f64>) -> Self {
        Self(flattened)
    }
}

/// An opaque scene description used to reconstruct the simulated scene.
///
/// Typically a model XML blob. The pipeline treats it as a string to be
/// handed back to the simulator and persisted next to each packaged
/// sequence; it is never parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneDescription(String);

impl SceneDescription {
    /// Create a scene description from its textual form.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The textual form of the scene.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the description is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SceneDescription {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for SceneDescription {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}
