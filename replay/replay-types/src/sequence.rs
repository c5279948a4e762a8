//! Fixed-length packaged training sequences.

use nalgebra::DVector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::state::SimState;

/// A fixed-length training sequence produced from one replayed episode.
///
/// The padding mask has `target_length` entries: `1.0` for indices below
/// `original_length` (real data), `0.0` for padding. The data buffers hold
/// the valid prefix and are not auto-padded; the mask is the authority on
/// validity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackagedSequence {
    /// Per-waypoint frames (valid prefix, `original_length` of them).
    pub images: Vec<Frame>,
    /// Flattened delta-action rows (`original_length - 1` of them).
    pub actions: Vec<DVector<f64>>,
    /// Retained waypoint states (`original_length` of them).
    pub states: Vec<SimState>,
    /// Padding mask of `target_length` entries.
    pub pad_mask: Vec<f64>,
    /// Aggregated joint velocities (`original_length` of them).
    pub joint_velocities: Vec<DVector<f64>>,
    /// Number of valid (non-padding) steps.
    pub original_length: usize,
    /// Uniform packaged length.
    pub target_length: usize,
}

impl PackagedSequence {
    /// Number of valid steps marked in the mask.
    #[must_use]
    pub fn valid_steps(&self) -> usize {
        self.pad_mask.iter().filter(|&&m| m > 0.5).count()
    }

    /// Whether the sequence needed no padding.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.original_length == self.target_length
    }
}

/// Build a padding mask of `target_length` entries with ones below
/// `original_length`.
///
/// ```
/// use replay_types::pad_mask;
///
/// assert_eq!(pad_mask(2, 4), vec![1.0, 1.0, 0.0, 0.0]);
/// ```
#[must_use]
pub fn pad_mask(original_length: usize, target_length: usize) -> Vec<f64> {
    (0..target_length)
        .map(|i| if i < original_length { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn pad_mask_marks_valid_prefix() {
        let mask = pad_mask(7, 10);
        assert_eq!(mask.len(), 10);
        assert_eq!(mask, vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn pad_mask_full_length_is_all_ones() {
        let mask = pad_mask(5, 5);
        assert!(mask.iter().all(|&m| m == 1.0));
    }

    #[test]
    fn valid_steps_counts_mask_ones() {
        let sequence = PackagedSequence {
            images: Vec::new(),
            actions: Vec::new(),
            states: Vec::new(),
            pad_mask: pad_mask(3, 5),
            joint_velocities: Vec::new(),
            original_length: 3,
            target_length: 5,
        };
        assert_eq!(sequence.valid_steps(), 3);
        assert!(!sequence.is_full());
    }
}
