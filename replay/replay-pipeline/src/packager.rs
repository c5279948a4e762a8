//! Fixed-length sequence packaging.

use replay_types::{pad_mask, PackagedSequence, ReplayError};

use crate::replayer::ReplayedEpisode;

/// Package a replayed episode into a fixed-length training sequence.
///
/// `original_length` is the replayed waypoint count (the number of frames).
/// The data buffers are stored as the valid prefix and are **not**
/// auto-padded; the padding mask is the authority on validity. Divergence
/// between the buffers and the declared lengths is an error, never a silent
/// truncation.
///
/// # Errors
///
/// - [`ReplayError::SequenceTooLong`] when the episode outgrew the target
///   (the replay controller normally filters this earlier).
/// - [`ReplayError::LengthMismatch`] when any buffer disagrees with the
///   waypoint count.
pub fn package_sequence(
    replayed: &ReplayedEpisode,
    target_length: usize,
) -> Result<PackagedSequence, ReplayError> {
    let original_length = replayed.frames.len();
    if original_length > target_length {
        return Err(ReplayError::SequenceTooLong {
            length: original_length,
            target_length,
        });
    }

    let expected_actions = original_length.saturating_sub(1);
    if replayed.actions.len() != expected_actions {
        return Err(ReplayError::length_mismatch(
            "actions",
            expected_actions,
            replayed.actions.len(),
        ));
    }
    if replayed.waypoint_states.len() != original_length {
        return Err(ReplayError::length_mismatch(
            "waypoint states",
            original_length,
            replayed.waypoint_states.len(),
        ));
    }
    if replayed.joint_velocities.len() != original_length {
        return Err(ReplayError::length_mismatch(
            "joint velocities",
            original_length,
            replayed.joint_velocities.len(),
        ));
    }

    Ok(PackagedSequence {
        images: replayed.frames.clone(),
        actions: replayed
            .actions
            .iter()
            .map(replay_types::DeltaAction::flatten)
            .collect(),
        states: replayed.waypoint_states.clone(),
        pad_mask: pad_mask(original_length, target_length),
        joint_velocities: replayed.joint_velocities.clone(),
        original_length,
        target_length,
    })
}
