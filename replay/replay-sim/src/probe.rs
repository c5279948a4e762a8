//! Kinematic probing of recorded states.

use replay_types::{Pose, SimState};
use tracing::error;

use crate::error::{Result, SimulationError};
use crate::simulator::Simulator;

/// Read the end-effector pose that `candidate` would produce, then restore
/// `restore` into the simulation.
///
/// This is the only place the pipeline loads a hypothetical state without
/// committing to it. The restore runs unconditionally, after a successful
/// read and after every probe failure, so callers can rely on the
/// simulation being left exactly as captured in `restore`. When the probe
/// itself failed, the probe error is surfaced; when the *restore* failed the
/// live state is corrupt and [`SimulationError::RestoreFailed`] takes
/// precedence over everything else.
pub fn probe_pose<S: Simulator + ?Sized>(
    sim: &mut S,
    candidate: &SimState,
    restore: &SimState,
) -> Result<Pose> {
    let probed = load_and_read(sim, candidate);

    if let Err(restore_err) = sim.load_state(restore).and_then(|()| sim.forward()) {
        error!(%restore_err, "state restore failed after kinematic probe");
        return Err(SimulationError::restore_failed(restore_err.to_string()));
    }

    probed
}

fn load_and_read<S: Simulator + ?Sized>(sim: &mut S, candidate: &SimState) -> Result<Pose> {
    sim.load_state(candidate)?;
    sim.forward()?;
    let transform = sim.eef_transform()?;
    Ok(Pose::from_homogeneous(&transform)?)
}
