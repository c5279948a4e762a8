//! Dataset generation orchestration.

use replay_sim::Simulator;
use tracing::{info, warn};

use crate::encoder::FrameEncoder;
use crate::error::Result;
use crate::packager::package_sequence;
use crate::replayer::{ReplayOutcome, WaypointReplayer};
use crate::sink::SequenceSink;
use crate::source::DemonstrationSource;

/// Counters for one dataset generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Episodes replayed and written.
    pub episodes_written: usize,
    /// Episodes skipped by the length filter.
    pub episodes_skipped: usize,
    /// Waypoints replayed across written episodes.
    pub waypoints_replayed: usize,
    /// GIF encodings that failed (sequence records kept).
    pub encode_failures: usize,
}

/// Process every episode of `source` through subsample → replay → package →
/// persist, sequentially.
///
/// One episode is fully processed before the next begins; the simulator is
/// the single shared mutable resource and this loop is its only writer.
/// Over-length episodes are counted and skipped (policy, not error);
/// simulation faults abort the run. A failing frame encoder is logged and
/// counted; the already-written sequence record for that episode stays
/// intact.
pub fn generate_dataset<S: Simulator>(
    sim: &mut S,
    source: &dyn DemonstrationSource,
    sink: &mut dyn SequenceSink,
    mut encoder: Option<&mut dyn FrameEncoder>,
    replayer: &WaypointReplayer,
) -> Result<RunStats> {
    let keys = source.episode_keys()?;
    info!(episodes = keys.len(), "generating dataset");

    let mut stats = RunStats::default();
    for key in &keys {
        let episode = source.load_episode(key)?;

        match replayer.replay(sim, &episode)? {
            ReplayOutcome::SkippedTooLong {
                length,
                target_length,
            } => {
                warn!(key, length, target_length, "episode over target length, skipping");
                stats.episodes_skipped += 1;
            }
            ReplayOutcome::Replayed(replayed) => {
                let target_length = replayer
                    .config()
                    .target_length
                    .unwrap_or(replayed.frames.len());
                let sequence = package_sequence(&replayed, target_length)?;
                sink.write_sequence(key, &sequence, &replayed.scene)?;

                if let Some(enc) = encoder.as_deref_mut() {
                    if let Err(err) = enc.encode(key, &sequence.images) {
                        warn!(key, %err, "frame encoding failed, keeping sequence record");
                        stats.encode_failures += 1;
                    }
                }

                info!(key, steps = sequence.original_length, "episode written");
                stats.waypoints_replayed += sequence.original_length;
                stats.episodes_written += 1;
            }
        }
    }

    info!(
        written = stats.episodes_written,
        skipped = stats.episodes_skipped,
        "dataset generation finished"
    );
    Ok(stats)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::sink::MemorySink;
    use crate::source::InMemorySource;
    use nalgebra::{DVector, Point3, UnitQuaternion};
    use replay_sim::PointMassSimulator;
    use replay_types::{Episode, Frame, Pose, ReplayConfig, SceneDescription};

    fn episode(n_steps: usize) -> Episode {
        let states = (0..n_steps)
            .map(|i| {
                let pose = Pose::from_position_rotation(
                    Point3::new(0.01 * i as f64, 0.0, 1.0),
                    UnitQuaternion::identity(),
                );
                PointMassSimulator::state_from_pose(&pose, &DVector::zeros(1))
            })
            .collect();
        Episode::new(
            states,
            vec![DVector::zeros(1); n_steps],
            vec![DVector::zeros(7); n_steps],
            SceneDescription::new("<scene/>"),
        )
    }

    struct CountingEncoder {
        calls: Vec<String>,
        fail: bool,
    }

    impl FrameEncoder for CountingEncoder {
        fn encode(&mut self, key: &str, _frames: &[Frame]) -> Result<()> {
            self.calls.push(key.to_owned());
            if self.fail {
                Err(PipelineError::Encoder {
                    command: "mock".into(),
                    status: 1,
                    stderr: "mock failure".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn run_writes_and_skips_by_policy() {
        let mut source = InMemorySource::new();
        source.insert("long", episode(12));
        source.insert("short_a", episode(6));
        source.insert("short_b", episode(8));

        let mut sim = PointMassSimulator::new(4, 4);
        let mut sink = MemorySink::new();
        let replayer =
            WaypointReplayer::new(ReplayConfig::default().target_length(10)).unwrap();

        let stats =
            generate_dataset(&mut sim, &source, &mut sink, None, &replayer).unwrap();

        assert_eq!(stats.episodes_written, 2);
        assert_eq!(stats.episodes_skipped, 1);
        assert_eq!(stats.waypoints_replayed, 6 + 8);
        assert_eq!(sink.len(), 2);
        // Stable key order, skipped episode absent.
        assert_eq!(sink.sequences[0].0, "short_a");
        assert_eq!(sink.sequences[1].0, "short_b");
    }

    #[test]
    fn encoder_runs_per_written_episode() {
        let mut source = InMemorySource::new();
        source.insert("a", episode(5));
        source.insert("b", episode(5));

        let mut sim = PointMassSimulator::new(4, 4);
        let mut sink = MemorySink::new();
        let mut encoder = CountingEncoder {
            calls: Vec::new(),
            fail: false,
        };
        let replayer = WaypointReplayer::new(ReplayConfig::default()).unwrap();

        let stats = generate_dataset(
            &mut sim,
            &source,
            &mut sink,
            Some(&mut encoder),
            &replayer,
        )
        .unwrap();

        assert_eq!(stats.encode_failures, 0);
        assert_eq!(encoder.calls, vec!["a", "b"]);
    }

    #[test]
    fn encoder_failure_keeps_sequence_records() {
        let mut source = InMemorySource::new();
        source.insert("a", episode(5));

        let mut sim = PointMassSimulator::new(4, 4);
        let mut sink = MemorySink::new();
        let mut encoder = CountingEncoder {
            calls: Vec::new(),
            fail: true,
        };
        let replayer = WaypointReplayer::new(ReplayConfig::default()).unwrap();

        let stats = generate_dataset(
            &mut sim,
            &source,
            &mut sink,
            Some(&mut encoder),
            &replayer,
        )
        .unwrap();

        assert_eq!(stats.episodes_written, 1);
        assert_eq!(stats.encode_failures, 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn without_target_length_sequences_are_unpadded() {
        let mut source = InMemorySource::new();
        source.insert("a", episode(5));

        let mut sim = PointMassSimulator::new(4, 4);
        let mut sink = MemorySink::new();
        let replayer = WaypointReplayer::new(ReplayConfig::default()).unwrap();

        generate_dataset(&mut sim, &source, &mut sink, None, &replayer).unwrap();

        let (_, sequence) = &sink.sequences[0];
        assert!(sequence.is_full());
        assert_eq!(sequence.pad_mask.len(), 5);
    }
}
