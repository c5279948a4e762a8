//! Waypoint replay retargeting pipeline.
//!
//! Converts recorded robot-manipulation demonstrations into down-sampled,
//! fixed-length training sequences whose per-step actions are re-derived so
//! that replaying them reproduces the original waypoints:
//!
//! - [`WaypointReplayer`] - per-episode replay controller
//! - [`package_sequence`] - fixed-length packaging with padding mask
//! - [`DemonstrationSource`] / [`SequenceSink`] - persistence boundaries
//! - [`FrameEncoder`] / [`GifEncoder`] - animation encoding collaborator
//! - [`LengthSummary`] - episode length statistics
//! - [`generate_dataset`] - the sequential orchestration loop
//!
//! # Data Flow
//!
//! raw episode → subsample (+ aggregation) → waypoint replay (kinematic
//! probe + pose algebra, driving the simulator) → per-step frames/actions →
//! packaged sequence → sink.
//!
//! Execution is single-threaded and sequential: one episode is fully
//! processed before the next begins. The simulator is the single shared
//! mutable resource; see `replay-sim` for the probing discipline.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::module_name_repetitions
)]

mod encoder;
mod error;
mod packager;
mod replayer;
mod run;
mod sink;
mod source;
mod summary;

pub use encoder::{FrameEncoder, GifEncoder};
pub use error::{PipelineError, Result};
pub use packager::package_sequence;
pub use replayer::{ReplayOutcome, ReplayedEpisode, WaypointReplayer};
pub use run::{generate_dataset, RunStats};
pub use sink::{JsonDirectorySink, MemorySink, SequenceSink};
pub use source::{write_episode, DemonstrationSource, InMemorySource, JsonDirectorySource};
pub use summary::{LengthBin, LengthSummary};
