//! Physics simulator boundary and kinematic probing.
//!
//! The replay pipeline drives a live, stateful physics simulation but never
//! implements one. This crate defines that boundary:
//!
//! - [`Simulator`] - the collaborator trait a physics engine implements
//! - [`probe_pose`] - the kinematic probe: read the end-effector pose a
//!   recorded state *would* produce, with guaranteed state restoration
//! - [`PointMassSimulator`] - a minimal reference backend whose flattened
//!   state is its end-effector pose, used by tests and the CLI
//!
//! # State Discipline
//!
//! The simulator is a single shared mutable resource. [`probe_pose`] is the
//! only place the pipeline loads a hypothetical state without committing to
//! it, and it restores the caller's state on every exit path; a failed
//! restore is reported as its own fatal error because the replay state is
//! corrupt afterwards.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod point_mass;
mod probe;
mod simulator;

pub use error::{Result, SimulationError};
pub use point_mass::PointMassSimulator;
pub use probe::probe_pose;
pub use simulator::Simulator;
