//! Core types for demonstration replay retargeting.
//!
//! This crate provides the foundational types for converting recorded
//! robot-manipulation demonstrations into down-sampled, fixed-length
//! training sequences:
//!
//! - [`SimState`] - Opaque flattened snapshot of full physics configuration
//! - [`Episode`] - One recorded demonstration trajectory
//! - [`Pose`] - End-effector position + orientation, with relative-pose algebra
//! - [`DeltaAction`] - Relative motion command replayed over sub-steps
//! - [`Frame`] / [`Observation`] - Rendered observations
//! - [`PackagedSequence`] - Fixed-length training sequence with padding mask
//! - [`ReplayConfig`] - Skip factor, sub-step count, replay policies
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no simulation, no I/O, no
//! replay logic. They're the common language between:
//!
//! - Physics simulators (behind the `Simulator` collaborator trait)
//! - The resampling layer (subsampling + aggregation)
//! - The replay controller (waypoint retargeting)
//! - Dataset persistence (packaged sequence records)
//!
//! # Conventions
//!
//! All math is `nalgebra` over `f64`. Quaternions are Hamilton-convention
//! unit quaternions; orientation deltas are world-frame left factors, so a
//! delta `dq` applied to orientation `q` yields `dq * q`. Flattened
//! quaternion rows are stored `[w, x, y, z]`.
//!
//! # Example
//!
//! ```
//! use replay_types::Pose;
//! use nalgebra::Point3;
//!
//! let current = Pose::from_position(Point3::new(0.0, 0.0, 1.0));
//! let desired = Pose::from_position(Point3::new(0.1, 0.0, 1.0));
//!
//! let (dpos, dquat) = Pose::relative_to(&desired, &current);
//! assert!((dpos.x - 0.1).abs() < 1e-12);
//! assert!(dquat.angle() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(
    clippy::missing_const_for_fn,   // Many methods can't be const due to nalgebra
    clippy::missing_errors_doc,     // Error docs added where non-obvious
    clippy::cast_precision_loss     // usize to f64 is fine for counts
)]

mod action;
mod config;
mod episode;
mod error;
mod frame;
mod pose;
mod sequence;
mod state;

pub use action::DeltaAction;
pub use config::{ReplayConfig, SubstepOrientationPolicy};
pub use episode::Episode;
pub use error::ReplayError;
pub use frame::{Frame, Observation};
pub use pose::Pose;
pub use sequence::{pad_mask, PackagedSequence};
pub use state::{SceneDescription, SimState};

// Re-export math types for convenience
pub use nalgebra::{DVector, Matrix4, Point3, UnitQuaternion, Vector3};

/// Result type for replay type operations.
pub type Result<T> = std::result::Result<T, ReplayError>;
