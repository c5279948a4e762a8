//! Fixed-frequency subsampling and segment aggregation.
//!
//! Recorded demonstrations are captured at the simulator's native control
//! frequency. This crate selects a reduced-frequency subset of the recorded
//! steps and folds the skipped steps into the retained ones:
//!
//! - [`FixedFreqSubsampler`] - strided selection with an optional aggregator
//! - [`Aggregator`] - closed set of segment-reduction policies
//!
//! # Aggregation Policies
//!
//! [`Aggregator::Sum`] reduces a segment by elementwise addition, for signals
//! where total displacement over the skipped window is physically meaningful
//! (integrated joint velocity). [`Aggregator::QuaternionCompose`] reduces a
//! segment of incremental rotations by sequential Hamilton products, later
//! samples left-multiplied onto the running composition.
//!
//! Both policies share one segmentation rule: one output per adjacent
//! boundary pair `[b_i, b_{i+1})`, plus a trailing segment `[b_last, len)`
//! when the last boundary falls short of the sequence end.
//!
//! # Example
//!
//! ```
//! use replay_resample::{Aggregator, FixedFreqSubsampler};
//! use nalgebra::DVector;
//!
//! let rows: Vec<DVector<f64>> =
//!     (1..=6).map(|v| DVector::from_vec(vec![f64::from(v)])).collect();
//!
//! let aggregated = Aggregator::Sum.aggregate(&rows, &[0, 2, 4, 6]).unwrap();
//! assert_eq!(aggregated[0][0], 3.0);
//! assert_eq!(aggregated[1][0], 7.0);
//! assert_eq!(aggregated[2][0], 11.0);
//!
//! let subsampler = FixedFreqSubsampler::new(1);
//! let (kept, boundaries) = subsampler.decimate(&rows);
//! assert_eq!(kept.len(), 3);
//! assert_eq!(boundaries.unwrap(), vec![0, 2, 4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::missing_errors_doc)]

mod aggregate;
mod error;
mod subsample;

pub use aggregate::Aggregator;
pub use error::{ResampleError, Result};
pub use subsample::FixedFreqSubsampler;
