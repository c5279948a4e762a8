//! Segment aggregation policies.

use nalgebra::{DVector, Quaternion, UnitQuaternion};

use crate::error::{ResampleError, Result};

/// Policy for collapsing a contiguous run of per-step values into one
/// representative value.
///
/// This is a closed set: new policies extend the enum, there is no
/// open-ended dispatch.
///
/// Both variants reduce the same segments: one output per adjacent boundary
/// pair `[b_i, b_{i+1})`, plus the trailing segment `[b_last, len)` when the
/// last boundary is below the sequence length. A length-1 segment yields its
/// value unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregator {
    /// Elementwise additive reduction, for velocity-like signals where the
    /// total over the skipped window is meaningful.
    Sum,
    /// Sequential Hamilton quaternion composition, for incremental-rotation
    /// signals. Rows are `[w, x, y, z]`; later samples are left-multiplied
    /// onto the running composition and the result is re-normalized.
    QuaternionCompose,
}

impl Aggregator {
    /// Reduce `values` over the segments induced by `boundaries`.
    ///
    /// # Errors
    ///
    /// Rejects empty inputs, malformed boundaries, rows of non-uniform
    /// dimension (`Sum`) and rows that are not quaternions
    /// (`QuaternionCompose`).
    pub fn aggregate(
        &self,
        values: &[DVector<f64>],
        boundaries: &[usize],
    ) -> Result<Vec<DVector<f64>>> {
        let segments = segment_bounds(boundaries, values.len())?;
        match self {
            Self::Sum => sum_segments(values, &segments),
            Self::QuaternionCompose => compose_segments(values, &segments),
        }
    }

    /// Returns the policy name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::QuaternionCompose => "quaternion_compose",
        }
    }
}

impl std::fmt::Display for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Turn a boundary list into half-open `[start, end)` segments over a
/// sequence of length `len`.
fn segment_bounds(boundaries: &[usize], len: usize) -> Result<Vec<(usize, usize)>> {
    if len == 0 {
        return Err(ResampleError::EmptyInput);
    }
    if boundaries.is_empty() {
        return Err(ResampleError::invalid_boundaries("boundary list is empty"));
    }
    if boundaries.windows(2).any(|w| w[1] <= w[0]) {
        return Err(ResampleError::invalid_boundaries(
            "boundaries must be strictly increasing",
        ));
    }
    // Strictly increasing, so only the last boundary can reach the end.
    if boundaries[boundaries.len() - 1] > len {
        return Err(ResampleError::invalid_boundaries(format!(
            "boundary {} exceeds sequence length {len}",
            boundaries[boundaries.len() - 1]
        )));
    }

    let mut segments: Vec<(usize, usize)> =
        boundaries.windows(2).map(|w| (w[0], w[1])).collect();
    if boundaries[boundaries.len() - 1] < len {
        segments.push((boundaries[boundaries.len() - 1], len));
    }
    Ok(segments)
}

fn sum_segments(values: &[DVector<f64>], segments: &[(usize, usize)]) -> Result<Vec<DVector<f64>>> {
    let dim = values[0].len();
    let mut out = Vec::with_capacity(segments.len());
    for &(start, end) in segments {
        let mut acc = values[start].clone();
        if acc.len() != dim {
            return Err(ResampleError::DimensionMismatch {
                expected: dim,
                actual: acc.len(),
            });
        }
        for row in &values[start + 1..end] {
            if row.len() != dim {
                return Err(ResampleError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
            acc += row;
        }
        out.push(acc);
    }
    Ok(out)
}

fn compose_segments(
    values: &[DVector<f64>],
    segments: &[(usize, usize)],
) -> Result<Vec<DVector<f64>>> {
    let mut out = Vec::with_capacity(segments.len());
    for &(start, end) in segments {
        let mut running = quat_from_row(&values[start])?;
        for row in &values[start + 1..end] {
            running = quat_from_row(row)? * running;
        }
        out.push(quat_to_row(&running));
    }
    Ok(out)
}

fn quat_from_row(row: &DVector<f64>) -> Result<UnitQuaternion<f64>> {
    if row.len() != 4 {
        return Err(ResampleError::InvalidQuaternion { len: row.len() });
    }
    Ok(UnitQuaternion::new_normalize(Quaternion::new(
        row[0], row[1], row[2], row[3],
    )))
}

fn quat_to_row(q: &UnitQuaternion<f64>) -> DVector<f64> {
    let q = q.quaternion();
    DVector::from_vec(vec![q.w, q.i, q.j, q.k])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn scalar_rows(values: &[f64]) -> Vec<DVector<f64>> {
        values.iter().map(|&v| DVector::from_vec(vec![v])).collect()
    }

    fn quat_row(q: &UnitQuaternion<f64>) -> DVector<f64> {
        quat_to_row(q)
    }

    #[test]
    fn sum_consecutive_pairs() {
        let rows = scalar_rows(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let out = Aggregator::Sum.aggregate(&rows, &[0, 2, 4, 6]).unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(out[0][0], 3.0);
        assert_eq!(out[1][0], 7.0);
        assert_eq!(out[2][0], 11.0);
    }

    #[test]
    fn sum_includes_trailing_segment() {
        let rows = scalar_rows(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let out = Aggregator::Sum.aggregate(&rows, &[0, 2, 4]).unwrap();

        // [0,2), [2,4), and the trailing [4,5).
        assert_eq!(out.len(), 3);
        assert_eq!(out[2][0], 5.0);
    }

    #[test]
    fn sum_is_elementwise() {
        let rows = vec![
            DVector::from_vec(vec![1.0, 10.0]),
            DVector::from_vec(vec![2.0, 20.0]),
        ];
        let out = Aggregator::Sum.aggregate(&rows, &[0, 2]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0][0], 3.0);
        assert_eq!(out[0][1], 30.0);
    }

    #[test]
    fn sum_rejects_dimension_mismatch() {
        let rows = vec![
            DVector::from_vec(vec![1.0, 10.0]),
            DVector::from_vec(vec![2.0]),
        ];
        let err = Aggregator::Sum.aggregate(&rows, &[0, 2]).unwrap_err();
        assert!(matches!(err, ResampleError::DimensionMismatch { .. }));
    }

    #[test]
    fn compose_singleton_segment_is_identity_operation() {
        let q = UnitQuaternion::from_euler_angles(0.3, -0.1, 0.8);
        let rows = vec![quat_row(&q)];
        let out = Aggregator::QuaternionCompose.aggregate(&rows, &[0]).unwrap();

        assert_eq!(out.len(), 1);
        let back = quat_from_row(&out[0]).unwrap();
        assert_relative_eq!(back.angle_to(&q), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn compose_left_multiplies_later_samples() {
        let qx = UnitQuaternion::from_euler_angles(FRAC_PI_2, 0.0, 0.0);
        let qy = UnitQuaternion::from_euler_angles(0.0, FRAC_PI_2, 0.0);
        let rows = vec![quat_row(&qx), quat_row(&qy)];

        let out = Aggregator::QuaternionCompose.aggregate(&rows, &[0, 2]).unwrap();
        assert_eq!(out.len(), 1);

        let composed = quat_from_row(&out[0]).unwrap();
        let expected = qy * qx;
        assert_relative_eq!(composed.angle_to(&expected), 0.0, epsilon = 1e-10);
        // Order matters for non-commuting rotations.
        let swapped = qx * qy;
        assert!(composed.angle_to(&swapped) > 1e-3);
    }

    #[test]
    fn compose_normalizes_result() {
        // Slightly denormalized inputs still produce a unit quaternion.
        let rows = vec![
            DVector::from_vec(vec![1.001, 0.0, 0.0, 0.0]),
            DVector::from_vec(vec![0.999, 0.0, 0.0, 0.0]),
        ];
        let out = Aggregator::QuaternionCompose.aggregate(&rows, &[0, 2]).unwrap();
        let norm = out[0].norm();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn compose_rejects_non_quaternion_rows() {
        let rows = scalar_rows(&[1.0, 2.0]);
        let err = Aggregator::QuaternionCompose
            .aggregate(&rows, &[0, 2])
            .unwrap_err();
        assert!(matches!(err, ResampleError::InvalidQuaternion { len: 1 }));
    }

    #[test]
    fn rejects_empty_input_and_bad_boundaries() {
        let rows = scalar_rows(&[1.0, 2.0, 3.0]);

        let err = Aggregator::Sum.aggregate(&[], &[0]).unwrap_err();
        assert_eq!(err, ResampleError::EmptyInput);

        let err = Aggregator::Sum.aggregate(&rows, &[]).unwrap_err();
        assert!(matches!(err, ResampleError::InvalidBoundaries { .. }));

        let err = Aggregator::Sum.aggregate(&rows, &[0, 0]).unwrap_err();
        assert!(matches!(err, ResampleError::InvalidBoundaries { .. }));

        let err = Aggregator::Sum.aggregate(&rows, &[0, 4]).unwrap_err();
        assert!(matches!(err, ResampleError::InvalidBoundaries { .. }));
    }

    #[test]
    fn aggregator_display() {
        assert_eq!(Aggregator::Sum.to_string(), "sum");
        assert_eq!(Aggregator::QuaternionCompose.to_string(), "quaternion_compose");
    }
}
