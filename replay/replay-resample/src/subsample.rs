//! Fixed-frequency subsampling.

use nalgebra::DVector;

use crate::aggregate::Aggregator;
use crate::error::{ResampleError, Result};

/// Subsamples a per-step sequence by skipping a fixed number of steps
/// between retained samples.
///
/// With skip factor `k`, the retained boundaries are `0, k+1, 2(k+1), …`,
/// strictly below `len - 1`: the first sample of every window is always
/// retained and the final partial window's tail is never indexed past the
/// end. The retained count is `ceil((len - 1) / (k + 1))`.
///
/// A skip factor of zero is the identity fast path: the input is returned
/// unchanged and no boundaries are produced.
///
/// # Example
///
/// ```
/// use replay_resample::FixedFreqSubsampler;
///
/// let values: Vec<u32> = (0..7).collect();
/// let (kept, boundaries) = FixedFreqSubsampler::new(2).decimate(&values);
/// assert_eq!(kept, vec![0, 3]);
/// assert_eq!(boundaries.unwrap(), vec![0, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFreqSubsampler {
    n_skip: usize,
    aggregator: Option<Aggregator>,
}

impl FixedFreqSubsampler {
    /// Create a subsampler with the given skip factor.
    #[must_use]
    pub const fn new(n_skip: usize) -> Self {
        Self {
            n_skip,
            aggregator: None,
        }
    }

    /// Attach an aggregation policy for [`Self::subsample_aggregated`].
    #[must_use]
    pub const fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = Some(aggregator);
        self
    }

    /// The configured skip factor.
    #[must_use]
    pub const fn n_skip(&self) -> usize {
        self.n_skip
    }

    /// Retained boundaries for a sequence of length `len`.
    ///
    /// Empty when `len < 2`; the stride never reaches the final index.
    #[must_use]
    pub fn boundaries(&self, len: usize) -> Vec<usize> {
        (0..len.saturating_sub(1)).step_by(self.n_skip + 1).collect()
    }

    /// Subsample by direct indexing (decimation without aggregation).
    ///
    /// Returns the retained values and the boundaries used, or the input
    /// unchanged with no boundaries when the skip factor is zero. Repeated
    /// calls on the same input produce identical output.
    #[must_use]
    pub fn decimate<T: Clone>(&self, values: &[T]) -> (Vec<T>, Option<Vec<usize>>) {
        if self.n_skip == 0 {
            return (values.to_vec(), None);
        }
        let boundaries = self.boundaries(values.len());
        let kept = boundaries.iter().map(|&i| values[i].clone()).collect();
        (kept, Some(boundaries))
    }

    /// Subsample by folding each skipped window into its retained sample
    /// with the configured aggregator.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::MissingAggregator`] when no aggregator is
    /// configured. This is checked before any data is touched, so the
    /// misconfiguration surfaces even on the zero-skip fast path.
    pub fn subsample_aggregated(
        &self,
        values: &[DVector<f64>],
    ) -> Result<(Vec<DVector<f64>>, Option<Vec<usize>>)> {
        let aggregator = self.aggregator.ok_or(ResampleError::MissingAggregator)?;

        if self.n_skip == 0 {
            return Ok((values.to_vec(), None));
        }
        let boundaries = self.boundaries(values.len());
        let aggregated = aggregator.aggregate(values, &boundaries)?;
        Ok((aggregated, Some(boundaries)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn scalar_rows(n: usize) -> Vec<DVector<f64>> {
        (0..n).map(|v| DVector::from_vec(vec![v as f64])).collect()
    }

    #[test]
    fn zero_skip_is_identity() {
        let values: Vec<u32> = (0..5).collect();
        let (kept, boundaries) = FixedFreqSubsampler::new(0).decimate(&values);
        assert_eq!(kept, values);
        assert!(boundaries.is_none());
    }

    #[test]
    fn retained_length_formula() {
        // ceil((n - 1) / (k + 1)) for a spread of lengths and skip factors.
        for n in 1..40 {
            for k in 1..6 {
                let values: Vec<usize> = (0..n).collect();
                let (kept, _) = FixedFreqSubsampler::new(k).decimate(&values);
                let expected = (n - 1).div_ceil(k + 1);
                assert_eq!(kept.len(), expected, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn decimation_is_strided_from_zero() {
        let values: Vec<u32> = (0..10).collect();
        let (kept, boundaries) = FixedFreqSubsampler::new(1).decimate(&values);
        assert_eq!(kept, vec![0, 2, 4, 6, 8]);
        assert_eq!(boundaries.unwrap(), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn decimation_is_deterministic() {
        let values: Vec<u32> = (0..23).collect();
        let subsampler = FixedFreqSubsampler::new(3);
        assert_eq!(subsampler.decimate(&values), subsampler.decimate(&values));
    }

    #[test]
    fn aggregated_subsample_sums_windows() {
        let rows = scalar_rows(6); // 0 1 2 3 4 5
        let subsampler = FixedFreqSubsampler::new(1).with_aggregator(Aggregator::Sum);

        let (aggregated, boundaries) = subsampler.subsample_aggregated(&rows).unwrap();
        assert_eq!(boundaries.unwrap(), vec![0, 2, 4]);
        // [0,2) [2,4) and trailing [4,6).
        assert_eq!(aggregated.len(), 3);
        assert_eq!(aggregated[0][0], 1.0);
        assert_eq!(aggregated[1][0], 5.0);
        assert_eq!(aggregated[2][0], 9.0);
    }

    #[test]
    fn aggregated_length_matches_decimation() {
        for n in 2..30 {
            for k in 1..5 {
                let rows = scalar_rows(n);
                let subsampler =
                    FixedFreqSubsampler::new(k).with_aggregator(Aggregator::Sum);
                let (aggregated, _) = subsampler.subsample_aggregated(&rows).unwrap();
                let (kept, _) = subsampler.decimate(&rows);
                assert_eq!(aggregated.len(), kept.len(), "n={n} k={k}");
            }
        }
    }

    #[test]
    fn missing_aggregator_fails_fast() {
        let rows = scalar_rows(6);
        let err = FixedFreqSubsampler::new(1)
            .subsample_aggregated(&rows)
            .unwrap_err();
        assert_eq!(err, ResampleError::MissingAggregator);

        // Even the zero-skip fast path reports the misconfiguration.
        let err = FixedFreqSubsampler::new(0)
            .subsample_aggregated(&rows)
            .unwrap_err();
        assert_eq!(err, ResampleError::MissingAggregator);
    }

    #[test]
    fn short_sequences_retain_nothing() {
        let (kept, boundaries) = FixedFreqSubsampler::new(2).decimate(&[1u32]);
        assert!(kept.is_empty());
        assert_eq!(boundaries.unwrap(), Vec::<usize>::new());

        let (kept, _) = FixedFreqSubsampler::new(2).decimate::<u32>(&[]);
        assert!(kept.is_empty());
    }
}
