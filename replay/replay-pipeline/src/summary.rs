//! Episode length statistics.

use serde::{Deserialize, Serialize};

/// One bin of a length histogram, covering `[lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthBin {
    /// Inclusive lower edge.
    pub lo: f64,
    /// Exclusive upper edge.
    pub hi: f64,
    /// Episodes falling in the bin.
    pub count: usize,
}

/// Statistics over the step counts of a demonstration set.
///
/// Replaces plotting with a serializable record: the stats CLI mode writes
/// this as JSON instead of rendering a histogram image.
///
/// # Example
///
/// ```
/// use replay_pipeline::LengthSummary;
///
/// let summary = LengthSummary::from_lengths(&[3, 5, 5, 9], 2).unwrap();
/// assert_eq!(summary.count, 4);
/// assert_eq!(summary.min, 3);
/// assert_eq!(summary.max, 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthSummary {
    /// Number of episodes.
    pub count: usize,
    /// Shortest episode.
    pub min: usize,
    /// Longest episode.
    pub max: usize,
    /// Mean length.
    pub mean: f64,
    /// Equal-width histogram over `[min, max]`.
    pub bins: Vec<LengthBin>,
}

impl LengthSummary {
    /// Summarize a set of episode lengths into `n_bins` equal-width bins.
    ///
    /// Returns `None` for an empty set or a zero bin count.
    #[must_use]
    pub fn from_lengths(lengths: &[usize], n_bins: usize) -> Option<Self> {
        if lengths.is_empty() || n_bins == 0 {
            return None;
        }

        let min = *lengths.iter().min()?;
        let max = *lengths.iter().max()?;
        let total: usize = lengths.iter().sum();
        let mean = total as f64 / lengths.len() as f64;

        // Half-open bins over [min, max + 1) so the maximum lands in the
        // last bin.
        let width = (max - min + 1) as f64 / n_bins as f64;
        let mut bins: Vec<LengthBin> = (0..n_bins)
            .map(|i| LengthBin {
                lo: min as f64 + i as f64 * width,
                hi: min as f64 + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        for &length in lengths {
            let offset = (length - min) as f64 / width;
            let index = (offset as usize).min(n_bins - 1);
            bins[index].count += 1;
        }

        Some(Self {
            count: lengths.len(),
            min,
            max,
            mean,
            bins,
        })
    }
}
