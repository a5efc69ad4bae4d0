//! Pitch-period estimation via the average magnitude difference function.

use crate::core::types::{Sample, AMDF_FREQ, AMDF_RANGE};

/// Two-pass AMDF pitch-period estimator.
///
/// The average magnitude difference function `D(p) = sum |s[i] - s[i + p]|`
/// dips where the signal repeats; the best period minimizes the normalized
/// criterion `D(p) / p`. A coarse pass strides through both the candidate
/// range and the samples so its cost tracks [`AMDF_FREQ`] rather than the
/// stream's sample rate, then a fine pass re-examines a narrow window
/// around the coarse winner at full resolution.
#[derive(Debug, Clone)]
pub struct PitchDetector {
    min_period: usize,
    max_period: usize,
    coarse_skip: usize,
}

impl PitchDetector {
    /// Creates a detector for the given sample rate and period bounds.
    pub fn new(sample_rate: u32, min_period: usize, max_period: usize) -> Self {
        debug_assert!(min_period >= 1 && min_period < max_period);
        let coarse_skip = if sample_rate > AMDF_FREQ {
            (sample_rate / AMDF_FREQ) as usize
        } else {
            1
        };
        Self {
            min_period,
            max_period,
            coarse_skip,
        }
    }

    /// Shortest candidate period in samples.
    #[inline]
    pub fn min_period(&self) -> usize {
        self.min_period
    }

    /// Longest candidate period in samples.
    #[inline]
    pub fn max_period(&self) -> usize {
        self.max_period
    }

    /// Finds the pitch period of `samples`.
    ///
    /// The caller must provide at least `2 * max_period` readable samples;
    /// the detector never reads past that bound.
    pub fn find_period(&self, samples: &[Sample]) -> usize {
        debug_assert!(
            samples.len() >= 2 * self.max_period,
            "pitch search needs {} samples, got {}",
            2 * self.max_period,
            samples.len()
        );
        let coarse = amdf_in_range(samples, self.min_period, self.max_period, self.coarse_skip);
        let lo = ((coarse as f64 * (1.0 - AMDF_RANGE)).floor() as usize).max(self.min_period);
        let hi = ((coarse as f64 * (1.0 + AMDF_RANGE)).ceil() as usize).min(self.max_period);
        amdf_in_range(samples, lo, hi, 1)
    }
}

/// Returns the period in `{lo, lo + skip, ...} <= hi` minimizing `D(p) / p`.
///
/// The division is delayed: a candidate with difference `d` replaces the
/// current best iff `d < min_diff * p`, which picks the same minimizer
/// without dividing per candidate. The first candidate wins ties.
fn amdf_in_range(samples: &[Sample], lo: usize, hi: usize, skip: usize) -> usize {
    let mut best_period = 0usize;
    let mut min_diff = 0.0f64;

    let mut period = lo;
    while period <= hi {
        let mut diff = 0.0f64;
        let mut i = 0;
        while i < period {
            diff += f64::from((samples[i] - samples[i + period]).abs());
            i += skip;
        }
        if best_period == 0 || diff < min_diff * period as f64 {
            min_diff = diff / period as f64;
            best_period = period;
        }
        period += skip;
    }
    best_period
}
