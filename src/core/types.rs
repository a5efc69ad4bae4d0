//! Core types shared across the crate: samples, tunables, and parameters.

/// A single audio sample (32-bit float, nominal range -1.0 to 1.0).
///
/// The engine is linear: it neither clips nor normalizes, so any DC offset
/// or clipping present in the input survives into the output.
pub type Sample = f32;

/// Lowest pitch the period estimator targets, in Hz.
///
/// 65 Hz is the bottom of the human voice range; it bounds the longest
/// candidate period and therefore the stream's buffered lookahead.
pub const MIN_PITCH_HZ: u32 = 65;

/// Highest pitch the period estimator targets, in Hz.
pub const MAX_PITCH_HZ: u32 = 400;

/// Target rate after decimation for the coarse AMDF pass, in Hz.
///
/// The coarse search strides through the signal so that the comparison cost
/// stays proportional to this rate regardless of the stream's sample rate.
pub const AMDF_FREQ: u32 = 4000;

/// Fine-search half-width, as a fraction of the coarse period.
pub const AMDF_RANGE: f64 = 0.1;

/// Parameters for a speed-change stream.
///
/// `speed` and `sample_rate` are fixed for the life of a stream. The
/// optional queue limit caps how many samples either queue may hold; growth
/// past it surfaces as [`SpeedError::QueueLimit`](crate::SpeedError).
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedParams {
    /// Playback speed factor (>1.0 compresses time, <1.0 expands it).
    pub speed: f64,
    /// Sample rate in Hz of both input and output.
    pub sample_rate: u32,
    /// Optional cap on each queue, in samples.
    pub queue_limit: Option<usize>,
}

impl SpeedParams {
    /// Creates parameters with the given speed at the default 44.1 kHz rate.
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            sample_rate: 44100,
            queue_limit: None,
        }
    }

    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Caps each internal queue at `limit` samples.
    ///
    /// With a limit in place the stream degrades gracefully under memory
    /// pressure: a write that would overfill a queue fails without losing
    /// buffered audio, and succeeds once the caller drains the output.
    pub fn with_queue_limit(mut self, limit: usize) -> Self {
        self.queue_limit = Some(limit);
        self
    }

    /// Shortest candidate pitch period in samples.
    #[inline]
    pub fn min_period(&self) -> usize {
        ((self.sample_rate / MAX_PITCH_HZ) as usize).max(1)
    }

    /// Longest candidate pitch period in samples.
    ///
    /// Always strictly greater than [`min_period`](Self::min_period), even
    /// at degenerate sample rates below the pitch range.
    #[inline]
    pub fn max_period(&self) -> usize {
        ((self.sample_rate / MIN_PITCH_HZ) as usize).max(self.min_period() + 1)
    }

    /// Buffered input required before a candidate period and its one-period
    /// lookahead are both in bounds.
    #[inline]
    pub fn max_required(&self) -> usize {
        2 * self.max_period()
    }

    /// Expected output length for `input_len` samples of input.
    #[inline]
    pub fn output_length(&self, input_len: usize) -> usize {
        (input_len as f64 / self.speed).round() as usize
    }
}
