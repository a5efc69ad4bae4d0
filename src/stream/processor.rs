//! Streaming speed-change processor.
//!
//! [`SpeedStream`] is the top-level driver: the caller pushes arbitrary
//! chunks of samples in with [`write`](SpeedStream::write), the driver
//! buffers them until two full pitch periods are available, mutates whole
//! periods into the output queue, and the caller pulls results out with
//! [`read`](SpeedStream::read). All work happens on the caller's thread
//! inside these calls.

use log::{debug, trace};

use crate::analysis::pitch::PitchDetector;
use crate::core::queue::SampleQueue;
use crate::core::types::{Sample, SpeedParams};
use crate::error::SpeedError;
use crate::stretch::psola::{insert_period, skip_period};

/// Speeds within this distance of 1.0 bypass processing entirely.
const UNITY_SPEED_EPSILON: f64 = 1e-6;

/// Streaming time-domain speed changer for mono float samples.
///
/// The speed factor and sample rate are fixed for the stream's life. Output
/// length approaches `input_len / speed`, with pitch preserved because the
/// engine deletes or repeats whole pitch periods instead of resampling.
///
/// # Example
///
/// ```
/// use presto::{SpeedParams, SpeedStream};
///
/// let mut stream = SpeedStream::new(SpeedParams::new(1.5).with_sample_rate(16000));
/// let chunk = vec![0.0f32; 2048];
/// stream.write(&chunk).unwrap();
/// stream.flush().unwrap();
/// let output = stream.read_all();
/// assert!(!output.is_empty());
/// ```
pub struct SpeedStream {
    params: SpeedParams,
    max_required: usize,
    detector: PitchDetector,
    input: SampleQueue,
    output: SampleQueue,
    remaining_input_to_copy: usize,
}

impl std::fmt::Debug for SpeedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeedStream")
            .field("params", &self.params)
            .field("max_required", &self.max_required)
            .field("input_len", &self.input.len())
            .field("output_len", &self.output.len())
            .field("remaining_input_to_copy", &self.remaining_input_to_copy)
            .finish()
    }
}

impl SpeedStream {
    /// Creates a stream with the given fixed speed and sample rate.
    pub fn new(params: SpeedParams) -> Self {
        let min_period = params.min_period();
        let max_period = params.max_period();
        let max_required = params.max_required();
        debug!(
            "speed stream: speed={} sample_rate={} periods={}..={} lookahead={}",
            params.speed, params.sample_rate, min_period, max_period, max_required
        );
        Self {
            detector: PitchDetector::new(params.sample_rate, min_period, max_period),
            input: SampleQueue::with_capacity("input", max_required, params.queue_limit),
            output: SampleQueue::with_capacity("output", max_required, params.queue_limit),
            remaining_input_to_copy: 0,
            max_required,
            params,
        }
    }

    /// Returns the speed factor.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.params.speed
    }

    /// Returns the sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.params.sample_rate
    }

    /// Returns a reference to the stream's parameters.
    #[inline]
    pub fn params(&self) -> &SpeedParams {
        &self.params
    }

    /// Returns the input lookahead in samples: how much must be buffered
    /// before the first processed sample can be produced.
    #[inline]
    pub fn latency_samples(&self) -> usize {
        self.max_required
    }

    /// Returns the number of output samples ready to [`read`](Self::read).
    #[inline]
    pub fn samples_available(&self) -> usize {
        self.output.len()
    }

    /// Returns the number of input samples buffered but not yet processed.
    #[inline]
    pub fn buffered_input_samples(&self) -> usize {
        self.input.len()
    }

    /// Writes a chunk of input samples.
    ///
    /// Samples are buffered until two full pitch periods are available,
    /// then processed a whole period at a time; output accumulates in the
    /// stream until read. An empty chunk is a no-op unless processing is
    /// already possible.
    ///
    /// # Errors
    ///
    /// Fails only if a queue cannot grow. Completed period mutations keep
    /// their output and their consumed input; the failing operation emits
    /// nothing, and the write may be retried after draining the output.
    pub fn write(&mut self, samples: &[Sample]) -> Result<(), SpeedError> {
        if (self.params.speed - 1.0).abs() < UNITY_SPEED_EPSILON {
            // No speed change: forward verbatim, the input queue stays empty.
            return self.output.append(samples);
        }
        self.input.append(samples)?;
        if self.input.len() < self.max_required {
            return Ok(());
        }
        self.process_buffered()
    }

    /// Copies up to `out.len()` processed samples into `out`, oldest first,
    /// and returns the count copied. Zero is not an error; it just means no
    /// output is ready yet.
    pub fn read(&mut self, out: &mut [Sample]) -> usize {
        self.output.read_into(out)
    }

    /// Drains the entire output queue into a fresh vector.
    pub fn read_all(&mut self) -> Vec<Sample> {
        let mut out = vec![0.0; self.output.len()];
        let count = self.output.read_into(&mut out);
        debug_assert_eq!(count, out.len());
        out
    }

    /// Forces out whatever trailing content is buffered.
    ///
    /// Drains the input queue as far as possible, then repeatedly pads it
    /// with silence up to one lookahead and processes, until every real
    /// trailing sample has been consumed. The emitted tail may end in a
    /// short stretch blended with the silence padding. Call before the
    /// final [`read`](Self::read).
    ///
    /// # Errors
    ///
    /// Fails only if a queue cannot grow; see [`write`](Self::write).
    pub fn flush(&mut self) -> Result<(), SpeedError> {
        if self.input.is_empty() {
            return Ok(());
        }
        if self.input.len() >= self.max_required {
            self.process_buffered()?;
        }
        debug!("flush: {} trailing input samples", self.input.len());
        let mut real_remaining = self.input.len();
        while real_remaining > 0 {
            let pad = self.max_required - self.input.len();
            self.input.append_zeros(pad)?;
            let before = self.input.len();
            self.process_buffered()?;
            // Every pass consumes at least one sample, so this terminates.
            let consumed = before - self.input.len();
            real_remaining = real_remaining.saturating_sub(consumed);
        }
        self.input.clear();
        self.remaining_input_to_copy = 0;
        Ok(())
    }

    /// Discards all buffered input and output, keeping the configuration.
    pub fn reset(&mut self) {
        self.input.clear();
        self.output.clear();
        self.remaining_input_to_copy = 0;
    }

    /// Processes whole pitch periods while a full lookahead remains
    /// buffered, then drops the consumed input prefix.
    ///
    /// The caller must ensure `input.len() >= max_required` on entry.
    fn process_buffered(&mut self) -> Result<(), SpeedError> {
        let speed = self.params.speed;
        let num_samples = self.input.len();
        let output_before = self.output.len();
        let mut position = 0;

        let result = loop {
            if self.remaining_input_to_copy > 0 {
                // Forward verbatim samples owed by the last mutation.
                let count = self.remaining_input_to_copy.min(self.max_required);
                let copy = &self.input.as_slice()[position..position + count];
                if let Err(err) = self.output.append(copy) {
                    break Err(err);
                }
                self.remaining_input_to_copy -= count;
                position += count;
            } else {
                let view = &self.input.as_slice()[position..];
                let period = self.detector.find_period(view);
                let mutated = if speed > 1.0 {
                    skip_period(view, speed, period, &mut self.output)
                } else {
                    insert_period(view, speed, period, &mut self.output)
                };
                match mutated {
                    Ok(mutation) => {
                        self.remaining_input_to_copy = mutation.remaining_copy;
                        position += mutation.advance;
                    }
                    Err(err) => break Err(err),
                }
            }
            if position + self.max_required > num_samples {
                break Ok(());
            }
        };

        self.input.drop_front(position);
        trace!(
            "processed {} input samples into {} output samples ({} still buffered)",
            position,
            self.output.len() - output_before,
            self.input.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn unity_speed_bypasses_the_input_queue() {
        let mut stream = SpeedStream::new(SpeedParams::new(1.0).with_sample_rate(16000));
        stream.write(&[0.1, -0.2, 0.3, -0.4]).unwrap();
        assert_eq!(stream.buffered_input_samples(), 0);
        assert_eq!(stream.samples_available(), 4);
        assert_eq!(stream.read_all(), vec![0.1, -0.2, 0.3, -0.4]);
    }

    #[test]
    fn near_unity_speed_counts_as_unity() {
        let mut stream = SpeedStream::new(SpeedParams::new(1.0000004).with_sample_rate(16000));
        stream.write(&[0.5; 100]).unwrap();
        assert_eq!(stream.buffered_input_samples(), 0);
        assert_eq!(stream.samples_available(), 100);
    }

    #[test]
    fn short_write_buffers_without_output() {
        let mut stream = SpeedStream::new(SpeedParams::new(2.0).with_sample_rate(16000));
        let chunk = sine(200.0, 16000, 100);
        stream.write(&chunk).unwrap();
        assert_eq!(stream.samples_available(), 0);
        assert_eq!(stream.buffered_input_samples(), 100);
    }

    #[test]
    fn backlog_stays_under_one_lookahead() {
        let mut stream = SpeedStream::new(SpeedParams::new(1.5).with_sample_rate(16000));
        let chunk = sine(150.0, 16000, 700);
        for _ in 0..20 {
            stream.write(&chunk).unwrap();
            assert!(
                stream.buffered_input_samples() < stream.latency_samples(),
                "backlog {} reached lookahead {}",
                stream.buffered_input_samples(),
                stream.latency_samples()
            );
        }
    }

    #[test]
    fn speedup_consumes_more_than_it_emits() {
        let mut stream = SpeedStream::new(SpeedParams::new(2.0).with_sample_rate(16000));
        let chunk = sine(200.0, 16000, 4000);
        stream.write(&chunk).unwrap();
        let produced = stream.samples_available();
        assert!(produced > 0);
        assert!(
            produced < chunk.len(),
            "2x speed produced {} of {} samples",
            produced,
            chunk.len()
        );
    }

    #[test]
    fn slowdown_emits_more_than_it_consumes() {
        let mut stream = SpeedStream::new(SpeedParams::new(0.5).with_sample_rate(16000));
        let chunk = sine(200.0, 16000, 4000);
        stream.write(&chunk).unwrap();
        assert!(stream.samples_available() > chunk.len());
    }

    #[test]
    fn flush_on_empty_stream_is_a_no_op() {
        let mut stream = SpeedStream::new(SpeedParams::new(1.5).with_sample_rate(16000));
        stream.flush().unwrap();
        assert_eq!(stream.samples_available(), 0);
        // A second flush is just as harmless.
        stream.flush().unwrap();
    }

    #[test]
    fn flush_forces_out_a_short_tail() {
        let mut stream = SpeedStream::new(SpeedParams::new(2.0).with_sample_rate(16000));
        stream.write(&sine(200.0, 16000, 100)).unwrap();
        assert_eq!(stream.samples_available(), 0);
        stream.flush().unwrap();
        assert!(stream.samples_available() > 0);
    }

    #[test]
    fn read_returns_zero_when_nothing_is_ready() {
        let mut stream = SpeedStream::new(SpeedParams::new(1.5).with_sample_rate(16000));
        let mut out = [0.0f32; 64];
        assert_eq!(stream.read(&mut out), 0);
    }

    #[test]
    fn partial_reads_drain_in_order() {
        let mut stream = SpeedStream::new(SpeedParams::new(1.0).with_sample_rate(16000));
        stream.write(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let mut first = [0.0f32; 2];
        let mut rest = [0.0f32; 8];
        assert_eq!(stream.read(&mut first), 2);
        assert_eq!(first, [1.0, 2.0]);
        assert_eq!(stream.read(&mut rest), 3);
        assert_eq!(&rest[..3], &[3.0, 4.0, 5.0]);
        assert_eq!(stream.samples_available(), 0);
    }

    #[test]
    fn reset_clears_state_but_keeps_configuration() {
        let mut stream = SpeedStream::new(SpeedParams::new(1.5).with_sample_rate(16000));
        stream.write(&sine(200.0, 16000, 2000)).unwrap();
        stream.reset();
        assert_eq!(stream.samples_available(), 0);
        assert_eq!(stream.buffered_input_samples(), 0);
        assert_eq!(stream.speed(), 1.5);
        // The stream keeps working after a reset.
        stream.write(&sine(200.0, 16000, 2000)).unwrap();
        assert!(stream.samples_available() > 0);
    }

    #[test]
    fn fractional_speed_uses_the_copy_counter() {
        // At 1.5x each mutation owes a one-period verbatim copy, so after a
        // long write the counter has been exercised and the output ratio is
        // close to 1/1.5.
        let mut stream = SpeedStream::new(SpeedParams::new(1.5).with_sample_rate(16000));
        let chunk = sine(200.0, 16000, 16000);
        stream.write(&chunk).unwrap();
        stream.flush().unwrap();
        let produced = stream.read_all().len();
        let expected = (16000.0 / 1.5) as isize;
        let max_period = stream.params().max_period() as isize;
        assert!(
            (produced as isize - expected).abs() <= max_period,
            "1.5x output {} too far from {}",
            produced,
            expected
        );
    }
}
