#![forbid(unsafe_code)]
//! Streaming time-domain audio speed changer that preserves pitch.
//!
//! `presto` plays mono 32-bit float PCM faster or slower by a constant
//! factor without shifting its pitch. Instead of resampling, it detects the
//! dominant pitch period with an AMDF search and then deletes (speedup) or
//! repeats (slowdown) whole periods, smoothing each seam with a linear
//! cross-fade. Output arrives at the input sample rate, roughly
//! `input_len / speed` samples long, and is produced incrementally with a
//! bounded working set.
//!
//! # Quick Start
//!
//! ```
//! // Half a second of a 200 Hz tone at 16 kHz, played at double speed.
//! let input: Vec<f32> = (0..8000)
//!     .map(|i| (2.0 * std::f32::consts::PI * 200.0 * i as f32 / 16000.0).sin())
//!     .collect();
//!
//! let output = presto::change_speed(&input, 2.0, 16000).unwrap();
//! assert!(output.len() < input.len());
//! ```
//!
//! # Streaming
//!
//! For incremental use, push chunks through a [`SpeedStream`] and pull
//! whatever is ready after each write:
//!
//! ```
//! use presto::{SpeedParams, SpeedStream};
//!
//! let params = SpeedParams::new(1.5).with_sample_rate(22050);
//! let mut stream = SpeedStream::new(params);
//!
//! let chunk = vec![0.0f32; 1024];
//! let mut out = vec![0.0f32; 4096];
//! for _ in 0..8 {
//!     stream.write(&chunk).unwrap();
//!     let ready = stream.read(&mut out);
//!     // ...hand `out[..ready]` to the audio sink...
//!     let _ = ready;
//! }
//! stream.flush().unwrap();
//! let tail = stream.read_all();
//! assert!(!tail.is_empty() || stream.samples_available() == 0);
//! ```
//!
//! The engine is mono and single-threaded by design; callers own channel
//! splitting and file or device I/O.

pub mod analysis;
pub mod core;
pub mod error;
pub mod stream;
pub mod stretch;

pub use crate::core::types::{Sample, SpeedParams, AMDF_FREQ, AMDF_RANGE, MAX_PITCH_HZ, MIN_PITCH_HZ};
pub use crate::error::SpeedError;
pub use crate::stream::SpeedStream;

/// Changes the speed of a whole clip in one call.
///
/// This is the convenience entry point for non-streaming callers: it feeds
/// `input` through a [`SpeedStream`], flushes, and returns everything the
/// stream produced.
///
/// # Errors
///
/// Returns [`SpeedError`] only if an internal queue cannot grow.
///
/// # Example
///
/// ```
/// let input: Vec<f32> = (0..16000)
///     .map(|i| (2.0 * std::f32::consts::PI * 200.0 * i as f32 / 16000.0).sin())
///     .collect();
/// let output = presto::change_speed(&input, 0.5, 16000).unwrap();
/// assert!(output.len() > input.len());
/// ```
pub fn change_speed(input: &[f32], speed: f64, sample_rate: u32) -> Result<Vec<f32>, SpeedError> {
    let params = SpeedParams::new(speed).with_sample_rate(sample_rate);
    let mut stream = SpeedStream::new(params);
    stream.write(input)?;
    stream.flush()?;
    Ok(stream.read_all())
}
