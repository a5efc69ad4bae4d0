#![allow(dead_code)]

use std::f32::consts::PI;

use presto::{SpeedParams, SpeedStream};
use rustfft::{num_complex::Complex, FftPlanner};

/// Generates a mono sine wave.
pub fn sine_wave(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Computes the RMS level of a signal.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|x| x * x).sum::<f32>() / signal.len() as f32).sqrt()
}

/// Computes spectral energy at a target frequency using a single DFT bin.
pub fn spectral_energy_at_freq(signal: &[f32], sample_rate: u32, target_freq: f32) -> f32 {
    let n = signal.len();
    if n == 0 {
        return 0.0;
    }
    let two_pi = 2.0 * PI;
    let mut real = 0.0f64;
    let mut imag = 0.0f64;
    for (i, &s) in signal.iter().enumerate() {
        let angle = two_pi * target_freq * i as f32 / sample_rate as f32;
        real += s as f64 * angle.cos() as f64;
        imag += s as f64 * angle.sin() as f64;
    }
    ((real * real + imag * imag) / n as f64).sqrt() as f32
}

/// Finds the dominant frequency of a signal via an FFT magnitude peak.
///
/// Uses up to the first 16384 samples; resolution is `sample_rate / n` Hz.
pub fn spectral_peak_hz(signal: &[f32], sample_rate: u32) -> f32 {
    let n = signal.len().min(16384);
    assert!(n >= 256, "need at least 256 samples for a peak estimate");

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f32>> = signal[..n]
        .iter()
        .map(|&s| Complex::new(s, 0.0))
        .collect();
    fft.process(&mut buffer);

    let mut best_bin = 1;
    let mut best_mag = 0.0f32;
    for (bin, value) in buffer.iter().enumerate().take(n / 2).skip(1) {
        let mag = value.norm();
        if mag > best_mag {
            best_mag = mag;
            best_bin = bin;
        }
    }
    best_bin as f32 * sample_rate as f32 / n as f32
}

/// Runs a whole signal through a stream in fixed-size chunks and returns
/// everything it produced, including the flushed tail.
pub fn process_chunked(input: &[f32], params: SpeedParams, chunk_size: usize) -> Vec<f32> {
    let mut stream = SpeedStream::new(params);
    let mut output = Vec::new();
    for chunk in input.chunks(chunk_size) {
        stream.write(chunk).expect("write failed");
        output.extend_from_slice(&stream.read_all());
    }
    stream.flush().expect("flush failed");
    output.extend_from_slice(&stream.read_all());
    output
}
