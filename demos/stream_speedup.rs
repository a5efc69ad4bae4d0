//! Streaming speed-change example.
//!
//! Simulates a playback path that feeds fixed-size buffers through a
//! [`SpeedStream`] and drains whatever is ready after each write, first
//! speeding speech-band audio up, then slowing it down.
//!
//! Run with: cargo run --example stream_speedup
//! Set RUST_LOG=debug to watch the stream's internal decisions.

use std::f32::consts::PI;

use presto::{SpeedParams, SpeedStream};

fn main() {
    env_logger::init();

    let sample_rate = 16000u32;
    let input = generate_voice_like(sample_rate, 3.0);

    println!("=== Streaming Speed Change Demo ===\n");

    for &speed in &[1.5f64, 0.75] {
        println!("Speed {}x:", speed);
        let params = SpeedParams::new(speed).with_sample_rate(sample_rate);
        let mut stream = SpeedStream::new(params);
        println!(
            "  lookahead: {} samples ({:.1} ms)",
            stream.latency_samples(),
            stream.latency_samples() as f64 * 1000.0 / sample_rate as f64
        );

        let chunk_size = 1024;
        let mut buf = vec![0.0f32; 4096];
        let mut total_output = 0usize;

        for chunk in input.chunks(chunk_size) {
            stream.write(chunk).expect("write failed");
            loop {
                let ready = stream.read(&mut buf);
                if ready == 0 {
                    break;
                }
                // A real player would hand buf[..ready] to the device here.
                total_output += ready;
            }
        }
        stream.flush().expect("flush failed");
        total_output += stream.read_all().len();

        println!(
            "  input:  {} samples ({:.2}s)",
            input.len(),
            input.len() as f64 / sample_rate as f64
        );
        println!(
            "  output: {} samples ({:.2}s, expected ~{:.2}s)\n",
            total_output,
            total_output as f64 / sample_rate as f64,
            input.len() as f64 / speed / sample_rate as f64
        );
    }
}

/// Generates a voice-like test signal: a 140 Hz fundamental with a pair of
/// formant-ish overtones and a slow amplitude contour.
fn generate_voice_like(sample_rate: u32, duration_secs: f64) -> Vec<f32> {
    let num_samples = (duration_secs * sample_rate as f64) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let envelope = 0.6 + 0.4 * (2.0 * PI * 0.8 * t).sin();
            let fundamental = (2.0 * PI * 140.0 * t).sin();
            let overtones =
                0.4 * (2.0 * PI * 280.0 * t).sin() + 0.2 * (2.0 * PI * 560.0 * t).sin();
            0.5 * envelope * (fundamental + overtones)
        })
        .collect()
}
