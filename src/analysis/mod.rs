//! Signal analysis: pitch-period estimation.

pub mod pitch;

pub use pitch::PitchDetector;
