//! The streaming speed-change driver.

pub mod processor;

pub use processor::SpeedStream;
