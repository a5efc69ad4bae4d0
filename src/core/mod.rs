//! Core types and the sample queues the stream is built on.

pub mod queue;
pub mod types;

pub use queue::SampleQueue;
pub use types::*;
