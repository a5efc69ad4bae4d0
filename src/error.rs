//! Error types for the presto crate.

use std::fmt;

/// Errors that can occur while queueing or producing samples.
///
/// The engine has a single failure mode: a sample queue that cannot grow,
/// either because the allocator refused the request or because the stream
/// was configured with a queue limit and the request would exceed it. Both
/// are recoverable. The stream keeps its invariants, the failing operation
/// emits nothing, and the caller may drain the output queue and try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeedError {
    /// The allocator refused to grow a queue.
    QueueGrowth {
        /// Which queue failed to grow.
        queue: &'static str,
        /// Additional samples the queue needed room for.
        requested: usize,
    },
    /// Growing a queue would exceed the configured limit.
    QueueLimit {
        /// Which queue hit its limit.
        queue: &'static str,
        /// Additional samples the queue needed room for.
        requested: usize,
        /// The configured cap in samples.
        limit: usize,
    },
}

impl fmt::Display for SpeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedError::QueueGrowth { queue, requested } => {
                write!(
                    f,
                    "{} queue failed to grow by {} samples: out of memory",
                    queue, requested
                )
            }
            SpeedError::QueueLimit {
                queue,
                requested,
                limit,
            } => {
                write!(
                    f,
                    "{} queue cannot take {} more samples: limit is {}",
                    queue, requested, limit
                )
            }
        }
    }
}

impl std::error::Error for SpeedError {}
