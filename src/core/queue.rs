//! Growable FIFO queues of samples.

use crate::core::types::Sample;
use crate::error::SpeedError;

/// An appendable contiguous queue of samples.
///
/// The queue grows by the old capacity plus half again plus the requested
/// count, and never shrinks. Consumed samples are dropped from the front by
/// shifting the suffix down, which keeps the stored run contiguous so the
/// pitch detector and the mutators can borrow it as a plain slice.
///
/// Growth is fallible: allocator refusal and the optional sample limit both
/// surface as [`SpeedError`] before any stored sample is touched.
#[derive(Debug)]
pub struct SampleQueue {
    name: &'static str,
    data: Vec<Sample>,
    limit: Option<usize>,
}

impl SampleQueue {
    /// Creates a queue with an initial capacity and an optional sample cap.
    ///
    /// The name identifies the queue in error reports.
    pub fn with_capacity(name: &'static str, capacity: usize, limit: Option<usize>) -> Self {
        Self {
            name,
            data: Vec::with_capacity(capacity),
            limit,
        }
    }

    /// Returns the number of queued samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true when no samples are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the current capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Borrows the queued samples, oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[Sample] {
        &self.data
    }

    /// Discards all queued samples, keeping the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Ensures room for `additional` more samples without changing contents.
    ///
    /// A failed growth leaves the queue exactly as it was, so callers can
    /// reserve the full size of an emission up front and then fill it with
    /// infallible [`push`](Self::push) calls.
    pub fn grow_for(&mut self, additional: usize) -> Result<(), SpeedError> {
        let required = self.data.len() + additional;
        if let Some(limit) = self.limit {
            if required > limit {
                return Err(SpeedError::QueueLimit {
                    queue: self.name,
                    requested: additional,
                    limit,
                });
            }
        }
        if required <= self.data.capacity() {
            return Ok(());
        }
        let target = self.data.capacity() + self.data.capacity() / 2 + additional;
        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|_| SpeedError::QueueGrowth {
                queue: self.name,
                requested: additional,
            })
    }

    /// Appends one sample into space obtained from [`grow_for`](Self::grow_for).
    #[inline]
    pub fn push(&mut self, sample: Sample) {
        debug_assert!(
            self.data.len() < self.data.capacity(),
            "push into {} queue without reserved space",
            self.name
        );
        self.data.push(sample);
    }

    /// Appends a slice of samples, growing the queue if needed.
    pub fn append(&mut self, samples: &[Sample]) -> Result<(), SpeedError> {
        if samples.is_empty() {
            return Ok(());
        }
        self.grow_for(samples.len())?;
        self.data.extend_from_slice(samples);
        Ok(())
    }

    /// Appends `count` zero samples, growing the queue if needed.
    pub fn append_zeros(&mut self, count: usize) -> Result<(), SpeedError> {
        self.grow_for(count)?;
        self.data.resize(self.data.len() + count, 0.0);
        Ok(())
    }

    /// Drops the first `count` samples, shifting the suffix down.
    pub fn drop_front(&mut self, count: usize) {
        let count = count.min(self.data.len());
        if count > 0 {
            self.data.drain(..count);
        }
    }

    /// Copies up to `out.len()` samples from the front into `out`, drops
    /// them, and returns the count copied. Zero means the queue was empty.
    pub fn read_into(&mut self, out: &mut [Sample]) -> usize {
        let count = out.len().min(self.data.len());
        if count == 0 {
            return 0;
        }
        out[..count].copy_from_slice(&self.data[..count]);
        self.drop_front(count);
        count
    }
}
