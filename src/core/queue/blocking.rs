use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::core::queue::Queue;
use crate::util::backoff::SpinYield;

/// A bounded, blocking queue decorator.
///
/// Enforces a maximum in-flight item count above the wrapped queue without
/// taking a foreground lock: two atomic admission counters decide whether an
/// operation may proceed before any data moves. Slots are reserved via
/// compare-and-swap; a dequeue reservation that the wrapped queue cannot yet
/// fill is released again and retried. Callers that cannot be admitted retry
/// until `timeout` elapses, then receive a normal "try later" failure.
///
/// Admission is first-come-first-served only to the extent the CAS retry loop
/// provides; there is no FIFO queue of waiters.
pub struct BlockingQueue<T> {
    inner: Box<dyn Queue<T>>,
    capacity: Option<u64>,
    timeout: Duration,
    enqueued: AtomicU64,
    dequeued: AtomicU64,
}

impl<T: Send + 'static> BlockingQueue<T> {
    /// Creates a bounded queue over an empty in-memory backing store.
    pub fn bounded(capacity: usize, timeout: Duration) -> Self {
        Self::new(
            Box::new(crate::core::queue::memory::MemoryQueue::new()),
            Some(capacity),
            timeout,
        )
    }

    /// Wraps `inner` with a capacity bound and a retry timeout.
    ///
    /// `capacity: None` means unbounded (only the empty-dequeue wait applies).
    /// The enqueued counter is seeded with the wrapped queue's starting count
    /// so that pre-existing items count against the capacity.
    pub fn new(inner: Box<dyn Queue<T>>, capacity: Option<usize>, timeout: Duration) -> Self {
        let seed = inner.count() as u64;

        Self {
            inner,
            capacity: capacity.map(|c| c as u64),
            timeout,
            enqueued: AtomicU64::new(seed),
            dequeued: AtomicU64::new(0),
        }
    }
}

impl<T: Send + 'static> Queue<T> for BlockingQueue<T> {
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn try_enqueue(&self, items: Vec<T>) -> Result<(), Vec<T>> {
        if items.is_empty() {
            return Err(items);
        }

        let count = items.len() as u64;
        let start = Instant::now();
        let mut backoff = SpinYield::new();

        loop {
            // `dequeued` first: `enqueued` only grows, so this snapshot can
            // never see `dequeued` ahead of `enqueued` and the subtraction
            // below cannot underflow.
            let dequeued = self.dequeued.load(Ordering::Acquire);
            let enqueued = self.enqueued.load(Ordering::Acquire);

            let admitted = match self.capacity {
                Some(capacity) => count <= capacity.saturating_sub(enqueued - dequeued),
                None => true,
            };

            if admitted
                && self
                    .enqueued
                    .compare_exchange(
                        enqueued,
                        enqueued + count,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    )
                    .is_ok()
            {
                // The slot is reserved: the wrapped queue refusing it now
                // means the admission counters have desynchronized from its
                // contents, which is unrecoverable.
                assert!(
                    self.inner.try_enqueue(items).is_ok(),
                    "wrapped queue rejected an admitted batch"
                );
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                return Err(items);
            }

            backoff.snooze();
        }
    }

    fn try_dequeue(&self, max: usize) -> Option<Vec<T>> {
        if max < 1 {
            return None;
        }

        let start = Instant::now();
        let mut backoff = SpinYield::new();

        loop {
            let dequeued = self.dequeued.load(Ordering::Acquire);
            let enqueued = self.enqueued.load(Ordering::Acquire);

            if dequeued != enqueued {
                let take = (enqueued - dequeued).min(max as u64);

                if self
                    .dequeued
                    .compare_exchange(
                        dequeued,
                        dequeued + take,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    )
                    .is_ok()
                {
                    // The counters run ahead of the wrapped queue: an
                    // enqueuer bumps `enqueued` before its batch lands, so a
                    // reservation can outpace what is actually present. A
                    // short or empty forwarded dequeue is that transient
                    // race, not divergence; release the unfilled part of the
                    // reservation and, if nothing arrived, retry.
                    match self.inner.try_dequeue(take as usize) {
                        Some(items) => {
                            let got = items.len() as u64;
                            if got < take {
                                self.dequeued.fetch_sub(take - got, Ordering::AcqRel);
                            }
                            return Some(items);
                        }
                        None => {
                            self.dequeued.fetch_sub(take, Ordering::AcqRel);
                        }
                    }
                }
            }

            if start.elapsed() >= self.timeout {
                return None;
            }

            backoff.snooze();
        }
    }
}
