//! Fire-and-forget throughput telemetry for database-backed queues.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Telemetry hooks reported once per stored or removed row.
///
/// Implementations must never block or fail; the queue calls them on its own
/// thread inside a transaction.
pub trait QueueMetrics: Send + Sync {
    fn on_enqueue(&self, success: bool, start: Instant, bytes: u64);

    fn on_dequeue(&self, success: bool, start: Instant, bytes: u64);
}

/// In-process metrics sink backed by coarse-grained atomic counters.
#[derive(Debug, Default)]
pub struct QueueCounters {
    enqueued: AtomicU64,
    enqueue_failures: AtomicU64,
    enqueue_micros: AtomicU64,
    enqueue_bytes: AtomicU64,
    dequeued: AtomicU64,
    dequeue_failures: AtomicU64,
    dequeue_micros: AtomicU64,
    dequeue_bytes: AtomicU64,
}

impl QueueCounters {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dequeued(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn enqueue_failures(&self) -> u64 {
        self.enqueue_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dequeue_failures(&self) -> u64 {
        self.dequeue_failures.load(Ordering::Relaxed)
    }

    /// Simple text format (Prometheus-style without HELP/TYPE lines).
    pub fn snapshot(&self) -> String {
        format!(
            "duraq_enqueued {}\nduraq_enqueue_failures {}\nduraq_enqueue_micros {}\nduraq_enqueue_bytes {}\nduraq_dequeued {}\nduraq_dequeue_failures {}\nduraq_dequeue_micros {}\nduraq_dequeue_bytes {}\n",
            self.enqueued.load(Ordering::Relaxed),
            self.enqueue_failures.load(Ordering::Relaxed),
            self.enqueue_micros.load(Ordering::Relaxed),
            self.enqueue_bytes.load(Ordering::Relaxed),
            self.dequeued.load(Ordering::Relaxed),
            self.dequeue_failures.load(Ordering::Relaxed),
            self.dequeue_micros.load(Ordering::Relaxed),
            self.dequeue_bytes.load(Ordering::Relaxed),
        )
    }
}

impl QueueMetrics for QueueCounters {
    fn on_enqueue(&self, success: bool, start: Instant, bytes: u64) {
        if success {
            self.enqueued.fetch_add(1, Ordering::Relaxed);
            self.enqueue_bytes.fetch_add(bytes, Ordering::Relaxed);
        } else {
            self.enqueue_failures.fetch_add(1, Ordering::Relaxed);
        }
        self.enqueue_micros
            .fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
    }

    fn on_dequeue(&self, success: bool, start: Instant, bytes: u64) {
        if success {
            self.dequeued.fetch_add(1, Ordering::Relaxed);
            self.dequeue_bytes.fetch_add(bytes, Ordering::Relaxed);
        } else {
            self.dequeue_failures.fetch_add(1, Ordering::Relaxed);
        }
        self.dequeue_micros
            .fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
    }
}
