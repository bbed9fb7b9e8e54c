//! The queue contract and its implementations.
//!
//! Every queue-like component in this crate satisfies one trait, so behaviors
//! compose as decorators instead of a type hierarchy:
//!
//! - [`memory::MemoryQueue`] – plain FIFO, the default foreground buffer
//! - [`sync::SynchronizedQueue`] – serializes all access through one lock
//! - [`blocking::BlockingQueue`] – capacity bound enforced by lock-free counters
//! - [`buffered::BufferedQueue`] – RAM buffer + overflow store with a
//!   background mover thread
//!
//! The SQLite-backed [`crate::store::DatabaseQueue`] satisfies the same trait.

pub mod blocking;
pub mod buffered;
pub mod factory;
pub mod memory;
pub mod sync;

/// Trait representing the common interface for all queue implementations.
///
/// Operations are batched and non-throwing: expected conditions (empty batch,
/// nothing to dequeue, capacity exceeded) surface as `Err`/`None`, never as a
/// panic. Panics are reserved for internal-consistency faults.
pub trait Queue<T>: Send + Sync {
    /// Number of items currently held by the queue.
    fn count(&self) -> usize;

    /// Whether all contract operations already share one exclusion domain.
    ///
    /// [`sync::synchronize`] consults this to avoid double-wrapping.
    fn is_synchronized(&self) -> bool {
        false
    }

    /// Enqueue a batch of items (fan-in).
    ///
    /// An empty batch fails without side effects. On failure the batch is
    /// handed back to the caller unchanged.
    fn try_enqueue(&self, items: Vec<T>) -> Result<(), Vec<T>>;

    /// Dequeue up to `max` items (fan-out).
    ///
    /// `max < 1` always fails. A `Some` result is never empty; the returned
    /// items are removed from the queue in backing-iteration order.
    fn try_dequeue(&self, max: usize) -> Option<Vec<T>>;
}
