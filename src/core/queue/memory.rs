use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::core::queue::Queue;

/// A plain in-memory FIFO satisfying the queue contract.
///
/// Individual calls are internally consistent, but the queue reports itself
/// unsynchronized: callers sharing one instance across execution contexts
/// should pass it through [`crate::synchronize`] first.
#[derive(Debug, Default)]
pub struct MemoryQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> MemoryQueue<T> {
    /// Creates a new, empty queue.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Creates a queue pre-loaded with `items`, preserving their order.
    pub fn with_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        Self {
            items: Mutex::new(items.into_iter().collect()),
        }
    }
}

impl<T: Send> Queue<T> for MemoryQueue<T> {
    fn count(&self) -> usize {
        self.items.lock().len()
    }

    fn try_enqueue(&self, items: Vec<T>) -> Result<(), Vec<T>> {
        if items.is_empty() {
            return Err(items);
        }

        self.items.lock().extend(items);
        Ok(())
    }

    fn try_dequeue(&self, max: usize) -> Option<Vec<T>> {
        if max < 1 {
            return None;
        }

        let mut queue = self.items.lock();
        let take = queue.len().min(max);

        if take == 0 {
            return None;
        }

        Some(queue.drain(..take).collect())
    }
}
