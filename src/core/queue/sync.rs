use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::queue::Queue;

/// Returns `queue` unchanged if it already reports itself synchronized,
/// otherwise wraps it in a [`SynchronizedQueue`].
pub fn synchronize<T: Send + 'static>(queue: Arc<dyn Queue<T>>) -> Arc<dyn Queue<T>> {
    if queue.is_synchronized() {
        queue
    } else {
        Arc::new(SynchronizedQueue::new(queue))
    }
}

/// A synchronized (thread-safe) queue decorator.
///
/// Forwards every contract operation, `count` included, while holding one
/// exclusive lock scoped to the call.
pub struct SynchronizedQueue<T> {
    inner: Arc<dyn Queue<T>>,
    lock: Mutex<()>,
}

impl<T: Send + 'static> SynchronizedQueue<T> {
    /// Wraps `inner`, serializing all access to it through one lock.
    pub fn new(inner: Arc<dyn Queue<T>>) -> Self {
        Self {
            inner,
            lock: Mutex::new(()),
        }
    }
}

impl<T: Send + 'static> Queue<T> for SynchronizedQueue<T> {
    fn count(&self) -> usize {
        let _guard = self.lock.lock();
        self.inner.count()
    }

    fn is_synchronized(&self) -> bool {
        true
    }

    fn try_enqueue(&self, items: Vec<T>) -> Result<(), Vec<T>> {
        let _guard = self.lock.lock();
        self.inner.try_enqueue(items)
    }

    fn try_dequeue(&self, max: usize) -> Option<Vec<T>> {
        let _guard = self.lock.lock();
        self.inner.try_dequeue(max)
    }
}
