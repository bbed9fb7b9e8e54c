use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::core::error::QueueError;
use crate::core::queue::sync::synchronize;
use crate::core::queue::Queue;

/// Triggers carried to the background worker.
///
/// `Enqueued` and `Dequeued` are edge-triggered, consumed exactly once per
/// raise. `Stop` is sticky: it is latched in an atomic flag as well, so it
/// stays observable no matter which signal the worker picks up next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Enqueued,
    Dequeued,
    Stop,
}

/// A buffering queue that migrates items between a fast in-memory buffer and
/// a slower overflow store.
///
/// Callers only ever touch the buffer; a dedicated background worker keeps the
/// buffer's resident count inside `[floor, ceiling]` by flushing the excess to
/// overflow after enqueues and replenishing from overflow after dequeues. The
/// two directions are event-driven, not polled, and each is attempted on the
/// signal most likely to have caused it; a condition the worker misses is
/// corrected on the next corresponding signal.
///
/// Dequeues never pull from overflow synchronously. A caller that drains the
/// buffer below what overflow could supply gets whatever the buffer held and
/// relies on the next background cycle to top the buffer back up.
pub struct BufferedQueue<T: Send + 'static> {
    buffer: Arc<dyn Queue<T>>,
    overflow: Arc<dyn Queue<T>>,
    floor: usize,
    ceiling: usize,
    signals: Sender<Signal>,
    inbox: Receiver<Signal>,
    stop: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> BufferedQueue<T> {
    /// Composes `buffer` and `overflow` with the given thresholds.
    ///
    /// Both queues pass through [`synchronize`] since the calling thread and
    /// the background worker both touch them. Fails if `floor >= ceiling` or
    /// if both handles refer to the same queue instance. With `auto_start`
    /// the worker launches immediately; otherwise call [`BufferedQueue::start`].
    pub fn new(
        buffer: Arc<dyn Queue<T>>,
        overflow: Arc<dyn Queue<T>>,
        floor: usize,
        ceiling: usize,
        auto_start: bool,
    ) -> Result<Self, QueueError> {
        if floor >= ceiling {
            return Err(QueueError::InvalidThresholds { floor, ceiling });
        }

        if std::ptr::addr_eq(Arc::as_ptr(&buffer), Arc::as_ptr(&overflow)) {
            return Err(QueueError::AliasedQueues);
        }

        let (signals, inbox) = crossbeam_channel::unbounded();

        let queue = Self {
            buffer: synchronize(buffer),
            overflow: synchronize(overflow),
            floor,
            ceiling,
            signals,
            inbox,
            stop: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        };

        if auto_start {
            queue.start();
        }

        Ok(queue)
    }

    /// Launches the background worker if it is not already running.
    pub fn start(&self) {
        let mut worker = self.worker.lock();

        if worker.is_some() {
            return;
        }

        let buffer = Arc::clone(&self.buffer);
        let overflow = Arc::clone(&self.overflow);
        let inbox = self.inbox.clone();
        let stop = Arc::clone(&self.stop);
        let (floor, ceiling) = (self.floor, self.ceiling);

        *worker = Some(
            std::thread::Builder::new()
                .name("duraq-buffer".into())
                .spawn(move || run_worker(&*buffer, &*overflow, floor, ceiling, &inbox, &stop))
                .expect("failed to spawn buffer worker thread"),
        );
    }

    /// Requests the worker perform one final flush of the buffer into the
    /// overflow store and exit. Sticky and idempotent; does not wait for the
    /// flush (dropping the queue joins the worker).
    pub fn stop(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            let _ = self.signals.send(Signal::Stop);
        }
    }
}

impl<T: Send + 'static> Queue<T> for BufferedQueue<T> {
    /// Sum of the buffer and overflow counts. Each query is individually
    /// consistent; the sum itself is not atomic across the two queues.
    fn count(&self) -> usize {
        self.buffer.count() + self.overflow.count()
    }

    fn is_synchronized(&self) -> bool {
        true
    }

    fn try_enqueue(&self, items: Vec<T>) -> Result<(), Vec<T>> {
        let result = self.buffer.try_enqueue(items);

        if result.is_ok() {
            let _ = self.signals.send(Signal::Enqueued);
        }

        result
    }

    fn try_dequeue(&self, max: usize) -> Option<Vec<T>> {
        let items = self.buffer.try_dequeue(max);

        // Raised even when the buffer came up short: replenishment is always
        // the worker's job, and an empty buffer is exactly when it is needed.
        let _ = self.signals.send(Signal::Dequeued);

        items
    }
}

impl<T: Send + 'static> Drop for BufferedQueue<T> {
    fn drop(&mut self) {
        self.stop();

        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
    }
}

/// The background mover loop: one signal-triggered step per iteration.
fn run_worker<T>(
    buffer: &dyn Queue<T>,
    overflow: &dyn Queue<T>,
    floor: usize,
    ceiling: usize,
    inbox: &Receiver<Signal>,
    stop: &AtomicBool,
) {
    loop {
        let Ok(mut signal) = inbox.recv() else {
            break;
        };

        if stop.load(Ordering::Acquire) {
            signal = Signal::Stop;
        }

        let count = buffer.count();

        match signal {
            Signal::Stop => {
                transfer(buffer, overflow, count);
                debug!(residue = count, "buffer worker stopping after final flush");
                break;
            }
            Signal::Enqueued => {
                transfer(buffer, overflow, count.saturating_sub(ceiling));
            }
            Signal::Dequeued => {
                transfer(overflow, buffer, floor.saturating_sub(count));
            }
        }
    }
}

/// Moves up to `max` items from `src` to `dst`; a no-op when `max` is zero or
/// the source turns out to be empty.
fn transfer<T>(src: &dyn Queue<T>, dst: &dyn Queue<T>, max: usize) {
    if max == 0 {
        return;
    }

    let Some(items) = src.try_dequeue(max) else {
        return;
    };

    let moved = items.len();

    match dst.try_enqueue(items) {
        Ok(()) => debug!(moved, "migrated items between buffer and overflow"),
        Err(items) => {
            // Put the batch back at the source's tail rather than lose it;
            // the next signal retries the migration.
            warn!(
                count = items.len(),
                "migration target rejected items; returning them to the source"
            );
            let _ = src.try_enqueue(items);
        }
    }
}
