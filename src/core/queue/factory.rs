use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::core::error::QueueError;
use crate::core::queue::blocking::BlockingQueue;
use crate::core::queue::buffered::BufferedQueue;
use crate::core::queue::memory::MemoryQueue;
use crate::core::queue::Queue;
use crate::store::DatabaseQueue;

/// Wires the standard composition from configuration: an in-memory buffer in
/// front of a SQLite overflow store, joined by a [`BufferedQueue`]. When the
/// `[blocking]` section is present, a [`BlockingQueue`] is layered on top so
/// callers get the configured capacity bound and retry timeout.
///
/// Items already present in the database file count toward [`Queue::count`]
/// and are served once the background worker replenishes the buffer.
pub fn open_buffered<T>(config: &Config) -> Result<Box<dyn Queue<T>>, QueueError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let buffer: Arc<dyn Queue<T>> = Arc::new(MemoryQueue::new());
    let overflow: Arc<dyn Queue<T>> = Arc::new(DatabaseQueue::sqlite(
        &config.storage.path,
        config.storage.format,
        None,
    )?);

    let buffered = BufferedQueue::new(
        buffer,
        overflow,
        config.buffer.floor,
        config.buffer.ceiling,
        config.buffer.auto_start,
    )?;

    Ok(match &config.blocking {
        Some(blocking) => Box::new(BlockingQueue::new(
            Box::new(buffered),
            blocking.capacity,
            Duration::from_millis(blocking.timeout_ms),
        )),
        None => Box::new(buffered),
    })
}
