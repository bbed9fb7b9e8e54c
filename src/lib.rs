//! duraq – composable durable queues behind one contract.
//!
//! This crate exports
//!  * `core`    – the queue contract and its in-memory, blocking and buffered
//!                implementations
//!  * `store`   – the transactional SQLite-backed queue
//!  * `serial`  – pluggable item serializers (JSON / binary)
//!  * `metrics` – fire-and-forget throughput counters
//!  * `config`  – TOML-driven runtime configuration
//!
//! Queues compose as decorators: wrap a [`MemoryQueue`] in a [`BlockingQueue`]
//! for a capacity bound, pair it with a [`DatabaseQueue`] inside a
//! [`BufferedQueue`] for transparent RAM/disk buffering, or call
//! [`synchronize`] to make any of them safe for concurrent callers.

// ───────────────────────────────────────────────────────────
// Public modules
// ───────────────────────────────────────────────────────────
pub mod config;
pub mod core;
pub mod logging;
pub mod metrics;
pub mod serial;
pub mod store;

pub(crate) mod util;

// ───────────────────────────────────────────────────────────
// Re-exports
// ───────────────────────────────────────────────────────────
pub use crate::config::{load_config, Config};
pub use crate::core::error::QueueError;
pub use crate::core::queue::blocking::BlockingQueue;
pub use crate::core::queue::buffered::BufferedQueue;
pub use crate::core::queue::factory::open_buffered;
pub use crate::core::queue::memory::MemoryQueue;
pub use crate::core::queue::sync::{synchronize, SynchronizedQueue};
pub use crate::core::queue::Queue;
pub use crate::metrics::{QueueCounters, QueueMetrics};
pub use crate::serial::{serializer_for, Payload, SerializationFormat, Serializer};
pub use crate::store::schema::{SqliteSchema, StorageColumn, StorageSchema};
pub use crate::store::DatabaseQueue;
