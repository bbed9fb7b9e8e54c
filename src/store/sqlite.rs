use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::QueueError;
use crate::metrics::QueueMetrics;
use crate::serial::{serializer_for, SerializationFormat};
use crate::store::schema::SqliteSchema;
use crate::store::DatabaseQueue;

impl<T> DatabaseQueue<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Opens a queue over a SQLite database file, creating it if needed.
    ///
    /// `format` picks both the row codec and the value column type (`text`
    /// for JSON, `blob` for binary). SQLite supports `CREATE TABLE IF NOT
    /// EXISTS`, so no separate existence probe is made.
    pub fn sqlite<P: AsRef<Path>>(
        path: P,
        format: SerializationFormat,
        metrics: Option<Arc<dyn QueueMetrics>>,
    ) -> Result<Self, QueueError> {
        let conn = Connection::open(path)?;

        DatabaseQueue::open(
            conn,
            Box::new(SqliteSchema::new(format)),
            serializer_for(format),
            false,
            metrics,
        )
    }
}
