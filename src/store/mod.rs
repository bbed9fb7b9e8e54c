//! Transactional, database-backed queue storage.
//!
//! [`DatabaseQueue`] is the base every concrete backing database plugs into:
//! the SQL dialect is injected as a [`schema::StorageSchema`] and the row
//! codec as a [`crate::serial::Serializer`]. Bulk insert and select-and-delete
//! each run inside one transaction; the resident count is maintained
//! incrementally and only adjusted for committed transactions.

pub mod schema;
pub mod sqlite;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, ToSql};
use tracing::warn;

use crate::core::error::QueueError;
use crate::core::queue::Queue;
use crate::metrics::QueueMetrics;
use crate::serial::{Payload, Serializer};
use crate::store::schema::StorageSchema;

impl ToSql for Payload {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Payload::Text(text) => ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes())),
            Payload::Blob(blob) => ToSqlOutput::Borrowed(ValueRef::Blob(blob)),
        })
    }
}

/// A queue backed by one table of a relational store.
///
/// Atomicity comes from the connection's own transactions; the queue adds no
/// cross-call locking of its own and reports itself unsynchronized, so
/// concurrent callers on one instance should go through
/// [`crate::synchronize`].
pub struct DatabaseQueue<T> {
    conn: Mutex<Connection>,
    schema: Box<dyn StorageSchema>,
    serializer: Box<dyn Serializer<T>>,
    metrics: Option<Arc<dyn QueueMetrics>>,
    count: AtomicUsize,
}

impl<T> DatabaseQueue<T> {
    /// Opens a queue over `conn`.
    ///
    /// Ensures the backing table exists (probing first when
    /// `check_table_exists` is set, which saves a failed create on engines
    /// without `IF NOT EXISTS`), then seeds the resident count with one
    /// execution of the schema's count command.
    pub fn open(
        conn: Connection,
        schema: Box<dyn StorageSchema>,
        serializer: Box<dyn Serializer<T>>,
        check_table_exists: bool,
        metrics: Option<Arc<dyn QueueMetrics>>,
    ) -> Result<Self, QueueError> {
        ensure_table(&conn, &*schema, check_table_exists)?;

        let count: i64 = conn.query_row(schema.count_sql(), [], |row| row.get(0))?;

        Ok(Self {
            conn: Mutex::new(conn),
            schema,
            serializer,
            metrics,
            count: AtomicUsize::new(count as usize),
        })
    }

    /// Closes the connection. Dropping the queue has the same effect; this
    /// form surfaces close errors instead of discarding them.
    pub fn close(self) -> Result<(), QueueError> {
        self.conn
            .into_inner()
            .close()
            .map_err(|(_, err)| err.into())
    }

    fn insert_all(&self, conn: &mut Connection, items: &[T]) -> rusqlite::Result<usize> {
        let tx = conn.transaction()?;
        let mut rows = 0;

        {
            let mut insert = tx.prepare(self.schema.insert_sql())?;

            for item in items {
                let start = Instant::now();

                // An item the codec rejects is skipped outright; it must not
                // reach the table as a stale or garbage row.
                let Some(payload) = self.serializer.try_serialize(item) else {
                    self.report_enqueue(false, start, 0);
                    continue;
                };

                let bytes = payload.len() as u64;

                if insert.execute(params![payload])? == 1 {
                    rows += 1;
                    self.report_enqueue(true, start, bytes);
                }
            }
        }

        tx.commit()?;
        Ok(rows)
    }

    fn select_and_delete(&self, conn: &mut Connection, max: usize) -> rusqlite::Result<Vec<T>> {
        let tx = conn.transaction()?;
        let mut keys: Vec<i64> = Vec::new();
        let mut items: Vec<T> = Vec::new();

        {
            let mut select = tx.prepare(&self.schema.select_sql(max))?;
            let mut rows = select.query([])?;

            while let Some(row) = rows.next()? {
                let start = Instant::now();
                let key: i64 = row.get(self.schema.key().ordinal)?;

                let payload = match row.get_ref(self.schema.value().ordinal)? {
                    ValueRef::Text(text) => {
                        Payload::Text(String::from_utf8_lossy(text).into_owned())
                    }
                    ValueRef::Blob(blob) => Payload::Blob(blob.to_vec()),
                    _ => {
                        self.report_dequeue(false, start, 0);
                        continue;
                    }
                };

                // A row that fails to decode stays in the store: its key is
                // never scheduled for deletion and it is not returned.
                let Some(item) = self.serializer.try_deserialize(&payload) else {
                    self.report_dequeue(false, start, payload.len() as u64);
                    continue;
                };

                keys.push(key);
                items.push(item);
                self.report_dequeue(true, start, payload.len() as u64);
            }
        }

        if !keys.is_empty() {
            tx.execute(
                &self.schema.delete_sql(keys.len()),
                rusqlite::params_from_iter(keys.iter()),
            )?;
        }

        tx.commit()?;
        Ok(items)
    }

    fn report_enqueue(&self, success: bool, start: Instant, bytes: u64) {
        if let Some(metrics) = &self.metrics {
            metrics.on_enqueue(success, start, bytes);
        }
    }

    fn report_dequeue(&self, success: bool, start: Instant, bytes: u64) {
        if let Some(metrics) = &self.metrics {
            metrics.on_dequeue(success, start, bytes);
        }
    }
}

impl<T: Send + Sync> Queue<T> for DatabaseQueue<T> {
    /// The resident count, maintained incrementally rather than re-queried.
    fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// One transaction inserting one row per item that serializes.
    ///
    /// Returns `Ok` only when every input item produced a row. When some items
    /// fail to serialize the call returns `Err` with the whole batch handed
    /// back, yet the rows for the items that did serialize stay committed —
    /// re-enqueuing the returned batch inserts those items a second time.
    /// This mirrors the long-standing store behavior; callers that need
    /// all-or-nothing semantics must deduplicate on their side.
    fn try_enqueue(&self, items: Vec<T>) -> Result<(), Vec<T>> {
        if items.is_empty() {
            return Err(items);
        }

        let mut conn = self.conn.lock();

        match self.insert_all(&mut conn, &items) {
            Ok(rows) => {
                self.count.fetch_add(rows, Ordering::Relaxed);

                if rows == items.len() {
                    Ok(())
                } else {
                    Err(items)
                }
            }
            Err(err) => {
                warn!(error = %err, table = self.schema.table(), "enqueue transaction rolled back");
                Err(items)
            }
        }
    }

    /// One transaction reading up to `max` rows and deleting exactly the rows
    /// it returns. Rows that fail to decode are left in place.
    fn try_dequeue(&self, max: usize) -> Option<Vec<T>> {
        if max < 1 {
            return None;
        }

        let mut conn = self.conn.lock();

        match self.select_and_delete(&mut conn, max) {
            Ok(items) => {
                self.count.fetch_sub(items.len(), Ordering::Relaxed);
                (!items.is_empty()).then_some(items)
            }
            Err(err) => {
                warn!(error = %err, table = self.schema.table(), "dequeue transaction rolled back");
                None
            }
        }
    }
}

fn ensure_table(
    conn: &Connection,
    schema: &dyn StorageSchema,
    check_table_exists: bool,
) -> Result<(), QueueError> {
    if check_table_exists {
        let tables: i64 = conn.query_row(schema.table_exists_sql(), [], |row| row.get(0))?;

        if tables > 0 {
            return Ok(());
        }
    }

    conn.execute(schema.create_table_sql(), [])?;
    Ok(())
}
