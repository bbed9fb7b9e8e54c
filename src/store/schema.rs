use crate::serial::SerializationFormat;

/// One column of a queue table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageColumn {
    pub ordinal: usize,
    pub name: String,
    pub sql_type: String,
}

impl StorageColumn {
    pub fn new(ordinal: usize, name: &str, sql_type: &str) -> Self {
        Self {
            ordinal,
            name: name.to_owned(),
            sql_type: sql_type.to_owned(),
        }
    }
}

/// Describes the one logical table a database-backed queue operates against:
/// its name, its key and value columns, and the parameterized command text
/// for every statement the queue issues.
///
/// Constructed once per queue instance at open time and immutable thereafter.
/// The bounded select is the one dialect-specific piece (`LIMIT` vs `TOP`
/// style), which is why it is a method rather than fixed text.
pub trait StorageSchema: Send + Sync {
    fn table(&self) -> &str;

    /// Key column: ordinal 0, auto-incrementing integer identity.
    fn key(&self) -> &StorageColumn;

    /// Value column: ordinal 1, string- or binary-typed per the wire format.
    fn value(&self) -> &StorageColumn;

    /// Single-row insert with one value parameter.
    fn insert_sql(&self) -> &str;

    /// Bulk delete by key; the parameter list length matches `keys`.
    fn delete_sql(&self, keys: usize) -> String;

    fn count_sql(&self) -> &str;

    fn create_table_sql(&self) -> &str;

    /// Scalar probe returning the number of matching tables (0 or 1).
    fn table_exists_sql(&self) -> &str;

    /// Select of at most `max` rows in row-insertion order.
    fn select_sql(&self, max: usize) -> String;
}

/// The SQLite dialect of [`StorageSchema`].
#[derive(Debug)]
pub struct SqliteSchema {
    table: String,
    key: StorageColumn,
    value: StorageColumn,
    insert: String,
    count: String,
    create: String,
    exists: String,
}

impl SqliteSchema {
    /// Schema over the default table name, `queue`.
    pub fn new(format: SerializationFormat) -> Self {
        Self::with_table("queue", format)
    }

    /// JSON rows live in a `text` column, binary rows in a `blob` column.
    pub fn with_table(table: &str, format: SerializationFormat) -> Self {
        let value_type = match format {
            SerializationFormat::Json => "text",
            SerializationFormat::Binary => "blob",
        };

        let key = StorageColumn::new(0, "id", "integer");
        let value = StorageColumn::new(1, "value", value_type);

        Self {
            insert: format!("INSERT INTO {table}({}) VALUES(?1)", value.name),
            count: format!("SELECT COUNT({}) FROM {table}", key.name),
            create: format!(
                "CREATE TABLE IF NOT EXISTS {table}({} {} primary key autoincrement, {} {})",
                key.name, key.sql_type, value.name, value.sql_type
            ),
            exists: format!(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '{table}'"
            ),
            table: table.to_owned(),
            key,
            value,
        }
    }
}

impl StorageSchema for SqliteSchema {
    fn table(&self) -> &str {
        &self.table
    }

    fn key(&self) -> &StorageColumn {
        &self.key
    }

    fn value(&self) -> &StorageColumn {
        &self.value
    }

    fn insert_sql(&self) -> &str {
        &self.insert
    }

    fn delete_sql(&self, keys: usize) -> String {
        let params = vec!["?"; keys].join(", ");
        format!(
            "DELETE FROM {} WHERE {} IN ({params})",
            self.table, self.key.name
        )
    }

    fn count_sql(&self) -> &str {
        &self.count
    }

    fn create_table_sql(&self) -> &str {
        &self.create
    }

    fn table_exists_sql(&self) -> &str {
        &self.exists
    }

    fn select_sql(&self, max: usize) -> String {
        format!(
            "SELECT {}, {} FROM {} ORDER BY {} LIMIT {max}",
            self.key.name, self.value.name, self.table, self.key.name
        )
    }
}
