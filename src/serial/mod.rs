//! Item serialization for database-backed queues.
//!
//! A queue stores one serialized payload per row; the payload kind (string or
//! byte blob) matches the storage schema's declared value column type. Codec
//! failures are reported as `None`, never as a panic: a queue skips items it
//! cannot encode and rows it cannot decode.

pub mod binary;
pub mod json;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use binary::BinarySerializer;
pub use json::JsonSerializer;

/// A serialized item, shaped by the storage schema's value column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Blob(Vec<u8>),
}

impl Payload {
    /// Size of the payload in bytes, as reported to the metrics sink.
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Blob(blob) => blob.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Encodes queue items to payloads and back.
///
/// Must be deterministic per item, and must not panic: both directions report
/// failure through `None`.
pub trait Serializer<T>: Send + Sync {
    fn try_serialize(&self, item: &T) -> Option<Payload>;

    fn try_deserialize(&self, payload: &Payload) -> Option<T>;
}

/// Wire format stored in the database value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    /// JSON text rows (human-readable, string-typed column).
    #[default]
    Json,
    /// bincode blob rows (compact, binary-typed column).
    Binary,
}

/// Creates the serializer matching `format`.
pub fn serializer_for<T>(format: SerializationFormat) -> Box<dyn Serializer<T>>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    match format {
        SerializationFormat::Json => Box::new(JsonSerializer::new()),
        SerializationFormat::Binary => Box::new(BinarySerializer::new()),
    }
}
