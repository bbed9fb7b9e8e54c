use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::serial::{Payload, Serializer};

/// Serializes items to JSON text payloads and back.
#[derive(Debug, Default)]
pub struct JsonSerializer<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> JsonSerializer<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Serializer<T> for JsonSerializer<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn try_serialize(&self, item: &T) -> Option<Payload> {
        serde_json::to_string(item).ok().map(Payload::Text)
    }

    fn try_deserialize(&self, payload: &Payload) -> Option<T> {
        match payload {
            Payload::Text(text) => serde_json::from_str(text).ok(),
            Payload::Blob(_) => None,
        }
    }
}
