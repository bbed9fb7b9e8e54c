use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::serial::{Payload, Serializer};

/// Serializes items to compact bincode blob payloads and back.
#[derive(Debug, Default)]
pub struct BinarySerializer<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> BinarySerializer<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Serializer<T> for BinarySerializer<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn try_serialize(&self, item: &T) -> Option<Payload> {
        bincode::serialize(item).ok().map(Payload::Blob)
    }

    fn try_deserialize(&self, payload: &Payload) -> Option<T> {
        match payload {
            Payload::Blob(blob) => bincode::deserialize(blob).ok(),
            Payload::Text(_) => None,
        }
    }
}
