//! Pluggable encoding of domain ops.

use std::fmt;
use std::marker::PhantomData;

use multilog_core::errors::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Converts one domain op to and from a JSON value.
pub trait DomainCodec<D>: Send + Sync {
    fn encode(&self, op: &D) -> Result<Value, CodecError>;

    fn decode(&self, value: Value) -> Result<D, CodecError>;
}

/// Codec for any serde type, using its own `Serialize`/`Deserialize` impls.
pub struct JsonCodec<D> {
    _marker: PhantomData<fn() -> D>,
}

impl<D> JsonCodec<D> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<D> Default for JsonCodec<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for JsonCodec<D> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for JsonCodec<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonCodec")
    }
}

impl<D: Serialize + DeserializeOwned> DomainCodec<D> for JsonCodec<D> {
    fn encode(&self, op: &D) -> Result<Value, CodecError> {
        Ok(serde_json::to_value(op)?)
    }

    fn decode(&self, value: Value) -> Result<D, CodecError> {
        Ok(serde_json::from_value(value)?)
    }
}
