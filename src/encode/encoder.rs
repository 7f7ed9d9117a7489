//! Canonical encoding of serializable values.

use super::zero::Zero;
use crate::value::Value;
use serde::Serialize;
use thiserror::Error;

/// ZeroPolicy controls which zero-valued fields are left out of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroPolicy {
    /// Trust the type: only fields it skips through its serde attributes
    /// are absent. An unskipped `None` encodes as an explicit `null`.
    #[default]
    Declared,
    /// Additionally drop every map entry holding a zero value, recursively.
    /// Map entries that become empty once their own entries are dropped go
    /// too. List elements are kept.
    OmitEmpty,
}

/// EncodeError is returned when a value has no document form.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Encodes a value with [`ZeroPolicy::Declared`].
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Value, EncodeError> {
    encode_with(value, ZeroPolicy::Declared)
}

/// Encodes a value into a document under the given zero policy.
pub fn encode_with<T: Serialize + ?Sized>(
    value: &T,
    policy: ZeroPolicy,
) -> Result<Value, EncodeError> {
    let encoded = Value::from(serde_json::to_value(value)?);
    Ok(match policy {
        ZeroPolicy::Declared => encoded,
        ZeroPolicy::OmitEmpty => omit_empty(encoded),
    })
}

/// Applies [`ZeroPolicy::OmitEmpty`] to an already-built document.
pub fn omit_empty(value: Value) -> Value {
    match value {
        Value::Map(map) => Value::Map(
            map.into_iter()
                .filter_map(|(key, value)| {
                    let value = omit_empty(value);
                    if value.is_zero() {
                        None
                    } else {
                        Some((key, value))
                    }
                })
                .collect(),
        ),
        Value::List(items) => Value::List(items.into_iter().map(omit_empty).collect()),
        other => other,
    }
}
