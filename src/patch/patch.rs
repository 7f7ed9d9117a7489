//! The merge patch document.

use crate::value::{self, Value};
use std::fmt;

/// Patch is a merge patch document.
///
/// A map patch updates the target key by key, with `null` meaning "remove
/// this key". Any other patch replaces the target wholesale. Merge patches
/// cannot express "set this key to null": both read as a removal.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch(Value);

impl Patch {
    /// Wraps a document as a patch.
    pub fn from_value(value: Value) -> Self {
        Patch(value)
    }

    /// Returns true for the empty map patch, which changes nothing.
    pub fn is_empty(&self) -> bool {
        matches!(&self.0, Value::Map(m) if m.is_empty())
    }

    /// Returns the patch document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the patch and returns the patch document.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Patch {
    fn from(value: Value) -> Self {
        Patch(value)
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = value::to_json(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
