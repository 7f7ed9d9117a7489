//! Merge patch application.

use super::patch::Patch;
use crate::fieldpath::{Path, PathElement};
use crate::value::{Map, Value};
use thiserror::Error;

/// PatchError is returned when a patch cannot be applied.
///
/// Documents produced by the encoder never trigger it. The comparator
/// returns it for hand-built documents holding a NaN or infinite number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
    #[error("{path}: number {value} cannot be represented in a document")]
    NonFiniteNumber { path: Path, value: f64 },
}

/// Applies a merge patch to `target`, returning the patched document.
///
/// `target` is left untouched; the result shares nothing with it.
pub fn apply(target: &Value, patch: &Patch) -> Result<Value, PatchError> {
    apply_value(Some(target), patch.as_value(), &mut Path::new())
}

fn apply_value(target: Option<&Value>, patch: &Value, path: &mut Path) -> Result<Value, PatchError> {
    let entries = match patch {
        Value::Map(entries) => entries,
        other => {
            check_representable(other, path)?;
            return Ok(other.clone());
        }
    };

    let mut result = match target {
        Some(Value::Map(fields)) => fields.clone(),
        _ => Map::new(),
    };

    for (key, value) in entries.iter() {
        let existing = result.delete(key);
        if value.is_null() {
            continue;
        }
        path.push(PathElement::field_name(key.as_str()));
        let patched = apply_value(existing.as_ref(), value, path);
        path.pop();
        result.set(key.as_str(), patched?);
    }

    Ok(Value::Map(result))
}

/// Rejects documents carrying a NaN or infinite number.
pub(crate) fn ensure_representable(value: &Value) -> Result<(), PatchError> {
    check_representable(value, &mut Path::new())
}

fn check_representable(value: &Value, path: &mut Path) -> Result<(), PatchError> {
    match value {
        Value::Float(f) if !f.is_finite() => Err(PatchError::NonFiniteNumber {
            path: path.clone(),
            value: *f,
        }),
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(PathElement::index(i));
                let checked = check_representable(item, path);
                path.pop();
                checked?;
            }
            Ok(())
        }
        Value::Map(fields) => {
            for (key, item) in fields.iter() {
                path.push(PathElement::field_name(key.as_str()));
                let checked = check_representable(item, path);
                path.pop();
                checked?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::diff;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    fn doc(json: &str) -> Value {
        from_json(json).unwrap()
    }

    fn patch(json: &str) -> Patch {
        Patch::from_value(doc(json))
    }

    #[test]
    fn test_apply_sets_and_removes_keys() {
        let target = doc(r#"{"a": 1, "b": 2, "c": {"d": 3, "e": 4}}"#);
        let result = apply(&target, &patch(r#"{"b": null, "c": {"d": 30}, "f": true}"#)).unwrap();
        assert_eq!(result, doc(r#"{"a": 1, "c": {"d": 30, "e": 4}, "f": true}"#));
    }

    #[test]
    fn test_apply_does_not_mutate_target() {
        let target = doc(r#"{"a": 1, "nested": {"b": 2}}"#);
        let before = target.clone();
        let result = apply(&target, &patch(r#"{"a": null, "nested": {"b": 3}}"#)).unwrap();
        assert_eq!(target, before);
        assert_ne!(result, target);
    }

    #[test]
    fn test_non_map_patch_replaces_target() {
        let target = doc(r#"{"a": 1}"#);
        assert_eq!(apply(&target, &patch("[1, 2]")).unwrap(), doc("[1, 2]"));
        assert_eq!(apply(&target, &patch("null")).unwrap(), Value::Null);
    }

    #[test]
    fn test_map_patch_onto_non_map_target() {
        let target = doc("[1, 2]");
        let result = apply(&target, &patch(r#"{"a": {"b": null, "c": 1}}"#)).unwrap();
        assert_eq!(result, doc(r#"{"a": {"c": 1}}"#));
    }

    #[test]
    fn test_apply_empty_patch_is_identity() {
        let target = doc(r#"{"a": [1, {"b": null}], "c": "x"}"#);
        assert_eq!(apply(&target, &diff(&target, &target)).unwrap(), target);
    }

    #[test]
    fn test_non_finite_number_is_rejected() {
        let mut inner = Map::new();
        inner.set("ratio", Value::List(vec![Value::Int(1), Value::Float(f64::NAN)]));
        let mut outer = Map::new();
        outer.set("spec", Value::Map(inner));

        let err = apply(&Value::Null, &Patch::from_value(Value::Map(outer))).unwrap_err();
        match &err {
            PatchError::NonFiniteNumber { path, value } => {
                assert_eq!(path.to_string(), ".spec.ratio[1]");
                assert!(value.is_nan());
            }
        }
        assert!(err.to_string().starts_with(".spec.ratio[1]: number NaN"));
    }

    #[test]
    fn test_non_finite_root_patch_is_rejected() {
        let err = apply(&Value::Null, &Patch::from_value(Value::Float(f64::INFINITY))).unwrap_err();
        assert_eq!(err.to_string(), ".: number inf cannot be represented in a document");
    }
}
