//! Merge patch generation.

use super::patch::Patch;
use crate::value::{Map, Value};

/// AbsentFields decides what a key present only in the old document means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AbsentFields {
    /// The key was removed: the patch carries `key: null`.
    #[default]
    Remove,
    /// The key was never requested: the patch leaves it alone. Only an
    /// explicit `null` in the new document removes a key.
    Keep,
}

/// Computes the merge patch that turns `old` into `new`.
///
/// Keys present in `old` but absent from `new` are removed by the patch.
pub fn diff(old: &Value, new: &Value) -> Patch {
    diff_with(old, new, AbsentFields::Remove)
}

/// Computes the merge patch from `old` to `new`, treating keys missing from
/// `new` as `absent` says.
///
/// Maps are diffed key by key. Lists and scalars are never diffed element by
/// element: when `old` and `new` are not both maps the patch is `new` itself.
pub fn diff_with(old: &Value, new: &Value, absent: AbsentFields) -> Patch {
    Patch::from_value(diff_value(old, new, absent))
}

fn diff_value(old: &Value, new: &Value, absent: AbsentFields) -> Value {
    match (old, new) {
        (Value::Map(old), Value::Map(new)) => Value::Map(diff_maps(old, new, absent)),
        _ => new.clone(),
    }
}

fn diff_maps(old: &Map, new: &Map, absent: AbsentFields) -> Map {
    let mut patch = Map::new();

    for (key, new_value) in new.iter() {
        match old.get(key) {
            None => patch.set(key.as_str(), new_value.clone()),
            Some(old_value) if old_value == new_value => {}
            Some(old_value) => {
                let sub_patch = diff_value(old_value, new_value, absent);
                // Unequal maps can still yield nothing when every difference
                // is a kept absent key.
                let both_maps = old_value.is_map() && new_value.is_map();
                if !(both_maps && matches!(&sub_patch, Value::Map(m) if m.is_empty())) {
                    patch.set(key.as_str(), sub_patch);
                }
            }
        }
    }

    if absent == AbsentFields::Remove {
        for key in old.keys() {
            if !new.has(key) {
                patch.set(key.as_str(), Value::Null);
            }
        }
    }

    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    fn doc(json: &str) -> Value {
        from_json(json).unwrap()
    }

    #[test]
    fn test_equal_maps_give_empty_patch() {
        let d = doc(r#"{"name": "pod1", "spec": {"image": "nginx"}}"#);
        assert!(diff(&d, &d).is_empty());
    }

    #[test]
    fn test_changed_added_and_removed_keys() {
        let old = doc(r#"{"a": 1, "b": 2, "c": 3}"#);
        let new = doc(r#"{"a": 1, "b": 20, "d": 4}"#);
        assert_eq!(
            diff(&old, &new).into_value(),
            doc(r#"{"b": 20, "c": null, "d": 4}"#)
        );
    }

    #[test]
    fn test_nested_maps_give_minimal_sub_patch() {
        let old = doc(r#"{"spec": {"image": "nginx:v1", "replicas": 3}, "kind": "Pod"}"#);
        let new = doc(r#"{"spec": {"image": "nginx:v2", "replicas": 3}, "kind": "Pod"}"#);
        assert_eq!(
            diff(&old, &new).into_value(),
            doc(r#"{"spec": {"image": "nginx:v2"}}"#)
        );
    }

    #[test]
    fn test_lists_are_replaced_wholesale() {
        let old = doc(r#"{"ports": [80, 443, 8080]}"#);
        let new = doc(r#"{"ports": [80, 443, 9090]}"#);
        assert_eq!(
            diff(&old, &new).into_value(),
            doc(r#"{"ports": [80, 443, 9090]}"#)
        );
    }

    #[test]
    fn test_type_change_replaces_value() {
        let old = doc(r#"{"a": {"b": 1}}"#);
        let new = doc(r#"{"a": [1]}"#);
        assert_eq!(diff(&old, &new).into_value(), doc(r#"{"a": [1]}"#));

        let old = doc(r#"{"a": "x"}"#);
        let new = doc(r#"{"a": {"b": 1}}"#);
        assert_eq!(diff(&old, &new).into_value(), doc(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn test_non_map_documents_are_replaced() {
        let patch = diff(&doc("[1, 2]"), &doc(r#"{"a": 1}"#));
        assert_eq!(patch.into_value(), doc(r#"{"a": 1}"#));

        let patch = diff(&doc("[1, 2]"), &doc("[1, 2]"));
        assert_eq!(patch.into_value(), doc("[1, 2]"));
    }

    #[test]
    fn test_explicit_null_reads_as_removal() {
        let old = doc(r#"{"a": 1}"#);
        let new = doc(r#"{"a": null}"#);
        assert_eq!(diff(&old, &new).into_value(), doc(r#"{"a": null}"#));
    }

    #[test]
    fn test_keep_absent_fields() {
        let old = doc(r#"{"name": "pod1", "timestamp": "2024-01-01", "spec": {"image": "nginx", "node": "n1"}}"#);
        let new = doc(r#"{"name": "pod1", "spec": {"image": "nginx"}}"#);
        assert!(diff_with(&old, &new, AbsentFields::Keep).is_empty());
        assert_eq!(
            diff(&old, &new).into_value(),
            doc(r#"{"timestamp": null, "spec": {"node": null}}"#)
        );
    }

    #[test]
    fn test_keep_absent_fields_still_honors_explicit_null() {
        let old = doc(r#"{"ports": [80], "image": "nginx"}"#);
        let new = doc(r#"{"ports": null}"#);
        assert_eq!(
            diff_with(&old, &new, AbsentFields::Keep).into_value(),
            doc(r#"{"ports": null}"#)
        );
    }
}
