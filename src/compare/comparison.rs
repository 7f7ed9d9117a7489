//! Comparison result types.

use crate::fieldpath::{Path, PathElement, PathSet};
use crate::patch::Patch;
use crate::value::Value;
use std::fmt;

/// Comparison holds the result of comparing a baseline with a desired document.
///
/// The field sets report what replaying the patch onto the baseline would
/// change. No field appears in more than one set, and all of them are empty
/// exactly when [`is_same`](Comparison::is_same) is true.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Fields the baseline has and the patch removes.
    pub removed: PathSet,
    /// Fields present in both whose value the patch changes.
    pub modified: PathSet,
    /// Fields the patch adds to the baseline.
    pub added: PathSet,
    patch: Patch,
    same: bool,
}

impl Comparison {
    /// Builds the comparison for `patch` replayed onto `baseline`.
    /// `same` is the structural verdict of that replay.
    pub(crate) fn new(baseline: &Value, patch: Patch, same: bool) -> Self {
        let mut changes = Changes::default();
        changes.record(baseline, patch.as_value(), &mut Path::new());
        Comparison {
            removed: changes.removed,
            modified: changes.modified,
            added: changes.added,
            patch,
            same,
        }
    }

    /// Returns true if replaying the patch leaves the baseline unchanged.
    pub fn is_same(&self) -> bool {
        self.same
    }

    /// Returns the merge patch computed from baseline to desired.
    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    /// Returns true if any fields were removed.
    pub fn has_removed(&self) -> bool {
        !self.removed.is_empty()
    }

    /// Returns true if any fields were modified.
    pub fn has_modified(&self) -> bool {
        !self.modified.is_empty()
    }

    /// Returns true if any fields were added.
    pub fn has_added(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Field paths collected while walking a patch against its baseline.
#[derive(Default)]
struct Changes {
    removed: PathSet,
    modified: PathSet,
    added: PathSet,
}

impl Changes {
    fn record(&mut self, baseline: &Value, patch: &Value, path: &mut Path) {
        let (fields, entries) = match (baseline, patch) {
            (Value::Map(fields), Value::Map(entries)) => (fields, entries),
            _ => {
                if baseline != patch {
                    self.modified.insert(path.clone());
                }
                return;
            }
        };

        for (key, value) in entries.iter() {
            path.push(PathElement::field_name(key.as_str()));
            match (fields.get(key), value) {
                (None, Value::Null) => {}
                (Some(_), Value::Null) => {
                    self.removed.insert(path.clone());
                }
                (None, _) => {
                    self.added.insert(path.clone());
                }
                (Some(old), Value::Map(_)) if old.is_map() => self.record(old, value, path),
                (Some(old), _) if old == value => {}
                (Some(_), _) => {
                    self.modified.insert(path.clone());
                }
            }
            path.pop();
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            ("Modified", &self.modified),
            ("Added", &self.added),
            ("Removed", &self.removed),
        ];

        let mut first = true;
        for (title, paths) in sections {
            if paths.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "- {} Fields:", title)?;
            for path in paths {
                write!(f, "\n  {}", path)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;

    fn comparison(baseline: &str, patch: &str) -> Comparison {
        let baseline = from_json(baseline).unwrap();
        let patch = Patch::from_value(from_json(patch).unwrap());
        Comparison::new(&baseline, patch, false)
    }

    fn paths(list: &[&str]) -> PathSet {
        list.iter()
            .map(|p| Path::from_fields(p.split('.')))
            .collect()
    }

    #[test]
    fn test_comparison_classifies_fields() {
        let comp = comparison(
            r#"{"a": 1, "b": {"c": 2, "d": 3}, "e": [1]}"#,
            r#"{"a": null, "b": {"c": 20, "x": true}, "e": [2], "f": "new"}"#,
        );
        assert_eq!(comp.removed, paths(&["a"]));
        assert_eq!(comp.modified, paths(&["b.c", "e"]));
        assert_eq!(comp.added, paths(&["b.x", "f"]));
        assert!(comp.has_removed() && comp.has_modified() && comp.has_added());
    }

    #[test]
    fn test_comparison_ignores_no_op_entries() {
        let comp = comparison(r#"{"a": 1}"#, r#"{"a": 1, "gone": null}"#);
        assert!(comp.removed.is_empty());
        assert!(comp.modified.is_empty());
        assert!(comp.added.is_empty());
    }

    #[test]
    fn test_root_replacement_is_modified() {
        let comp = comparison(r#"[1]"#, r#"{"a": 1}"#);
        assert_eq!(comp.modified, PathSet::from([Path::new()]));
    }

    #[test]
    fn test_comparison_display() {
        let comp = comparison(r#"{"changed": 1}"#, r#"{"changed": 2, "new": 1}"#);
        assert_eq!(
            format!("{}", comp),
            "- Modified Fields:\n  .changed\n- Added Fields:\n  .new"
        );
    }
}
