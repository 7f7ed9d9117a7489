//! # Object Equality
//!
//! Decides whether writing a desired object over a baseline object would
//! change anything the caller asked for.
//!
//! Both objects are encoded into documents, a JSON merge patch (RFC 7396)
//! from baseline to desired is computed, the patch is replayed onto the
//! baseline, and the result is compared with the baseline. Fields that only
//! the baseline carries, such as server-populated timestamps or defaults,
//! never turn into changes; every field the desired object sets does.
//!
//! ```
//! use object_equality::encode::is_zero;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Workload {
//!     image: String,
//!     #[serde(skip_serializing_if = "is_zero")]
//!     created_at: String,
//! }
//!
//! let observed = Workload { image: "nginx".into(), created_at: "2024-01-01".into() };
//! let desired = Workload { image: "nginx".into(), created_at: String::new() };
//! assert!(object_equality::is_equivalent(&observed, &desired).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of YAML/JSON documents
//! - [`encode`] - Encoding of serializable values, with explicit zero-value rules
//! - [`patch`] - Merge patch generation and application
//! - [`compare`] - The equality check and its change report
//! - [`fieldpath`] - Paths naming fields inside documents

pub mod compare;
pub mod encode;
pub mod fieldpath;
pub mod patch;
pub mod value;

pub use compare::{
    is_equivalent, is_equivalent_values, CompareError, CompareOptions, Comparator, Comparison,
};
pub use encode::{encode, encode_with, EncodeError, ZeroPolicy};
pub use fieldpath::{Path, PathElement, PathSet};
pub use patch::{apply, diff, diff_with, AbsentFields, Patch, PatchError};
pub use value::Value;
