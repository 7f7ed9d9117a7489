//! Field path module - Names locations inside nested documents.
//!
//! Paths identify the fields a comparison reports as added, modified or
//! removed, and the location of values rejected while applying a patch.

mod path;

pub use path::*;

use std::collections::BTreeSet;

/// PathSet is an ordered set of field paths.
pub type PathSet = BTreeSet<Path>;
