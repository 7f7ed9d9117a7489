//! Value module - In-memory representation of YAML/JSON documents.
//!
//! Both the baseline and the desired document are encoded into a [`Value`]
//! before they are diffed and compared.

mod value;

pub use value::*;
