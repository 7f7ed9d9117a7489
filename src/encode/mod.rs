//! Encode module - Turns typed values into documents.
//!
//! The encoder decides which fields are left out of a document. A field that
//! is absent from an encoded document reads as "the caller did not set this",
//! so the zero/default rule here directly shapes equality.

mod encoder;
mod zero;

pub use encoder::*;
pub use zero::*;
