//! Patch module - JSON merge patches (RFC 7396) over documents.
//!
//! [`diff`] computes the patch that turns one document into another and
//! [`apply`] replays a patch onto a document without touching its input.

mod apply;
mod diff;
mod patch;


pub use apply::*;
pub(crate) use apply::ensure_representable;
pub use diff::*;
pub use patch::*;
