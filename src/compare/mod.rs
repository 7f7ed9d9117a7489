//! Compare module - Decides whether a desired value would change a baseline.
//!
//! This is the entry point for reconciliation loops that want to skip
//! writes which would change nothing the caller asked for.

mod comparator;
mod comparison;



pub use comparator::*;
pub use comparison::*;
