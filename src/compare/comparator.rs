//! Equality of baseline and desired documents under merge-patch semantics.

use super::comparison::Comparison;
use crate::encode::{encode_with, EncodeError, ZeroPolicy};
use crate::patch::{apply, diff_with, ensure_representable, AbsentFields, PatchError};
use crate::value::Value;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

/// CompareError is returned when two values cannot be compared.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("failed to apply merge patch: {0}")]
    Patch(#[from] PatchError),
}

/// CompareOptions configures a [`Comparator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    zero_policy: ZeroPolicy,
    absent_fields: AbsentFields,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            zero_policy: ZeroPolicy::Declared,
            absent_fields: AbsentFields::Keep,
        }
    }
}

impl CompareOptions {
    /// Creates the default options: declared zero values, baseline-only
    /// fields tolerated.
    pub fn new() -> Self {
        CompareOptions::default()
    }

    /// Sets the zero policy used to encode both values.
    pub fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    /// Sets how fields present only in the baseline are treated.
    ///
    /// [`AbsentFields::Remove`] makes every baseline-only field a change.
    pub fn absent_fields(mut self, absent: AbsentFields) -> Self {
        self.absent_fields = absent;
        self
    }
}

/// Comparator decides whether a desired value would change a baseline.
///
/// Both values are encoded, a merge patch from baseline to desired is
/// computed and replayed onto the baseline, and the result is compared with
/// the baseline. Fields the baseline carries but the desired value never set
/// (server defaults, timestamps) do not count as changes.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    options: CompareOptions,
}

impl Comparator {
    /// Creates a comparator with the given options.
    pub fn new(options: CompareOptions) -> Self {
        Comparator { options }
    }

    /// Returns the options this comparator was built with.
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Returns true if applying `new` over `old` changes nothing.
    pub fn is_equivalent<T: Serialize + ?Sized>(&self, old: &T, new: &T) -> Result<bool, CompareError> {
        Ok(self.compare(old, new)?.is_same())
    }

    /// Encodes and compares two values.
    pub fn compare<T: Serialize + ?Sized>(&self, old: &T, new: &T) -> Result<Comparison, CompareError> {
        let old = encode_with(old, self.options.zero_policy)?;
        let new = encode_with(new, self.options.zero_policy)?;
        Ok(self.compare_values(&old, &new)?)
    }

    /// Compares two already-encoded documents.
    pub fn compare_values(&self, old: &Value, new: &Value) -> Result<Comparison, PatchError> {
        ensure_representable(old)?;
        ensure_representable(new)?;

        let patch = diff_with(old, new, self.options.absent_fields);
        trace!(patch = %patch, "computed merge patch");

        let merged = apply(old, &patch)?;
        let same = *old == merged;
        debug!(
            same,
            baseline = old.kind(),
            absent_fields = ?self.options.absent_fields,
            "compared documents"
        );

        Ok(Comparison::new(old, patch, same))
    }
}

/// Returns true if applying `new` over `old` would change nothing, using the
/// default [`CompareOptions`].
pub fn is_equivalent<T: Serialize + ?Sized>(old: &T, new: &T) -> Result<bool, CompareError> {
    Comparator::default().is_equivalent(old, new)
}

/// Like [`is_equivalent`], for documents that are already encoded.
pub fn is_equivalent_values(old: &Value, new: &Value) -> Result<bool, PatchError> {
    Ok(Comparator::default().compare_values(old, new)?.is_same())
}
