//! Witness type for classifier confidences bounded to [0.0, 1.0].
//!
//! Gender and number estimates travel with a confidence. The discourse model
//! only ever *compares* these values: an entity adopts a newly attached
//! mention's gender (or number) when that mention's confidence is strictly
//! higher than the one the entity currently holds.
//!
//! ```text
//! entity: Unknown @ 0.00   + "he"   Male @ 0.90  →  Male @ 0.90
//! entity: Male    @ 0.90   + "John" Unknown @ 0.00  →  Male @ 0.90  (lower)
//! entity: Male    @ 0.90   + "him"  Male @ 0.90  →  unchanged      (tie)
//! ```
//!
//! Confidences from different classifiers are not calibrated against each
//! other. Mixing a statistical gender model with a lexical one still works,
//! but the "strictly greater" rule then compares unlike scales.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A confidence score guaranteed to be in the range [0.0, 1.0].
///
/// # Construction
///
/// - [`Confidence::new`]: Returns `None` if out of range
/// - [`Confidence::saturating`]: Clamps to [0, 1], NaN becomes 0
/// - [`Confidence::try_from`]: Returns `Err` if out of range
///
/// # Example
///
/// ```rust
/// use anno_coref_core::Confidence;
///
/// assert!(Confidence::new(0.5).is_some());
/// assert!(Confidence::new(1.5).is_none());
///
/// let high = Confidence::saturating(0.9);
/// let low = Confidence::saturating(0.4);
/// assert!(high.exceeds(low));
/// assert!(!high.exceeds(high));
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// No evidence at all.
    pub const MIN: Self = Self(0.0);

    /// Full certainty.
    pub const MAX: Self = Self(1.0);

    /// Create a confidence, returning `None` if out of range.
    #[must_use]
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&value) && !value.is_nan() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a confidence, clamping to [0.0, 1.0]. NaN is treated as 0.0.
    #[must_use]
    #[inline]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Get the inner value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Strictly greater than `other`. Ties return `false`.
    #[must_use]
    #[inline]
    pub fn exceeds(self, other: Self) -> bool {
        self.0 > other.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Debug for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Confidence({:.4})", self.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Error when trying to create a [`Confidence`] from an invalid value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceError {
    /// The rejected value.
    pub value: f64,
}

impl fmt::Display for ConfidenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "confidence value {} is outside valid range [0.0, 1.0]",
            self.value
        )
    }
}

impl std::error::Error for ConfidenceError {}

impl TryFrom<f64> for Confidence {
    type Error = ConfidenceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ConfidenceError { value })
    }
}

impl From<Confidence> for f64 {
    #[inline]
    fn from(conf: Confidence) -> Self {
        conf.0
    }
}
