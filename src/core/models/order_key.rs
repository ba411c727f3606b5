//! Fractional ordering keys
//!
//! Siblings (an owner's boards, or the tasks of one board column) are
//! displayed in ascending key order. Keys are finite floats so a new
//! key can be placed between two neighbours without touching any other
//! sibling; normalization rewrites a collection back to `1..=n`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while computing or validating ordering keys
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderingError {
    /// Key is NaN or infinite
    #[error("ordering key must be finite, got {0}")]
    NonFinite(f64),

    /// Neighbours were passed in the wrong order
    #[error("previous key {prev} is not below next key {next}")]
    OutOfOrder {
        /// Key of the preceding sibling
        prev: f64,
        /// Key of the following sibling
        next: f64,
    },

    /// No representable key exists strictly between the neighbours
    #[error("no room between keys {prev:?} and {next:?}; normalize the collection")]
    Exhausted {
        /// Key of the preceding sibling, if any
        prev: Option<f64>,
        /// Key of the following sibling, if any
        next: Option<f64>,
    },

    /// A reorder was requested with no identifiers
    #[error("reorder list is empty")]
    EmptyReorder,

    /// The same identifier appears twice in a reorder list
    #[error("duplicate id in reorder list: {0}")]
    DuplicateId(String),
}

/// A finite, totally ordered sort key
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct OrderKey(f64);

impl OrderKey {
    /// Key assigned to the only member of a collection
    pub const FIRST: Self = Self(1.0);

    /// Validate a raw key
    pub fn new(value: f64) -> Result<Self, OrderingError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(OrderingError::NonFinite(value))
        }
    }

    /// Normalized key for a zero-based position (`0 -> 1`, `1 -> 2`, ...)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_position(position: usize) -> Self {
        Self(position as f64 + 1.0)
    }

    /// The raw value
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for OrderKey {
    type Error = OrderingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderKey> for f64 {
    fn from(key: OrderKey) -> Self {
        key.0
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
