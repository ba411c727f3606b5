//! Order index assigner
//!
//! Computes keys for inserting one sibling between two others, plans the
//! spaced keys of a bulk reorder, and produces the normalization pass
//! that rewrites a collection to `1..=n`.
//!
//! Repeated insertion at the same spot halves the gap every time, so
//! callers check [`needs_normalization`] (or get
//! [`OrderingError::Exhausted`]) and normalize before trying again.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::core::models::{OrderKey, OrderingError};

/// Gap below which neighbours should be normalized before inserting
pub const MIN_GAP: f64 = 1e-9;

/// Key for an entity inserted between `prev` and `next`.
///
/// - neither neighbour (empty collection): `1`
/// - head insertion (`prev` absent): `next / 2`
/// - tail insertion (`next` absent): `prev + 1`
/// - otherwise the midpoint
///
/// The result is strictly above `prev` and strictly below `next`. When
/// floating point cannot satisfy that, [`OrderingError::Exhausted`] is
/// returned and the collection has to be normalized first.
pub fn compute_insertion_index(
    prev: Option<OrderKey>,
    next: Option<OrderKey>,
) -> Result<OrderKey, OrderingError> {
    let candidate = match (prev, next) {
        (None, None) => return Ok(OrderKey::FIRST),
        (None, Some(next)) => next.value() / 2.0,
        (Some(prev), None) => prev.value() + 1.0,
        (Some(prev), Some(next)) => {
            if prev >= next {
                return Err(OrderingError::OutOfOrder {
                    prev: prev.value(),
                    next: next.value(),
                });
            }
            // halves first so huge keys cannot overflow
            prev.value() / 2.0 + next.value() / 2.0
        },
    };

    let above_prev = prev.is_none_or(|p| candidate > p.value());
    let below_next = next.is_none_or(|n| candidate < n.value());
    if candidate.is_finite() && above_prev && below_next {
        OrderKey::new(candidate)
    } else {
        Err(OrderingError::Exhausted {
            prev: prev.map(OrderKey::value),
            next: next.map(OrderKey::value),
        })
    }
}

/// Whether the gap around an insertion point is too small to keep halving
#[must_use]
pub fn needs_normalization(prev: Option<OrderKey>, next: Option<OrderKey>) -> bool {
    match (prev, next) {
        (Some(prev), Some(next)) => next.value() - prev.value() < MIN_GAP,
        (None, Some(next)) => next.value() < MIN_GAP,
        _ => false,
    }
}

/// Spaced, strictly increasing keys for a requested order.
///
/// Position `i` gets `i + 1 + i * 0.5`, leaving room between entries so
/// the batch never collides with itself. Rejects an empty list and
/// duplicate ids.
pub fn plan_spaced_keys<T>(ordered: &[T]) -> Result<Vec<(T, OrderKey)>, OrderingError>
where
    T: Copy + Eq + Hash + Display,
{
    if ordered.is_empty() {
        return Err(OrderingError::EmptyReorder);
    }

    let mut seen = HashSet::with_capacity(ordered.len());
    for id in ordered {
        if !seen.insert(*id) {
            return Err(OrderingError::DuplicateId(id.to_string()));
        }
    }

    ordered
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let base = OrderKey::from_position(i).value();
            #[allow(clippy::cast_precision_loss)]
            let spacing = i as f64 * 0.5;
            OrderKey::new(base + spacing).map(|key| (*id, key))
        })
        .collect()
}

/// Normalization pass: contiguous keys `1..=n` in the given order
#[must_use]
pub fn normalize<T: Copy>(ordered: &[T]) -> Vec<(T, OrderKey)> {
    ordered.iter().enumerate().map(|(i, id)| (*id, OrderKey::from_position(i))).collect()
}

/// Whether keys are already exactly `1..=n` in order
#[must_use]
pub fn is_normalized(keys: &[OrderKey]) -> bool {
    keys.iter().enumerate().all(|(i, key)| *key == OrderKey::from_position(i))
}
