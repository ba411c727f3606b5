//! Sequence counter port

use crate::core::models::OwnerId;

/// Atomic per-owner counters
///
/// Used for human-readable task labels. Implementations must hand out
/// each value at most once per `(owner, sequence)`, even under
/// concurrent callers.
pub trait SequenceCounter: Send + Sync {
    /// Increment and return the counter (first call returns 1)
    fn next_value(&self, owner: &OwnerId, sequence: &str) -> anyhow::Result<u64>;
}
