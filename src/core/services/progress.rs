//! Progress calculator
//!
//! A board's progress is a pure function of the sizes of its two
//! tracking sets. It is recomputed on every set mutation rather than
//! patched incrementally, so it cannot drift.

use std::collections::BTreeSet;

/// Percentage of tracked tasks that are completed, in `[0, 100]`.
///
/// `0` when nothing is tracked. Not rounded; use [`round_for_display`]
/// when rendering.
#[must_use]
pub fn compute_progress<T>(open: &BTreeSet<T>, completed: &BTreeSet<T>) -> f64 {
    progress_from_counts(open.len(), completed.len())
}

/// [`compute_progress`] on raw counts
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_from_counts(open: usize, completed: usize) -> f64 {
    let total = open + completed;
    if total == 0 {
        return 0.0;
    }
    100.0 * completed as f64 / total as f64
}

/// Round to two decimals for display
#[must_use]
pub fn round_for_display(progress: f64) -> f64 {
    (progress * 100.0).round() / 100.0
}
