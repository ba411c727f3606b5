//! Tracker service
//!
//! Request-scoped orchestration on top of the persistence ports: board
//! and task CRUD, drag-and-drop moves, bulk reorders, status transitions,
//! integrity repair and statistics. Every operation is scoped to one
//! owner.

mod boards;
mod locks;
mod maintenance;
mod tasks;

pub use boards::{BoardDetail, Column};
pub use locks::{CollectionKey, CollectionLocks};
pub use maintenance::RepairOutcome;
pub use tasks::{MoveTask, NewTask, TaskPatch};

use std::fmt::Display;

use thiserror::Error;

use crate::core::models::{OrderKey, OrderingError, OwnerId};
use crate::core::ports::{Store, WriteOp, WriteSummary};
use crate::core::services::{ValidationError, compute_insertion_index, needs_normalization};

/// Default prefix for task labels
pub const DEFAULT_LABEL_PREFIX: &str = "KAN";

/// Sequence name used for task labels
const TASK_SEQUENCE: &str = "task";

/// Errors from tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Request rejected before any write
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A field failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Board or task does not exist for this owner
    #[error("{kind} not found: {id}")]
    NotFound {
        /// "Board" or "Task"
        kind: &'static str,
        /// What was looked up
        id: String,
    },

    /// Would violate a uniqueness rule
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A bulk write stopped part way; retry the whole operation
    #[error("Partial write: {applied} of {expected} updates applied, retry the whole operation")]
    PartialWrite {
        /// Writes submitted
        expected: usize,
        /// Writes that found their target
        applied: usize,
    },

    /// Persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl TrackerError {
    pub(crate) fn board_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            kind: "Board",
            id: id.to_string(),
        }
    }

    pub(crate) fn task_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            kind: "Task",
            id: id.to_string(),
        }
    }
}

impl From<OrderingError> for TrackerError {
    fn from(err: OrderingError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Result alias for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

/// The board and task tracker
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
    locks: CollectionLocks,
    label_prefix: String,
}

impl<S: Store> Tracker<S> {
    /// Create a tracker over `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: CollectionLocks::default(),
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
        }
    }

    /// Use `prefix` for new task labels
    #[must_use]
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    /// The underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Apply a key-assignment batch, failing if any write missed its target
    fn write_all(&self, owner: &OwnerId, ops: &[WriteOp]) -> TrackerResult<WriteSummary> {
        let summary = self.store.apply(owner, ops)?;
        if summary.all_matched() {
            Ok(summary)
        } else {
            Err(TrackerError::PartialWrite {
                expected: summary.requested,
                applied: summary.matched,
            })
        }
    }
}

/// Positions in `siblings` of the entries directly above and below a drop
/// point. Giving one neighbour is enough; the other side is read from the
/// list.
fn neighbours<I>(
    siblings: &[I],
    after: Option<I>,
    before: Option<I>,
    container: &str,
) -> TrackerResult<(Option<usize>, Option<usize>)>
where
    I: Copy + PartialEq + Display,
{
    let position = |id: I| {
        siblings
            .iter()
            .position(|s| *s == id)
            .ok_or_else(|| TrackerError::InvalidInput(format!("{id} is not in {container}")))
    };

    match (after, before) {
        (Some(after), Some(before)) => {
            let (prev, next) = (position(after)?, position(before)?);
            if prev + 1 != next {
                return Err(TrackerError::InvalidInput(
                    "Neighbours are not adjacent".to_string(),
                ));
            }
            Ok((Some(prev), Some(next)))
        },
        (Some(after), None) => {
            let prev = position(after)?;
            Ok((Some(prev), (prev + 1 < siblings.len()).then_some(prev + 1)))
        },
        (None, Some(before)) => {
            let next = position(before)?;
            Ok((next.checked_sub(1), Some(next)))
        },
        (None, None) if siblings.is_empty() => Ok((None, None)),
        (None, None) => Err(TrackerError::InvalidInput(format!(
            "A neighbour is required when {container} is not empty"
        ))),
    }
}

/// Key for a drop between `prev` and `next` of `keys`.
///
/// When the gap is too narrow, `normalize` rewrites the siblings to
/// `1..=n` and the key is computed again between the new positions.
fn place_between(
    keys: &[OrderKey],
    (prev, next): (Option<usize>, Option<usize>),
    normalize: impl FnOnce() -> TrackerResult<()>,
) -> TrackerResult<OrderKey> {
    let (prev_key, next_key) = (prev.map(|i| keys[i]), next.map(|i| keys[i]));
    match compute_insertion_index(prev_key, next_key) {
        Ok(key) if !needs_normalization(prev_key, next_key) => Ok(key),
        Ok(_) | Err(OrderingError::Exhausted { .. }) => {
            normalize()?;
            Ok(compute_insertion_index(
                prev.map(OrderKey::from_position),
                next.map(OrderKey::from_position),
            )?)
        },
        Err(err) => Err(err.into()),
    }
}
