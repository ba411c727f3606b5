//! Batched writes
//!
//! Every mutation goes through [`BatchWriter::apply`]. A batch is applied
//! atomically with respect to readers, so a task's status and its
//! board's tracking sets never disagree outside a batch boundary.
//!
//! Operations whose target does not exist (or belongs to another owner)
//! are skipped and show up as unmatched in the [`WriteSummary`], the way
//! a document store's bulk write reports per-operation counts.

use serde::Serialize;

use crate::core::models::{
    Board, BoardDetails, BoardId, OrderKey, OwnerId, Task, TaskDetails, TaskId, TaskStatus,
};
use crate::core::services::transition::SetMutation;

/// A single write instruction
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Insert a board (skipped if the owner already has one with that title)
    InsertBoard(Box<Board>),
    /// Overwrite a board's editable fields
    UpdateBoard {
        /// Target board
        id: BoardId,
        /// New fields
        details: BoardDetails,
    },
    /// Delete a board and every task on it
    DeleteBoard {
        /// Target board
        id: BoardId,
    },
    /// Assign a board's ordering key
    SetBoardKey {
        /// Target board
        id: BoardId,
        /// New key
        key: OrderKey,
    },
    /// Atomic add/remove on a board's tracking sets; progress is recomputed
    MutateBoardSets {
        /// Target board
        id: BoardId,
        /// Set change
        mutation: SetMutation,
    },
    /// Rebuild a board's tracking sets from the statuses of its tasks as
    /// stored when the batch runs; progress is recomputed
    RebuildBoardSets {
        /// Target board
        id: BoardId,
    },
    /// Insert a task (skipped if its board does not exist)
    InsertTask(Box<Task>),
    /// Overwrite a task's editable fields
    UpdateTask {
        /// Target task
        id: TaskId,
        /// New fields
        details: TaskDetails,
    },
    /// Change a task's status and position together
    SetTaskStatus {
        /// Target task
        id: TaskId,
        /// New status
        status: TaskStatus,
        /// Key within the new column
        key: OrderKey,
    },
    /// Assign a task's ordering key
    SetTaskKey {
        /// Target task
        id: TaskId,
        /// New key
        key: OrderKey,
    },
    /// Delete a task
    DeleteTask {
        /// Target task
        id: TaskId,
    },
}

/// Per-batch counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    /// Operations submitted
    pub requested: usize,
    /// Operations whose target was found (or insert that succeeded)
    pub matched: usize,
    /// Matched operations that actually changed something
    pub modified: usize,
    /// Documents removed, including cascaded tasks
    pub deleted: usize,
}

impl WriteSummary {
    /// Whether every operation found its target
    #[must_use]
    pub const fn all_matched(&self) -> bool {
        self.matched == self.requested
    }
}

/// Applies write batches
pub trait BatchWriter: Send + Sync {
    /// Apply `ops` for `owner` as one atomic batch
    fn apply(&self, owner: &OwnerId, ops: &[WriteOp]) -> anyhow::Result<WriteSummary>;
}
