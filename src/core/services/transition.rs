//! Status transition resolver
//!
//! Maps a task's new status onto the mutation its board's tracking sets
//! need. DONE tasks live in the completed set, everything else in the
//! open set. Mutations only depend on the new status, so applying one
//! twice is the same as applying it once.

use serde::{Deserialize, Serialize};

use crate::core::models::{Board, Task, TaskId, TaskSets, TaskStatus, TrackingSet};

/// A change to one board's tracking sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SetMutation {
    /// Put the task in exactly one set, removing it from the other
    Place {
        /// Task being placed
        task_id: TaskId,
        /// Destination set
        into: TrackingSet,
    },
    /// Remove the task from both sets (task deleted)
    Detach {
        /// Task being removed
        task_id: TaskId,
    },
}

impl SetMutation {
    /// Task this mutation concerns
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Place { task_id, .. } | Self::Detach { task_id } => *task_id,
        }
    }

    /// Apply to a pair of sets. Returns whether anything changed.
    pub fn apply(&self, sets: &mut TaskSets) -> bool {
        match *self {
            Self::Place { task_id, into } => sets.place(task_id, into),
            Self::Detach { task_id } => sets.detach(task_id),
        }
    }
}

/// Which set a task with `status` belongs in
#[must_use]
pub const fn tracking_set_for(status: TaskStatus) -> TrackingSet {
    if status.is_done() { TrackingSet::Completed } else { TrackingSet::Open }
}

/// Mutation placing `task` according to `new_status`
#[must_use]
pub const fn resolve_board_set_mutation(task: &Task, new_status: TaskStatus) -> SetMutation {
    SetMutation::Place {
        task_id: task.id,
        into: tracking_set_for(new_status),
    }
}

/// Change `task`'s status and update `board` in one step.
///
/// Used where both documents are held in memory together; storage
/// adapters apply the same mutation inside their own write batch.
pub fn apply_transition(board: &mut Board, task: &mut Task, new_status: TaskStatus) -> SetMutation {
    let mutation = resolve_board_set_mutation(task, new_status);
    task.set_status(new_status);
    board.apply_set_mutation(&mutation);
    mutation
}
