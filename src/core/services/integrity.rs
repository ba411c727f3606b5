//! Board set integrity
//!
//! Detects tracking sets that disagree with task statuses and plans the
//! repair. The repair never trusts the sets: it rebuilds them from each
//! task's own status.

use std::collections::HashSet;

use serde::Serialize;

use super::progress::compute_progress;
use super::transition::tracking_set_for;
use crate::core::models::{Board, BoardId, Membership, Task, TaskId, TaskSets, TaskStatus, TrackingSet};

/// Tolerance when comparing a stored progress value to the derived one
const PROGRESS_TOLERANCE: f64 = 1e-6;

/// One detected inconsistency
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inconsistency {
    /// Task exists on the board but neither set mentions it
    Missing {
        /// Affected task
        task_id: TaskId,
        /// Its current status
        status: TaskStatus,
    },
    /// Task id sits in both sets
    Duplicated {
        /// Affected task
        task_id: TaskId,
    },
    /// Task id sits in the set that contradicts its status
    WrongSet {
        /// Affected task
        task_id: TaskId,
        /// Its current status
        status: TaskStatus,
    },
    /// A set mentions a task that is not on this board
    Orphaned {
        /// Id with no matching task
        task_id: TaskId,
    },
    /// Stored progress differs from the value derived from the sets
    StaleProgress {
        /// Value on the board
        stored: f64,
        /// Value the sets imply
        expected: f64,
    },
}

/// Result of checking one board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityReport {
    /// Board that was checked
    pub board_id: BoardId,
    /// Everything found wrong, empty when consistent
    pub issues: Vec<Inconsistency>,
}

impl IntegrityReport {
    /// Whether no issues were found
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Compare `board`'s sets with the statuses of `tasks` (the board's tasks)
#[must_use]
pub fn check_board(board: &Board, tasks: &[Task]) -> IntegrityReport {
    let sets = board.sets();
    let mut issues = Vec::new();

    for task in tasks.iter().filter(|t| t.board_id == board.id) {
        let expected = tracking_set_for(task.status());
        match (sets.membership(task.id), expected) {
            (Membership::Open, TrackingSet::Open)
            | (Membership::Completed, TrackingSet::Completed) => {},
            (Membership::Neither, _) => issues.push(Inconsistency::Missing {
                task_id: task.id,
                status: task.status(),
            }),
            (Membership::Both, _) => issues.push(Inconsistency::Duplicated { task_id: task.id }),
            _ => issues.push(Inconsistency::WrongSet {
                task_id: task.id,
                status: task.status(),
            }),
        }
    }

    let known: HashSet<TaskId> =
        tasks.iter().filter(|t| t.board_id == board.id).map(|t| t.id).collect();
    issues.extend(
        sets.all_ids()
            .filter(|id| !known.contains(id))
            .map(|task_id| Inconsistency::Orphaned { task_id }),
    );

    let expected = compute_progress(sets.open(), sets.completed());
    if (board.progress() - expected).abs() > PROGRESS_TOLERANCE {
        issues.push(Inconsistency::StaleProgress {
            stored: board.progress(),
            expected,
        });
    }

    IntegrityReport {
        board_id: board.id,
        issues,
    }
}

/// Rebuild a board's tracking sets from its tasks' statuses
#[must_use]
pub fn rebuild_sets(board_id: BoardId, tasks: &[Task]) -> TaskSets {
    let mut sets = TaskSets::default();
    for task in tasks.iter().filter(|t| t.board_id == board_id) {
        sets.place(task.id, tracking_set_for(task.status()));
    }
    sets
}
