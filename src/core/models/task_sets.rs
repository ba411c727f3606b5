//! Per-board tracking sets
//!
//! A board keeps two mutually exclusive indexes of its task ids: open
//! (anything not DONE) and completed (DONE). They are a derived index;
//! each task's own status is the source of truth.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::TaskId;

/// Which of a board's two tracking sets a task belongs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingSet {
    /// Open (not DONE) tasks
    Open,
    /// Completed (DONE) tasks
    Completed,
}

/// Where a task id currently sits across the two sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Only in the open set
    Open,
    /// Only in the completed set
    Completed,
    /// In both sets (inconsistent)
    Both,
    /// In neither set
    Neither,
}

/// The open and completed task-id sets of one board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSets {
    #[serde(default, rename = "open_task_ids")]
    open: BTreeSet<TaskId>,
    #[serde(default, rename = "completed_task_ids")]
    completed: BTreeSet<TaskId>,
}

impl TaskSets {
    /// Build sets from explicit members
    #[must_use]
    pub fn from_parts(
        open: impl IntoIterator<Item = TaskId>,
        completed: impl IntoIterator<Item = TaskId>,
    ) -> Self {
        Self {
            open: open.into_iter().collect(),
            completed: completed.into_iter().collect(),
        }
    }

    /// Open task ids
    #[must_use]
    pub const fn open(&self) -> &BTreeSet<TaskId> {
        &self.open
    }

    /// Completed task ids
    #[must_use]
    pub const fn completed(&self) -> &BTreeSet<TaskId> {
        &self.completed
    }

    /// Total number of tracked ids (a task in both sets counts twice)
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len() + self.completed.len()
    }

    /// Whether both sets are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.completed.is_empty()
    }

    /// Where `task_id` currently sits
    #[must_use]
    pub fn membership(&self, task_id: TaskId) -> Membership {
        match (self.open.contains(&task_id), self.completed.contains(&task_id)) {
            (true, false) => Membership::Open,
            (false, true) => Membership::Completed,
            (true, true) => Membership::Both,
            (false, false) => Membership::Neither,
        }
    }

    /// Every id mentioned by either set
    pub fn all_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.open.union(&self.completed).copied()
    }

    /// Put `task_id` in exactly `into`, removing it from the other set.
    ///
    /// Returns whether anything changed.
    pub fn place(&mut self, task_id: TaskId, into: TrackingSet) -> bool {
        let (target, other) = match into {
            TrackingSet::Open => (&mut self.open, &mut self.completed),
            TrackingSet::Completed => (&mut self.completed, &mut self.open),
        };
        let removed = other.remove(&task_id);
        let added = target.insert(task_id);
        removed || added
    }

    /// Drop `task_id` from both sets. Returns whether it was present.
    pub fn detach(&mut self, task_id: TaskId) -> bool {
        let open = self.open.remove(&task_id);
        let completed = self.completed.remove(&task_id);
        open || completed
    }
}
