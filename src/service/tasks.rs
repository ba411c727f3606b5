//! Task operations

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{
    CollectionKey, TASK_SEQUENCE, Tracker, TrackerError, TrackerResult, neighbours, place_between,
};
use crate::core::models::{
    BoardId, OrderKey, OwnerId, Priority, Task, TaskDetails, TaskId, TaskLabel, TaskStatus,
};
use crate::core::ports::{Store, WriteOp};
use crate::core::services::validation::{normalize_task, validate_task};
use crate::core::services::{
    SetMutation, compute_insertion_index, normalize, plan_spaced_keys, resolve_board_set_mutation,
};

/// Fields for a new task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// What needs to be done
    pub title: String,
    /// Longer description
    pub description: String,
    /// Priority tier (default low)
    #[serde(default)]
    pub priority: Priority,
    /// Starting column (default TODO)
    #[serde(default)]
    pub status: TaskStatus,
    /// Planned start
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    fn into_parts(self) -> (TaskDetails, TaskStatus) {
        let details = TaskDetails {
            title: self.title,
            description: self.description,
            priority: self.priority,
            start_date: self.start_date,
            due_date: self.due_date,
        };
        (details, self.status)
    }
}

/// Partial task update; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New priority
    #[serde(default)]
    pub priority: Option<Priority>,
    /// New planned start
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// New deadline
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// New status
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Whether no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }

    fn merge_into(&self, mut details: TaskDetails) -> TaskDetails {
        if let Some(title) = &self.title {
            details.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            details.description.clone_from(description);
        }
        if let Some(priority) = self.priority {
            details.priority = priority;
        }
        if self.start_date.is_some() {
            details.start_date = self.start_date;
        }
        if self.due_date.is_some() {
            details.due_date = self.due_date;
        }
        details
    }
}

/// Drag-and-drop target for one task
///
/// `after` is the task that will sit immediately above the moved one,
/// `before` the one immediately below. Giving one is enough; the other
/// side is read from the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTask {
    /// Destination column
    pub status: TaskStatus,
    /// Neighbour above
    #[serde(default)]
    pub after: Option<TaskId>,
    /// Neighbour below
    #[serde(default)]
    pub before: Option<TaskId>,
}

impl<S: Store> Tracker<S> {
    /// Create a task at the tail of its column
    pub fn create_task(&self, owner: &OwnerId, board_id: BoardId, new: NewTask) -> TrackerResult<Task> {
        let (details, status) = new.into_parts();
        let details = normalize_task(details);
        validate_task(&details)?;
        self.get_board(owner, board_id)?;

        self.locks.with_lock(CollectionKey::Column(board_id, status), || {
            let key = self.tail_key(owner, board_id, status)?;
            let number = self.store.next_value(owner, TASK_SEQUENCE)?;
            let task = Task::new(
                owner.clone(),
                board_id,
                TaskLabel::new(&self.label_prefix, number),
                details,
                status,
                key,
            );

            let mutation = resolve_board_set_mutation(&task, status);
            let summary = self.store.apply(
                owner,
                &[
                    WriteOp::InsertTask(Box::new(task.clone())),
                    WriteOp::MutateBoardSets { id: board_id, mutation },
                ],
            )?;
            if summary.matched == 0 {
                return Err(TrackerError::board_not_found(board_id));
            }

            info!("Created task {} ({}) on board {board_id}", task.label, task.id);
            Ok(task)
        })
    }

    /// One task
    pub fn get_task(&self, owner: &OwnerId, id: TaskId) -> TrackerResult<Task> {
        self.store.task(owner, id)?.ok_or_else(|| TrackerError::task_not_found(id))
    }

    /// Look a task up by id or by label (e.g. `KAN-3`)
    pub fn resolve_task(&self, owner: &OwnerId, reference: &str) -> TrackerResult<Task> {
        if let Ok(id) = reference.parse::<TaskId>() {
            return self.get_task(owner, id);
        }
        self.store
            .tasks(owner)?
            .into_iter()
            .find(|t| t.label.matches(reference))
            .ok_or_else(|| TrackerError::task_not_found(reference))
    }

    /// Apply a partial update.
    ///
    /// A status change moves the task to the tail of its new column and
    /// updates the board's tracking sets in the same batch.
    pub fn update_task(&self, owner: &OwnerId, id: TaskId, patch: &TaskPatch) -> TrackerResult<Task> {
        if patch.is_empty() {
            return Err(TrackerError::InvalidInput("Nothing to update".to_string()));
        }

        let task = self.get_task(owner, id)?;
        let details = normalize_task(patch.merge_into(task.details()));
        validate_task(&details)?;

        let target = patch.status.unwrap_or_else(|| task.status());
        self.locks.with_lock(CollectionKey::Column(task.board_id, target), || {
            let mut ops = Vec::with_capacity(3);
            if details != task.details() {
                ops.push(WriteOp::UpdateTask { id, details });
            }
            if let Some(status) = patch.status {
                if status != task.status() {
                    let key = self.tail_key(owner, task.board_id, status)?;
                    ops.push(WriteOp::SetTaskStatus { id, status, key });
                }
                // re-placing on an unchanged status also heals a stray set entry
                ops.push(WriteOp::MutateBoardSets {
                    id: task.board_id,
                    mutation: resolve_board_set_mutation(&task, status),
                });
            }

            if !ops.is_empty() {
                self.store.apply(owner, &ops)?;
                debug!("Updated task {} ({} write(s))", task.label, ops.len());
            }
            self.get_task(owner, id)
        })
    }

    /// Move one task next to a neighbour, possibly into another column
    pub fn move_task(&self, owner: &OwnerId, id: TaskId, target: MoveTask) -> TrackerResult<Task> {
        let task = self.get_task(owner, id)?;
        let board_id = task.board_id;

        self.locks.with_lock(CollectionKey::Column(board_id, target.status), || {
            let column: Vec<Task> = self
                .store
                .column(owner, board_id, target.status)?
                .into_iter()
                .filter(|t| t.id != id)
                .collect();
            let ids: Vec<TaskId> = column.iter().map(|t| t.id).collect();
            let container = format!("the {} column", target.status);
            let slots = neighbours(&ids, target.after, target.before, &container)?;

            let keys: Vec<OrderKey> = column.iter().map(|t| t.order_key).collect();
            let key = place_between(&keys, slots, || {
                warn!(
                    "Ordering gap exhausted in {} column of board {board_id}, normalizing",
                    target.status
                );
                self.normalize_column(owner, &ids)
            })?;

            let summary = self.store.apply(
                owner,
                &[
                    WriteOp::SetTaskStatus { id, status: target.status, key },
                    WriteOp::MutateBoardSets {
                        id: board_id,
                        mutation: resolve_board_set_mutation(&task, target.status),
                    },
                ],
            )?;
            if summary.matched == 0 {
                return Err(TrackerError::task_not_found(id));
            }

            debug!("Moved task {} to {} at {key}", task.label, target.status);
            self.get_task(owner, id)
        })
    }

    /// Rewrite the order of one column.
    ///
    /// Tasks listed here that currently sit in another column of the same
    /// board are moved into this one. The list must cover every task that
    /// ends up in the column; keys end up as `1..=n`.
    pub fn reorder_column(
        &self,
        owner: &OwnerId,
        board_id: BoardId,
        status: TaskStatus,
        ordered: &[TaskId],
    ) -> TrackerResult<Vec<Task>> {
        let plan = plan_spaced_keys(ordered)?;
        self.get_board(owner, board_id)?;

        self.locks.with_lock(CollectionKey::Column(board_id, status), || {
            let tasks = self.store.board_tasks(owner, board_id)?;
            let find = |id: TaskId| tasks.iter().find(|t| t.id == id);

            if let Some(unknown) = ordered.iter().find(|id| find(**id).is_none()) {
                return Err(TrackerError::task_not_found(unknown));
            }
            if let Some(missing) =
                tasks.iter().find(|t| t.status() == status && !ordered.contains(&t.id))
            {
                return Err(TrackerError::InvalidInput(format!(
                    "Reorder of the {status} column must include {}",
                    missing.label
                )));
            }

            let mut spaced = Vec::with_capacity(plan.len());
            for (id, key) in plan {
                match find(id) {
                    Some(task) if task.status() != status => {
                        spaced.push(WriteOp::SetTaskStatus { id, status, key });
                        spaced.push(WriteOp::MutateBoardSets {
                            id: board_id,
                            mutation: resolve_board_set_mutation(task, status),
                        });
                    },
                    _ => spaced.push(WriteOp::SetTaskKey { id, key }),
                }
            }
            self.write_all(owner, &spaced)?;
            self.normalize_column(owner, ordered)?;

            debug!("Reordered {} task(s) in {status} column of board {board_id}", ordered.len());
            Ok(self.store.column(owner, board_id, status)?)
        })
    }

    /// Delete one task, detaching it from its board
    pub fn delete_task(&self, owner: &OwnerId, id: TaskId) -> TrackerResult<Task> {
        let task = self.get_task(owner, id)?;
        let summary = self.store.apply(owner, &detach_ops(&task))?;
        if summary.deleted == 0 {
            return Err(TrackerError::task_not_found(id));
        }
        info!("Deleted task {} ({id})", task.label);
        Ok(task)
    }

    /// Delete several tasks in one batch; returns how many were deleted
    pub fn delete_tasks(&self, owner: &OwnerId, ids: &[TaskId]) -> TrackerResult<usize> {
        if ids.is_empty() {
            return Err(TrackerError::InvalidInput("No tasks to delete".to_string()));
        }

        let mut ops = Vec::with_capacity(ids.len() * 2);
        for id in ids {
            match self.store.task(owner, *id)? {
                Some(task) => ops.extend(detach_ops(&task)),
                None => debug!("Skipping unknown task {id}"),
            }
        }
        if ops.is_empty() {
            return Ok(0);
        }

        let summary = self.store.apply(owner, &ops)?;
        info!("Deleted {} of {} requested task(s)", summary.deleted, ids.len());
        Ok(summary.deleted)
    }

    /// Key after the last task of a column
    fn tail_key(&self, owner: &OwnerId, board_id: BoardId, status: TaskStatus) -> TrackerResult<OrderKey> {
        let tail = self.store.column(owner, board_id, status)?.last().map(|t| t.order_key);
        Ok(compute_insertion_index(tail, None)?)
    }

    /// Rewrite a column's keys to `1..=n` in the given order
    fn normalize_column(&self, owner: &OwnerId, ordered: &[TaskId]) -> TrackerResult<()> {
        let ops: Vec<WriteOp> = normalize(ordered)
            .into_iter()
            .map(|(id, key)| WriteOp::SetTaskKey { id, key })
            .collect();
        if !ops.is_empty() {
            self.write_all(owner, &ops)?;
        }
        Ok(())
    }
}

fn detach_ops(task: &Task) -> [WriteOp; 2] {
    [
        WriteOp::DeleteTask { id: task.id },
        WriteOp::MutateBoardSets {
            id: task.board_id,
            mutation: SetMutation::Detach { task_id: task.id },
        },
    ]
}
