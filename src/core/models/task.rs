//! Task model
//!
//! A task is a unit of work on exactly one board. Its completion flag
//! always mirrors `status == Done`, so both are only changed together
//! through [`Task::set_status`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BoardId, OrderKey, OwnerId, Priority, TaskId, TaskLabel, TaskStatus};

/// Editable task fields (everything except status and position)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// What needs to be done
    pub title: String,
    /// Longer description
    pub description: String,
    /// Priority tier
    #[serde(default)]
    pub priority: Priority,
    /// Planned start
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline; never earlier than `start_date`
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// A task on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Owning user
    pub owner: OwnerId,
    /// Board this task belongs to
    pub board_id: BoardId,
    /// Per-owner sequence label (e.g. `KAN-3`)
    pub label: TaskLabel,
    /// What needs to be done
    pub title: String,
    /// Longer description
    pub description: String,
    /// Priority tier
    #[serde(default)]
    pub priority: Priority,
    status: TaskStatus,
    is_completed: bool,
    /// Position within the (board, status) column
    pub order_key: OrderKey,
    /// Planned start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// When created
    pub created_at: DateTime<Utc>,
    /// When last modified
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a task in `status`, placed at `order_key` in that column
    #[must_use]
    pub fn new(
        owner: OwnerId,
        board_id: BoardId,
        label: TaskLabel,
        details: TaskDetails,
        status: TaskStatus,
        order_key: OrderKey,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::generate(),
            owner,
            board_id,
            label,
            title: details.title,
            description: details.description,
            priority: details.priority,
            status,
            is_completed: status.is_done(),
            order_key,
            start_date: details.start_date,
            due_date: details.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Whether the task is DONE
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Change status, keeping the completion flag consistent
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.is_completed = status.is_done();
        self.updated_at = Utc::now();
    }

    /// Re-derive the completion flag from the status; returns whether it
    /// was out of step
    pub(crate) fn sync_completion(&mut self) -> bool {
        let done = self.status.is_done();
        let stale = self.is_completed != done;
        self.is_completed = done;
        stale
    }

    /// Current editable fields
    #[must_use]
    pub fn details(&self) -> TaskDetails {
        TaskDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            start_date: self.start_date,
            due_date: self.due_date,
        }
    }

    /// Overwrite the editable fields
    pub fn apply_details(&mut self, details: TaskDetails) {
        self.title = details.title;
        self.description = details.description;
        self.priority = details.priority;
        self.start_date = details.start_date;
        self.due_date = details.due_date;
        self.updated_at = Utc::now();
    }
}
