//! Usage statistics
//!
//! Per-owner counts of boards and tasks, broken down by status and
//! priority.

use serde::Serialize;

use crate::core::models::{Board, Priority, Task, TaskStatus};

/// Task counts per status column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// TODO tasks
    pub todo: usize,
    /// IN_PROGRESS tasks
    pub in_progress: usize,
    /// DONE tasks
    pub done: usize,
    /// SAVED_FOR_LATER tasks
    pub saved_for_later: usize,
}

impl StatusCounts {
    fn bump(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Todo => self.todo += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Done => self.done += 1,
            TaskStatus::SavedForLater => self.saved_for_later += 1,
        }
    }
}

/// Task counts for one priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    /// The tier
    pub priority: Priority,
    /// All tasks with this priority
    pub total: usize,
    /// TODO or IN_PROGRESS
    pub pending: usize,
    /// DONE
    pub done: usize,
}

/// Usage statistics for one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageStats {
    /// Number of boards
    pub total_boards: usize,
    /// Number of tasks
    pub total_tasks: usize,
    /// Tasks per status
    pub by_status: StatusCounts,
    /// Tasks per priority, most urgent first
    pub by_priority: Vec<PriorityBreakdown>,
}

/// Compute statistics over an owner's boards and tasks
#[must_use]
pub fn usage_stats(boards: &[Board], tasks: &[Task]) -> UsageStats {
    let mut by_status = StatusCounts::default();
    let mut by_priority: Vec<PriorityBreakdown> = Priority::ALL
        .iter()
        .map(|&priority| PriorityBreakdown {
            priority,
            total: 0,
            pending: 0,
            done: 0,
        })
        .collect();

    for task in tasks {
        by_status.bump(task.status());
        if let Some(entry) = by_priority.iter_mut().find(|b| b.priority == task.priority) {
            entry.total += 1;
            if task.status().is_pending() {
                entry.pending += 1;
            } else if task.status().is_done() {
                entry.done += 1;
            }
        }
    }

    UsageStats {
        total_boards: boards.len(),
        total_tasks: tasks.len(),
        by_status,
        by_priority,
    }
}
