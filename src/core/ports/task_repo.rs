//! Task repository port
//!
//! Read access to tasks, scoped to an owner.

use crate::core::models::{BoardId, OwnerId, Task, TaskId, TaskStatus};

/// Read access to tasks
pub trait TaskRepository: Send + Sync {
    /// Find one task
    fn task(&self, owner: &OwnerId, id: TaskId) -> anyhow::Result<Option<Task>>;

    /// All of an owner's tasks
    fn tasks(&self, owner: &OwnerId) -> anyhow::Result<Vec<Task>>;

    /// Tasks of one board, ascending by ordering key within each status
    fn board_tasks(&self, owner: &OwnerId, board_id: BoardId) -> anyhow::Result<Vec<Task>> {
        let mut tasks: Vec<Task> =
            self.tasks(owner)?.into_iter().filter(|t| t.board_id == board_id).collect();
        tasks.sort_by(|a, b| (a.status(), a.order_key).cmp(&(b.status(), b.order_key)));
        Ok(tasks)
    }

    /// One column (board + status), ascending by ordering key
    fn column(
        &self,
        owner: &OwnerId,
        board_id: BoardId,
        status: TaskStatus,
    ) -> anyhow::Result<Vec<Task>> {
        Ok(self
            .board_tasks(owner, board_id)?
            .into_iter()
            .filter(|t| t.status() == status)
            .collect())
    }
}
