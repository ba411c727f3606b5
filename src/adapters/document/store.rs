//! Mutex-guarded document store
//!
//! Implements all of the persistence ports. A write batch is applied to a
//! copy of the documents, persisted (when file-backed), and only then
//! swapped in, so a failed write leaves the previous state untouched.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, trace};

use crate::core::models::{Board, BoardId, OwnerId, Task, TaskId};
use crate::core::ports::{
    BatchWriter, BoardRepository, SequenceCounter, TaskRepository, WriteOp, WriteSummary,
};
use crate::core::services::rebuild_sets;

use super::snapshot::Documents;

/// Document store backing boards, tasks and counters
#[derive(Debug)]
pub struct DocumentStore {
    state: Mutex<Documents>,
    path: Option<PathBuf>,
}

impl DocumentStore {
    /// A store that lives only as long as the process
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(Documents::default()),
            path: None,
        }
    }

    /// A store persisted to a JSON file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let documents = Documents::load(&path)?;
        debug!(
            "Opened {} ({} boards, {} tasks)",
            path.display(),
            documents.boards.len(),
            documents.tasks.len()
        );
        Ok(Self {
            state: Mutex::new(documents),
            path: Some(path),
        })
    }

    /// Backing file, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Documents>> {
        self.state.lock().map_err(|_| anyhow::anyhow!("Document store lock poisoned"))
    }

    /// Run `f` on a copy of the documents; persist and commit if it says so
    fn transact<R>(
        &self,
        f: impl FnOnce(&mut Documents) -> (R, bool),
    ) -> anyhow::Result<R> {
        let mut guard = self.lock()?;
        let mut next = guard.clone();
        let (result, dirty) = f(&mut next);
        if dirty {
            if let Some(path) = &self.path {
                next.save(path)?;
            }
            *guard = next;
        }
        Ok(result)
    }
}

impl BoardRepository for DocumentStore {
    fn board(&self, owner: &OwnerId, id: BoardId) -> anyhow::Result<Option<Board>> {
        let docs = self.lock()?;
        Ok(docs.boards.get(&id).filter(|b| &b.owner == owner).cloned())
    }

    fn boards(&self, owner: &OwnerId) -> anyhow::Result<Vec<Board>> {
        let docs = self.lock()?;
        let mut boards: Vec<Board> =
            docs.boards.values().filter(|b| &b.owner == owner).cloned().collect();
        boards.sort_by_key(|b| b.order_key);
        Ok(boards)
    }
}

impl TaskRepository for DocumentStore {
    fn task(&self, owner: &OwnerId, id: TaskId) -> anyhow::Result<Option<Task>> {
        let docs = self.lock()?;
        Ok(docs.tasks.get(&id).filter(|t| &t.owner == owner).cloned())
    }

    fn tasks(&self, owner: &OwnerId) -> anyhow::Result<Vec<Task>> {
        let docs = self.lock()?;
        Ok(docs.tasks.values().filter(|t| &t.owner == owner).cloned().collect())
    }
}

impl SequenceCounter for DocumentStore {
    fn next_value(&self, owner: &OwnerId, sequence: &str) -> anyhow::Result<u64> {
        self.transact(|docs| {
            let counter = docs
                .sequences
                .entry(owner.clone())
                .or_default()
                .entry(sequence.to_string())
                .or_insert(0);
            *counter += 1;
            (*counter, true)
        })
    }
}

impl BatchWriter for DocumentStore {
    fn apply(&self, owner: &OwnerId, ops: &[WriteOp]) -> anyhow::Result<WriteSummary> {
        self.transact(|docs| {
            let mut summary = WriteSummary {
                requested: ops.len(),
                ..WriteSummary::default()
            };
            for op in ops {
                apply_op(docs, owner, op, &mut summary);
            }
            trace!("Applied batch of {} for {owner}: {summary:?}", ops.len());
            let dirty = summary.modified > 0 || summary.deleted > 0;
            (summary, dirty)
        })
    }
}

fn owned_board<'a>(docs: &'a mut Documents, owner: &OwnerId, id: BoardId) -> Option<&'a mut Board> {
    docs.boards.get_mut(&id).filter(|b| &b.owner == owner)
}

fn owned_task<'a>(docs: &'a mut Documents, owner: &OwnerId, id: TaskId) -> Option<&'a mut Task> {
    docs.tasks.get_mut(&id).filter(|t| &t.owner == owner)
}

/// Record one matched operation and whether it changed anything
fn tally(summary: &mut WriteSummary, changed: bool) {
    summary.matched += 1;
    if changed {
        summary.modified += 1;
    }
}

fn apply_op(docs: &mut Documents, owner: &OwnerId, op: &WriteOp, summary: &mut WriteSummary) {
    match op {
        WriteOp::InsertBoard(board) => {
            let duplicate = docs
                .boards
                .values()
                .any(|b| &b.owner == owner && (b.id == board.id || b.title == board.title));
            if &board.owner == owner && !duplicate {
                docs.boards.insert(board.id, board.as_ref().clone());
                tally(summary, true);
            }
        },
        WriteOp::UpdateBoard { id, details } => {
            if let Some(board) = owned_board(docs, owner, *id) {
                let changed = board.details() != *details;
                if changed {
                    board.apply_details(details.clone());
                }
                tally(summary, changed);
            }
        },
        WriteOp::DeleteBoard { id } => {
            if owned_board(docs, owner, *id).is_some() {
                docs.boards.remove(id);
                let before = docs.tasks.len();
                docs.tasks.retain(|_, t| t.board_id != *id);
                summary.deleted += 1 + (before - docs.tasks.len());
                tally(summary, true);
            }
        },
        WriteOp::SetBoardKey { id, key } => {
            if let Some(board) = owned_board(docs, owner, *id) {
                let changed = board.order_key != *key;
                board.order_key = *key;
                tally(summary, changed);
            }
        },
        WriteOp::MutateBoardSets { id, mutation } => {
            if let Some(board) = owned_board(docs, owner, *id) {
                let changed = board.apply_set_mutation(mutation);
                tally(summary, changed);
            }
        },
        WriteOp::RebuildBoardSets { id } => {
            let tasks: Vec<Task> =
                docs.tasks.values().filter(|t| t.board_id == *id).cloned().collect();
            if let Some(board) = owned_board(docs, owner, *id) {
                let sets = rebuild_sets(*id, &tasks);
                let before = board.progress();
                let changed = board.sets() != &sets;
                board.replace_sets(sets);
                let stale = before.to_bits() != board.progress().to_bits();
                tally(summary, changed || stale);
            }
        },
        WriteOp::InsertTask(task) => {
            let board_exists = docs
                .boards
                .get(&task.board_id)
                .is_some_and(|b| &b.owner == owner);
            if &task.owner == owner && board_exists && !docs.tasks.contains_key(&task.id) {
                docs.tasks.insert(task.id, task.as_ref().clone());
                tally(summary, true);
            }
        },
        WriteOp::UpdateTask { id, details } => {
            if let Some(task) = owned_task(docs, owner, *id) {
                let changed = task.details() != *details;
                if changed {
                    task.apply_details(details.clone());
                }
                tally(summary, changed);
            }
        },
        WriteOp::SetTaskStatus { id, status, key } => {
            if let Some(task) = owned_task(docs, owner, *id) {
                let changed = task.status() != *status || task.order_key != *key;
                if changed {
                    task.set_status(*status);
                    task.order_key = *key;
                }
                tally(summary, changed);
            }
        },
        WriteOp::SetTaskKey { id, key } => {
            if let Some(task) = owned_task(docs, owner, *id) {
                let changed = task.order_key != *key;
                task.order_key = *key;
                tally(summary, changed);
            }
        },
        WriteOp::DeleteTask { id } => {
            if owned_task(docs, owner, *id).is_some() {
                docs.tasks.remove(id);
                summary.deleted += 1;
                tally(summary, true);
            }
        },
    }
}
