//! Port implementations with injectable failures

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use sprintboard::adapters::DocumentStore;
use sprintboard::core::models::{Board, BoardId, OwnerId, Task, TaskId};
use sprintboard::core::ports::{
    BatchWriter, BoardRepository, SequenceCounter, TaskRepository, WriteOp, WriteSummary,
};

/// Wraps a [`DocumentStore`]; when armed, the next key-assignment batch
/// only gets its first half applied
#[derive(Debug)]
pub struct TruncatingStore {
    inner: DocumentStore,
    armed: AtomicBool,
}

impl TruncatingStore {
    pub fn new() -> Self {
        Self {
            inner: DocumentStore::in_memory(),
            armed: AtomicBool::new(false),
        }
    }

    /// Truncate the next key-assignment batch
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

fn is_key_write(op: &WriteOp) -> bool {
    matches!(op, WriteOp::SetBoardKey { .. } | WriteOp::SetTaskKey { .. })
}

impl BoardRepository for TruncatingStore {
    fn board(&self, owner: &OwnerId, id: BoardId) -> anyhow::Result<Option<Board>> {
        self.inner.board(owner, id)
    }

    fn boards(&self, owner: &OwnerId) -> anyhow::Result<Vec<Board>> {
        self.inner.boards(owner)
    }
}

impl TaskRepository for TruncatingStore {
    fn task(&self, owner: &OwnerId, id: TaskId) -> anyhow::Result<Option<Task>> {
        self.inner.task(owner, id)
    }

    fn tasks(&self, owner: &OwnerId) -> anyhow::Result<Vec<Task>> {
        self.inner.tasks(owner)
    }
}

impl SequenceCounter for TruncatingStore {
    fn next_value(&self, owner: &OwnerId, sequence: &str) -> anyhow::Result<u64> {
        self.inner.next_value(owner, sequence)
    }
}

impl BatchWriter for TruncatingStore {
    fn apply(&self, owner: &OwnerId, ops: &[WriteOp]) -> anyhow::Result<WriteSummary> {
        if ops.len() > 1
            && ops.iter().all(is_key_write)
            && self.armed.swap(false, Ordering::SeqCst)
        {
            let applied = self.inner.apply(owner, &ops[..ops.len() / 2])?;
            return Ok(WriteSummary {
                requested: ops.len(),
                ..applied
            });
        }
        self.inner.apply(owner, ops)
    }
}

/// Wraps a [`DocumentStore`]; a queued batch is committed just before the
/// next set rebuild, as if another request won the race to the store
#[derive(Debug)]
pub struct InterleavingStore {
    inner: DocumentStore,
    queued: Mutex<Option<(OwnerId, Vec<WriteOp>)>>,
}

impl InterleavingStore {
    pub fn new() -> Self {
        Self {
            inner: DocumentStore::in_memory(),
            queued: Mutex::new(None),
        }
    }

    /// Commit `ops` right before the next rebuild batch
    pub fn queue(&self, owner: OwnerId, ops: Vec<WriteOp>) {
        *self.queued.lock().unwrap() = Some((owner, ops));
    }
}

impl BoardRepository for InterleavingStore {
    fn board(&self, owner: &OwnerId, id: BoardId) -> anyhow::Result<Option<Board>> {
        self.inner.board(owner, id)
    }

    fn boards(&self, owner: &OwnerId) -> anyhow::Result<Vec<Board>> {
        self.inner.boards(owner)
    }
}

impl TaskRepository for InterleavingStore {
    fn task(&self, owner: &OwnerId, id: TaskId) -> anyhow::Result<Option<Task>> {
        self.inner.task(owner, id)
    }

    fn tasks(&self, owner: &OwnerId) -> anyhow::Result<Vec<Task>> {
        self.inner.tasks(owner)
    }
}

impl SequenceCounter for InterleavingStore {
    fn next_value(&self, owner: &OwnerId, sequence: &str) -> anyhow::Result<u64> {
        self.inner.next_value(owner, sequence)
    }
}

impl BatchWriter for InterleavingStore {
    fn apply(&self, owner: &OwnerId, ops: &[WriteOp]) -> anyhow::Result<WriteSummary> {
        if ops.iter().any(|op| matches!(op, WriteOp::RebuildBoardSets { .. }))
            && let Some((other, queued)) = self.queued.lock().unwrap().take()
        {
            self.inner.apply(&other, &queued)?;
        }
        self.inner.apply(owner, ops)
    }
}
