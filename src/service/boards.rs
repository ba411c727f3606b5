//! Board operations

use log::{debug, info, warn};
use serde::Serialize;

use super::{CollectionKey, Tracker, TrackerError, TrackerResult, neighbours, place_between};
use crate::core::models::{Board, BoardDetails, BoardId, OrderKey, OwnerId, Task, TaskStatus};
use crate::core::ports::{Store, WriteOp};
use crate::core::services::validation::{normalize_board, validate_board};
use crate::core::services::{compute_insertion_index, normalize, plan_spaced_keys};

/// One status column of a board
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    /// Column status
    pub status: TaskStatus,
    /// Tasks, ascending by ordering key
    pub tasks: Vec<Task>,
}

/// A board together with its columns
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    /// The board
    pub board: Board,
    /// One entry per status, in [`TaskStatus::ALL`] order
    pub columns: Vec<Column>,
}

impl<S: Store> Tracker<S> {
    /// Create a board at the end of the owner's board list
    pub fn create_board(&self, owner: &OwnerId, details: BoardDetails) -> TrackerResult<Board> {
        let details = normalize_board(details);
        validate_board(&details)?;

        self.locks.with_lock(CollectionKey::Boards(owner.clone()), || {
            if self.store.board_by_title(owner, &details.title)?.is_some() {
                return Err(TrackerError::Conflict(format!(
                    "A board titled '{}' already exists",
                    details.title
                )));
            }

            let tail = self.store.boards(owner)?.last().map(|b| b.order_key);
            let board = Board::new(owner.clone(), details, compute_insertion_index(tail, None)?);

            let summary = self.store.apply(owner, &[WriteOp::InsertBoard(Box::new(board.clone()))])?;
            if !summary.all_matched() {
                return Err(TrackerError::Conflict(format!(
                    "A board titled '{}' already exists",
                    board.title
                )));
            }

            info!("Created board {} '{}' for {owner}", board.id, board.title);
            Ok(board)
        })
    }

    /// Overwrite a board's title, description and priority
    pub fn update_board(
        &self,
        owner: &OwnerId,
        id: BoardId,
        details: BoardDetails,
    ) -> TrackerResult<Board> {
        let details = normalize_board(details);
        validate_board(&details)?;

        self.locks.with_lock(CollectionKey::Boards(owner.clone()), || {
            let current = self.get_board(owner, id)?;
            if current.title != details.title
                && let Some(other) = self.store.board_by_title(owner, &details.title)?
                && other.id != id
            {
                return Err(TrackerError::Conflict(format!(
                    "A board titled '{}' already exists",
                    details.title
                )));
            }

            self.store.apply(owner, &[WriteOp::UpdateBoard { id, details }])?;
            debug!("Updated board {id}");
            self.get_board(owner, id)
        })
    }

    /// One board
    pub fn get_board(&self, owner: &OwnerId, id: BoardId) -> TrackerResult<Board> {
        self.store.board(owner, id)?.ok_or_else(|| TrackerError::board_not_found(id))
    }

    /// Look a board up by id or by exact title
    pub fn resolve_board(&self, owner: &OwnerId, reference: &str) -> TrackerResult<Board> {
        if let Ok(id) = reference.parse::<BoardId>() {
            return self.get_board(owner, id);
        }
        self.store
            .board_by_title(owner, reference)?
            .ok_or_else(|| TrackerError::board_not_found(reference))
    }

    /// The owner's boards, ascending by ordering key
    pub fn list_boards(&self, owner: &OwnerId) -> TrackerResult<Vec<Board>> {
        Ok(self.store.boards(owner)?)
    }

    /// A board with its tasks grouped into status columns
    pub fn board_detail(&self, owner: &OwnerId, id: BoardId) -> TrackerResult<BoardDetail> {
        let board = self.get_board(owner, id)?;
        let tasks = self.store.board_tasks(owner, id)?;

        let columns = TaskStatus::ALL
            .iter()
            .map(|&status| Column {
                status,
                tasks: tasks.iter().filter(|t| t.status() == status).cloned().collect(),
            })
            .collect();

        Ok(BoardDetail { board, columns })
    }

    /// Delete a board and its tasks; returns how many tasks went with it
    pub fn delete_board(&self, owner: &OwnerId, id: BoardId) -> TrackerResult<usize> {
        self.locks.with_lock(CollectionKey::Boards(owner.clone()), || {
            let summary = self.store.apply(owner, &[WriteOp::DeleteBoard { id }])?;
            if summary.matched == 0 {
                return Err(TrackerError::board_not_found(id));
            }
            let tasks_removed = summary.deleted.saturating_sub(1);
            info!("Deleted board {id} with {tasks_removed} task(s)");
            Ok(tasks_removed)
        })
    }

    /// Move one board between two neighbours in the owner's board list.
    ///
    /// `after` is the board that will sit directly above, `before` the one
    /// directly below. When the gap between them has run out the list is
    /// renumbered to `1..=n` first.
    pub fn move_board(
        &self,
        owner: &OwnerId,
        id: BoardId,
        after: Option<BoardId>,
        before: Option<BoardId>,
    ) -> TrackerResult<Board> {
        if after == Some(id) || before == Some(id) {
            return Err(TrackerError::InvalidInput(
                "A board cannot be its own neighbour".to_string(),
            ));
        }

        self.locks.with_lock(CollectionKey::Boards(owner.clone()), || {
            self.get_board(owner, id)?;
            let siblings: Vec<Board> =
                self.store.boards(owner)?.into_iter().filter(|b| b.id != id).collect();
            let ids: Vec<BoardId> = siblings.iter().map(|b| b.id).collect();
            let slots = neighbours(&ids, after, before, "the board list")?;

            let keys: Vec<OrderKey> = siblings.iter().map(|b| b.order_key).collect();
            let key = place_between(&keys, slots, || {
                warn!("Ordering gap exhausted in board list of {owner}, normalizing");
                self.normalize_boards(owner, &ids)
            })?;

            let summary = self.store.apply(owner, &[WriteOp::SetBoardKey { id, key }])?;
            if summary.matched == 0 {
                return Err(TrackerError::board_not_found(id));
            }

            debug!("Moved board {id} to {key}");
            self.get_board(owner, id)
        })
    }

    /// Rewrite the order of all the owner's boards.
    ///
    /// `ordered` must list every board exactly once. Keys end up as
    /// `1..=n` in the requested order.
    pub fn reorder_boards(&self, owner: &OwnerId, ordered: &[BoardId]) -> TrackerResult<Vec<Board>> {
        let plan = plan_spaced_keys(ordered)?;

        self.locks.with_lock(CollectionKey::Boards(owner.clone()), || {
            let boards = self.store.boards(owner)?;
            if let Some(unknown) = ordered.iter().find(|id| !boards.iter().any(|b| b.id == **id)) {
                return Err(TrackerError::board_not_found(unknown));
            }
            if ordered.len() != boards.len() {
                return Err(TrackerError::InvalidInput(format!(
                    "Reorder must list all {} boards, got {}",
                    boards.len(),
                    ordered.len()
                )));
            }

            let spaced: Vec<WriteOp> =
                plan.into_iter().map(|(id, key)| WriteOp::SetBoardKey { id, key }).collect();
            self.write_all(owner, &spaced)?;
            self.normalize_boards(owner, ordered)?;

            debug!("Reordered {} boards for {owner}", ordered.len());
            Ok(self.store.boards(owner)?)
        })
    }

    /// Rewrite the board list's keys to `1..=n` in the given order
    fn normalize_boards(&self, owner: &OwnerId, ordered: &[BoardId]) -> TrackerResult<()> {
        let ops: Vec<WriteOp> = normalize(ordered)
            .into_iter()
            .map(|(id, key)| WriteOp::SetBoardKey { id, key })
            .collect();
        if !ops.is_empty() {
            self.write_all(owner, &ops)?;
        }
        Ok(())
    }
}
