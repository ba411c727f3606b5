//! Board repository port
//!
//! Read access to boards. All lookups are scoped to an owner: a board
//! owned by someone else is indistinguishable from a missing one.

use crate::core::models::{Board, BoardId, OwnerId};

/// Read access to boards
pub trait BoardRepository: Send + Sync {
    /// Find one board
    fn board(&self, owner: &OwnerId, id: BoardId) -> anyhow::Result<Option<Board>>;

    /// All of an owner's boards, ascending by ordering key
    fn boards(&self, owner: &OwnerId) -> anyhow::Result<Vec<Board>>;

    /// Find a board by its (per-owner unique) title
    fn board_by_title(&self, owner: &OwnerId, title: &str) -> anyhow::Result<Option<Board>> {
        Ok(self.boards(owner)?.into_iter().find(|b| b.title == title))
    }
}
