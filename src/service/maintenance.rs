//! Integrity checks, repair and statistics

use log::{info, warn};
use serde::Serialize;

use super::{Tracker, TrackerResult};
use crate::core::models::{Board, BoardId, OwnerId};
use crate::core::ports::{Store, WriteOp};
use crate::core::services::{IntegrityReport, UsageStats, check_board, usage_stats};

/// What a repair found and the board afterwards
#[derive(Debug, Clone, Serialize)]
pub struct RepairOutcome {
    /// Report taken before repairing
    pub report: IntegrityReport,
    /// Board after the repair
    pub board: Board,
}

impl RepairOutcome {
    /// Whether anything had to be fixed
    #[must_use]
    pub fn repaired(&self) -> bool {
        !self.report.is_consistent()
    }
}

impl<S: Store> Tracker<S> {
    /// Compare a board's tracking sets with its tasks
    pub fn check_board(&self, owner: &OwnerId, id: BoardId) -> TrackerResult<IntegrityReport> {
        let board = self.get_board(owner, id)?;
        let tasks = self.store.board_tasks(owner, id)?;
        Ok(check_board(&board, &tasks))
    }

    /// Rebuild a board's tracking sets from its tasks' statuses.
    ///
    /// The rebuild happens inside the store batch, so a status change that
    /// commits after the check is folded in rather than overwritten.
    pub fn repair_board(&self, owner: &OwnerId, id: BoardId) -> TrackerResult<RepairOutcome> {
        let board = self.get_board(owner, id)?;
        let tasks = self.store.board_tasks(owner, id)?;
        let report = check_board(&board, &tasks);

        if report.is_consistent() {
            return Ok(RepairOutcome { report, board });
        }

        warn!("Board {id} has {} inconsistencies, rebuilding sets", report.issues.len());
        self.store.apply(owner, &[WriteOp::RebuildBoardSets { id }])?;
        info!("Repaired board {id}");

        Ok(RepairOutcome {
            report,
            board: self.get_board(owner, id)?,
        })
    }

    /// Check and repair every board of the owner
    pub fn repair_all(&self, owner: &OwnerId) -> TrackerResult<Vec<RepairOutcome>> {
        self.store
            .boards(owner)?
            .into_iter()
            .map(|board| self.repair_board(owner, board.id))
            .collect()
    }

    /// Counts of boards and tasks by status and priority
    pub fn usage_stats(&self, owner: &OwnerId) -> TrackerResult<UsageStats> {
        let boards = self.store.boards(owner)?;
        let tasks = self.store.tasks(owner)?;
        Ok(usage_stats(&boards, &tasks))
    }
}
