//! Repair command - check and rebuild board task sets

use sprintboard::output::{Render, RepairSummary};
use sprintboard::service::RepairOutcome;

use crate::cli::app::Context;

/// Check (and unless `check_only`, repair) one board or all of them
pub fn repair(board: Option<&str>, check_only: bool, ctx: &Context) -> anyhow::Result<()> {
    let boards = match board {
        Some(reference) => vec![ctx.tracker.resolve_board(&ctx.owner, reference)?],
        None => ctx.tracker.list_boards(&ctx.owner)?,
    };

    if check_only {
        for board in boards {
            ctx.tracker.check_board(&ctx.owner, board.id)?.render(ctx.mode);
        }
        return Ok(());
    }

    let outcomes = boards
        .iter()
        .map(|b| ctx.tracker.repair_board(&ctx.owner, b.id))
        .collect::<Result<Vec<RepairOutcome>, _>>()?;
    RepairSummary { boards: outcomes }.render(ctx.mode);
    Ok(())
}
