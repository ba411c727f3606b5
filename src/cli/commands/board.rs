//! Board command - manage boards

use sprintboard::core::models::{BoardDetails, BoardId, Priority};
use sprintboard::output::{BoardList, OperationResult, Render};

use super::parse_arg;
use crate::cli::app::{BoardAction, Context};

/// Handle board subcommands
pub fn board(action: BoardAction, ctx: &Context) -> anyhow::Result<()> {
    match action {
        BoardAction::List => list(ctx),
        BoardAction::Create {
            title,
            description,
            priority,
        } => create(ctx, title, description, &priority),
        BoardAction::Show { board } => show(ctx, &board),
        BoardAction::Update {
            board,
            title,
            description,
            priority,
        } => update(ctx, &board, title, description, priority.as_deref()),
        BoardAction::Delete { board } => delete(ctx, &board),
        BoardAction::Move { board, after, before } => {
            move_to(ctx, &board, after.as_deref(), before.as_deref())
        },
        BoardAction::Reorder { boards } => reorder(ctx, &boards),
    }
}

fn list(ctx: &Context) -> anyhow::Result<()> {
    let boards = ctx.tracker.list_boards(&ctx.owner)?;
    BoardList { boards }.render(ctx.mode);
    Ok(())
}

fn create(ctx: &Context, title: String, description: String, priority: &str) -> anyhow::Result<()> {
    let details = BoardDetails {
        title,
        description,
        priority: parse_arg::<Priority>(priority)?,
    };
    let board = ctx.tracker.create_board(&ctx.owner, details)?;
    board.render(ctx.mode);
    Ok(())
}

fn show(ctx: &Context, reference: &str) -> anyhow::Result<()> {
    let board = ctx.tracker.resolve_board(&ctx.owner, reference)?;
    ctx.tracker.board_detail(&ctx.owner, board.id)?.render(ctx.mode);
    Ok(())
}

fn update(
    ctx: &Context,
    reference: &str,
    title: Option<String>,
    description: Option<String>,
    priority: Option<&str>,
) -> anyhow::Result<()> {
    let board = ctx.tracker.resolve_board(&ctx.owner, reference)?;
    let mut details = board.details();
    if let Some(title) = title {
        details.title = title;
    }
    if let Some(description) = description {
        details.description = description;
    }
    if let Some(priority) = priority {
        details.priority = parse_arg(priority)?;
    }

    let updated = ctx.tracker.update_board(&ctx.owner, board.id, details)?;
    updated.render(ctx.mode);
    Ok(())
}

fn delete(ctx: &Context, reference: &str) -> anyhow::Result<()> {
    let board = ctx.tracker.resolve_board(&ctx.owner, reference)?;
    let tasks_removed = ctx.tracker.delete_board(&ctx.owner, board.id)?;
    OperationResult {
        success: true,
        message: format!("Deleted board '{}' and {tasks_removed} task(s)", board.title),
    }
    .render(ctx.mode);
    Ok(())
}

fn resolve_id(ctx: &Context, reference: &str) -> anyhow::Result<BoardId> {
    Ok(ctx.tracker.resolve_board(&ctx.owner, reference)?.id)
}

fn move_to(
    ctx: &Context,
    reference: &str,
    after: Option<&str>,
    before: Option<&str>,
) -> anyhow::Result<()> {
    let id = resolve_id(ctx, reference)?;
    let after = after.map(|r| resolve_id(ctx, r)).transpose()?;
    let before = before.map(|r| resolve_id(ctx, r)).transpose()?;
    ctx.tracker.move_board(&ctx.owner, id, after, before)?.render(ctx.mode);
    Ok(())
}

fn reorder(ctx: &Context, references: &[String]) -> anyhow::Result<()> {
    let ids = references
        .iter()
        .map(|r| resolve_id(ctx, r))
        .collect::<anyhow::Result<Vec<BoardId>>>()?;
    let boards = ctx.tracker.reorder_boards(&ctx.owner, &ids)?;
    BoardList { boards }.render(ctx.mode);
    Ok(())
}
