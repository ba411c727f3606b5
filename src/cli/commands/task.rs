//! Task command - manage tasks

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sprintboard::core::models::{TaskId, TaskStatus};
use sprintboard::output::{OperationResult, Render, TaskList};
use sprintboard::service::{MoveTask, NewTask, TaskPatch};

use super::parse_arg;
use crate::cli::app::{Context, TaskAction};

/// Handle task subcommands
pub fn task(action: TaskAction, ctx: &Context) -> anyhow::Result<()> {
    match action {
        TaskAction::Add {
            board,
            title,
            description,
            priority,
            status,
            start,
            due,
        } => {
            let new = NewTask {
                title,
                description,
                priority: parse_arg(&priority)?,
                status: parse_arg(&status)?,
                start_date: start.as_deref().map(parse_date).transpose()?,
                due_date: due.as_deref().map(parse_date).transpose()?,
            };
            add(ctx, &board, new)
        },
        TaskAction::Show { task } => {
            ctx.tracker.resolve_task(&ctx.owner, &task)?.render(ctx.mode);
            Ok(())
        },
        TaskAction::Update {
            task,
            title,
            description,
            priority,
            status,
            start,
            due,
        } => {
            let patch = TaskPatch {
                title,
                description,
                priority: priority.as_deref().map(parse_arg).transpose()?,
                status: status.as_deref().map(parse_arg).transpose()?,
                start_date: start.as_deref().map(parse_date).transpose()?,
                due_date: due.as_deref().map(parse_date).transpose()?,
            };
            update(ctx, &task, &patch)
        },
        TaskAction::Move {
            task,
            status,
            after,
            before,
        } => move_to(ctx, &task, &status, after.as_deref(), before.as_deref()),
        TaskAction::Reorder {
            board,
            status,
            tasks,
        } => reorder(ctx, &board, &status, &tasks),
        TaskAction::Delete { tasks } => delete(ctx, &tasks),
    }
}

/// Accept a plain date (midnight UTC) or a full RFC 3339 timestamp
fn parse_date(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| anyhow::anyhow!("Invalid date '{value}': {e}"))
}

fn resolve_id(ctx: &Context, reference: &str) -> anyhow::Result<TaskId> {
    Ok(ctx.tracker.resolve_task(&ctx.owner, reference)?.id)
}

fn add(ctx: &Context, board: &str, new: NewTask) -> anyhow::Result<()> {
    let board = ctx.tracker.resolve_board(&ctx.owner, board)?;
    let task = ctx.tracker.create_task(&ctx.owner, board.id, new)?;
    task.render(ctx.mode);
    Ok(())
}

fn update(ctx: &Context, reference: &str, patch: &TaskPatch) -> anyhow::Result<()> {
    let id = resolve_id(ctx, reference)?;
    ctx.tracker.update_task(&ctx.owner, id, patch)?.render(ctx.mode);
    Ok(())
}

fn move_to(
    ctx: &Context,
    reference: &str,
    status: &str,
    after: Option<&str>,
    before: Option<&str>,
) -> anyhow::Result<()> {
    let id = resolve_id(ctx, reference)?;
    let target = MoveTask {
        status: parse_arg(status)?,
        after: after.map(|r| resolve_id(ctx, r)).transpose()?,
        before: before.map(|r| resolve_id(ctx, r)).transpose()?,
    };
    ctx.tracker.move_task(&ctx.owner, id, target)?.render(ctx.mode);
    Ok(())
}

fn reorder(ctx: &Context, board: &str, status: &str, references: &[String]) -> anyhow::Result<()> {
    let board = ctx.tracker.resolve_board(&ctx.owner, board)?;
    let status: TaskStatus = parse_arg(status)?;
    let ids = references
        .iter()
        .map(|r| resolve_id(ctx, r))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let tasks = ctx.tracker.reorder_column(&ctx.owner, board.id, status, &ids)?;
    TaskList { status, tasks }.render(ctx.mode);
    Ok(())
}

fn delete(ctx: &Context, references: &[String]) -> anyhow::Result<()> {
    let ids = references
        .iter()
        .map(|r| resolve_id(ctx, r))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let deleted = ctx.tracker.delete_tasks(&ctx.owner, &ids)?;
    OperationResult {
        success: true,
        message: format!("Deleted {deleted} task(s)"),
    }
    .render(ctx.mode);
    Ok(())
}
