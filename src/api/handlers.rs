//! Pure API handlers
//!
//! These handlers parse loosely typed request bodies, call the tracker
//! and return `Result<T, ApiError>`. They know nothing about HTTP.

use std::str::FromStr;

use crate::core::models::{Board, BoardDetails, BoardId, OwnerId, Priority, Task, TaskId, TaskStatus};
use crate::core::ports::Store;
use crate::core::services::{IntegrityReport, UsageStats};
use crate::service::{BoardDetail, MoveTask, NewTask, RepairOutcome, TaskPatch, Tracker};

use super::error::ApiError;
use super::types::{
    BoardDeleteData, BoardsData, CreateBoardRequest, CreateTaskRequest, IdListRequest,
    MoveBoardRequest, MoveTaskRequest, TasksData, TasksDeleteData, UpdateBoardRequest, UpdateTaskRequest,
};

fn parse<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ApiError::bad_request(e.to_string()))
}

fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map(parse).transpose()
}

fn parse_ids<T>(ids: &[String]) -> Result<Vec<T>, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    ids.iter().map(|id| parse(id)).collect()
}

// =============================================================================
// BOARDS
// =============================================================================

/// List the owner's boards
pub fn list_boards<S: Store>(tracker: &Tracker<S>, owner: &OwnerId) -> Result<BoardsData, ApiError> {
    Ok(BoardsData {
        boards: tracker.list_boards(owner)?,
    })
}

/// Create a board
pub fn create_board<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    req: CreateBoardRequest,
) -> Result<Board, ApiError> {
    let details = BoardDetails {
        title: req.title,
        description: req.description,
        priority: parse_opt(req.priority.as_deref())?.unwrap_or_default(),
    };
    Ok(tracker.create_board(owner, details)?)
}

/// Get a board with its columns
pub fn get_board<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    id: &str,
) -> Result<BoardDetail, ApiError> {
    Ok(tracker.board_detail(owner, parse(id)?)?)
}

/// Update a board's fields
pub fn update_board<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    id: &str,
    req: UpdateBoardRequest,
) -> Result<Board, ApiError> {
    let id: BoardId = parse(id)?;
    let priority = match parse_opt::<Priority>(req.priority.as_deref())? {
        Some(priority) => priority,
        None => tracker.get_board(owner, id)?.priority,
    };
    let details = BoardDetails {
        title: req.title,
        description: req.description,
        priority,
    };
    Ok(tracker.update_board(owner, id, details)?)
}

/// Delete a board and its tasks
pub fn delete_board<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    id: &str,
) -> Result<BoardDeleteData, ApiError> {
    let board_id: BoardId = parse(id)?;
    let tasks_removed = tracker.delete_board(owner, board_id)?;
    Ok(BoardDeleteData {
        id: board_id.to_string(),
        tasks_removed,
    })
}

/// Move a board next to a neighbour
pub fn move_board<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    id: &str,
    req: &MoveBoardRequest,
) -> Result<Board, ApiError> {
    Ok(tracker.move_board(
        owner,
        parse(id)?,
        parse_opt(req.after.as_deref())?,
        parse_opt(req.before.as_deref())?,
    )?)
}

/// Reorder all the owner's boards
pub fn reorder_boards<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    req: &IdListRequest,
) -> Result<BoardsData, ApiError> {
    let ids: Vec<BoardId> = parse_ids(&req.ids)?;
    Ok(BoardsData {
        boards: tracker.reorder_boards(owner, &ids)?,
    })
}

/// Check a board's tracking sets
pub fn check_board<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    id: &str,
) -> Result<IntegrityReport, ApiError> {
    Ok(tracker.check_board(owner, parse(id)?)?)
}

/// Rebuild a board's tracking sets
pub fn repair_board<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    id: &str,
) -> Result<RepairOutcome, ApiError> {
    Ok(tracker.repair_board(owner, parse(id)?)?)
}

/// Reorder one column of a board
pub fn reorder_column<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    board_id: &str,
    status: &str,
    req: &IdListRequest,
) -> Result<TasksData, ApiError> {
    let status: TaskStatus = parse(status)?;
    let ids: Vec<TaskId> = parse_ids(&req.ids)?;
    Ok(TasksData {
        tasks: tracker.reorder_column(owner, parse(board_id)?, status, &ids)?,
    })
}

// =============================================================================
// TASKS
// =============================================================================

/// Create a task
pub fn create_task<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    req: CreateTaskRequest,
) -> Result<Task, ApiError> {
    let board_id: BoardId = parse(&req.board_id)?;
    let new = NewTask {
        title: req.title,
        description: req.description,
        priority: parse_opt(req.priority.as_deref())?.unwrap_or_default(),
        status: parse_opt(req.status.as_deref())?.unwrap_or_default(),
        start_date: req.start_date,
        due_date: req.due_date,
    };
    Ok(tracker.create_task(owner, board_id, new)?)
}

/// Get a task
pub fn get_task<S: Store>(tracker: &Tracker<S>, owner: &OwnerId, id: &str) -> Result<Task, ApiError> {
    Ok(tracker.get_task(owner, parse(id)?)?)
}

/// Partially update a task
pub fn update_task<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    id: &str,
    req: UpdateTaskRequest,
) -> Result<Task, ApiError> {
    let patch = TaskPatch {
        title: req.title,
        description: req.description,
        priority: parse_opt(req.priority.as_deref())?,
        start_date: req.start_date,
        due_date: req.due_date,
        status: parse_opt(req.status.as_deref())?,
    };
    Ok(tracker.update_task(owner, parse(id)?, &patch)?)
}

/// Move a task next to a neighbour
pub fn move_task<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    id: &str,
    req: &MoveTaskRequest,
) -> Result<Task, ApiError> {
    let target = MoveTask {
        status: parse(&req.status)?,
        after: parse_opt(req.after.as_deref())?,
        before: parse_opt(req.before.as_deref())?,
    };
    Ok(tracker.move_task(owner, parse(id)?, target)?)
}

/// Delete a task
pub fn delete_task<S: Store>(tracker: &Tracker<S>, owner: &OwnerId, id: &str) -> Result<Task, ApiError> {
    Ok(tracker.delete_task(owner, parse(id)?)?)
}

/// Delete several tasks
pub fn delete_tasks<S: Store>(
    tracker: &Tracker<S>,
    owner: &OwnerId,
    req: &IdListRequest,
) -> Result<TasksDeleteData, ApiError> {
    let ids: Vec<TaskId> = parse_ids(&req.ids)?;
    Ok(TasksDeleteData {
        deleted: tracker.delete_tasks(owner, &ids)?,
    })
}

// =============================================================================
// STATS
// =============================================================================

/// Usage statistics for the owner
pub fn get_stats<S: Store>(tracker: &Tracker<S>, owner: &OwnerId) -> Result<UsageStats, ApiError> {
    Ok(tracker.usage_stats(owner)?)
}
