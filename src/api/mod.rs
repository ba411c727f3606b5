//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and handlers
//! that can be used by any HTTP server implementation (`tiny_http`, axum, etc.)
//! or directly by other clients.
//!
//! ## Design
//!
//! - **Handlers are thin**: Parse typed input, call the [`Tracker`](crate::service::Tracker), return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ErrorCode};
pub use handlers::{
    check_board, create_board, create_task, delete_board, delete_task, delete_tasks, get_board,
    get_stats, get_task, list_boards, move_board, move_task, reorder_boards, reorder_column,
    repair_board, update_board, update_task,
};
pub use types::{
    ApiResponse, BoardDeleteData, BoardsData, CreateBoardRequest, CreateTaskRequest,
    IdListRequest, MoveBoardRequest, MoveTaskRequest, TasksData, TasksDeleteData,
    UpdateBoardRequest, UpdateTaskRequest,
};
