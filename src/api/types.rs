//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiErrorData;
use crate::core::models::{Board, Task};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for creating a board
#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    /// Board title
    pub title: String,
    /// Board description
    pub description: String,
    /// Optional priority (low, medium, high, urgent)
    #[serde(default)]
    pub priority: Option<String>,
}

/// Request body for updating a board; priority is kept when absent
pub type UpdateBoardRequest = CreateBoardRequest;

/// Request body for any bulk reorder or bulk delete
#[derive(Debug, Deserialize)]
pub struct IdListRequest {
    /// Ids in the desired order
    pub ids: Vec<String>,
}

/// Request body for creating a task
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Board to add the task to
    pub board_id: String,
    /// Task title
    pub title: String,
    /// Task description
    pub description: String,
    /// Optional priority (default low)
    #[serde(default)]
    pub priority: Option<String>,
    /// Optional starting status (default TODO)
    #[serde(default)]
    pub status: Option<String>,
    /// Planned start
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Request body for a partial task update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New priority
    #[serde(default)]
    pub priority: Option<String>,
    /// New status
    #[serde(default)]
    pub status: Option<String>,
    /// New planned start
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// New deadline
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Request body for moving a board within the board list
#[derive(Debug, Deserialize)]
pub struct MoveBoardRequest {
    /// Board that will sit directly above
    #[serde(default)]
    pub after: Option<String>,
    /// Board that will sit directly below
    #[serde(default)]
    pub before: Option<String>,
}

/// Request body for a drag-and-drop move
#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    /// Destination column
    pub status: String,
    /// Task that will sit directly above
    #[serde(default)]
    pub after: Option<String>,
    /// Task that will sit directly below
    #[serde(default)]
    pub before: Option<String>,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Response data for board listings and reorders
#[derive(Debug, Serialize)]
pub struct BoardsData {
    /// Boards, ascending by ordering key
    pub boards: Vec<Board>,
}

/// Response data for task lists (column reorder)
#[derive(Debug, Serialize)]
pub struct TasksData {
    /// Tasks, ascending by ordering key
    pub tasks: Vec<Task>,
}

/// Response data for deleting a board
#[derive(Debug, Serialize)]
pub struct BoardDeleteData {
    /// Deleted board id
    pub id: String,
    /// Tasks removed with it
    pub tasks_removed: usize,
}

/// Response data for deleting tasks
#[derive(Debug, Serialize)]
pub struct TasksDeleteData {
    /// Number of tasks deleted
    pub deleted: usize,
}
