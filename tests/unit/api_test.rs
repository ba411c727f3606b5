//! API handler tests
//!
//! Handlers are called directly; no HTTP server is involved.

use serde_json::json;
use sprintboard::api::{self, ApiResponse, ErrorCode, IdListRequest};
use sprintboard::core::models::TaskStatus;

use crate::common::fixtures::{board_with_tasks, owner, tracker};

fn request<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

// =============================================================================
// Boards
// =============================================================================

#[test]
fn test_create_and_list_boards() {
    let tracker = tracker();
    let board = api::create_board(
        &tracker,
        &owner(),
        request(json!({ "title": "Sprint 1", "description": "First sprint", "priority": "high" })),
    )
    .unwrap();
    assert_eq!(board.title, "Sprint 1");

    let data = api::list_boards(&tracker, &owner()).unwrap();
    assert_eq!(data.boards.len(), 1);
    assert_eq!(data.boards[0].id, board.id);
}

#[test]
fn test_create_board_validation_is_bad_request() {
    let tracker = tracker();
    let err = api::create_board(
        &tracker,
        &owner(),
        request(json!({ "title": "ab", "description": "Too short a title" })),
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_duplicate_board_is_conflict() {
    let tracker = tracker();
    let body = json!({ "title": "Sprint 1", "description": "First sprint" });
    api::create_board(&tracker, &owner(), request(body.clone())).unwrap();

    let err = api::create_board(&tracker, &owner(), request(body)).unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[test]
fn test_bad_ids_are_bad_request() {
    let tracker = tracker();
    let err = api::get_board(&tracker, &owner(), "not-a-uuid").unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);

    let ids = IdListRequest {
        ids: vec!["nope".to_string()],
    };
    let err = api::reorder_boards(&tracker, &owner(), &ids).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
}

#[test]
fn test_unknown_board_is_not_found() {
    let tracker = tracker();
    let err = api::get_board(&tracker, &owner(), "00000000-0000-4000-8000-000000000000").unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn test_board_detail_has_four_columns() {
    let tracker = tracker();
    let (board, _) = board_with_tasks(&tracker, "Sprint", 2);

    let detail = api::get_board(&tracker, &owner(), &board.id.to_string()).unwrap();
    assert_eq!(detail.columns.len(), 4);
    assert_eq!(detail.columns[0].status, TaskStatus::Todo);
    assert_eq!(detail.columns[0].tasks.len(), 2);
}

#[test]
fn test_update_board_keeps_priority_when_omitted() {
    let tracker = tracker();
    let board = api::create_board(
        &tracker,
        &owner(),
        request(json!({ "title": "Sprint 1", "description": "First sprint", "priority": "urgent" })),
    )
    .unwrap();

    let updated = api::update_board(
        &tracker,
        &owner(),
        &board.id.to_string(),
        request(json!({ "title": "Sprint One", "description": "Renamed" })),
    )
    .unwrap();
    assert_eq!(updated.title, "Sprint One");
    assert_eq!(updated.priority, board.priority);
}

#[test]
fn test_delete_board_reports_cascade() {
    let tracker = tracker();
    let (board, _) = board_with_tasks(&tracker, "Sprint", 3);

    let data = api::delete_board(&tracker, &owner(), &board.id.to_string()).unwrap();
    assert_eq!(data.tasks_removed, 3);
    assert_eq!(data.id, board.id.to_string());
}

#[test]
fn test_move_board_to_head() {
    let tracker = tracker();
    let (first, _) = board_with_tasks(&tracker, "Sprint 1", 0);
    let (second, _) = board_with_tasks(&tracker, "Sprint 2", 0);

    let moved = api::move_board(
        &tracker,
        &owner(),
        &second.id.to_string(),
        &request(json!({ "before": first.id.to_string() })),
    )
    .unwrap();
    assert!(moved.order_key < first.order_key);

    let data = api::list_boards(&tracker, &owner()).unwrap();
    assert_eq!(data.boards[0].id, second.id);

    let err = api::move_board(&tracker, &owner(), &second.id.to_string(), &request(json!({})))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

// =============================================================================
// Tasks
// =============================================================================

#[test]
fn test_task_lifecycle() {
    let tracker = tracker();
    let (board, _) = board_with_tasks(&tracker, "Sprint", 1);

    let task = api::create_task(
        &tracker,
        &owner(),
        request(json!({
            "board_id": board.id.to_string(),
            "title": "Write docs",
            "description": "README and examples",
            "status": "in_progress"
        })),
    )
    .unwrap();
    assert_eq!(task.status(), TaskStatus::InProgress);

    let done = api::update_task(
        &tracker,
        &owner(),
        &task.id.to_string(),
        request(json!({ "status": "DONE" })),
    )
    .unwrap();
    assert!(done.is_completed());

    let detail = api::get_board(&tracker, &owner(), &board.id.to_string()).unwrap();
    assert!((detail.board.progress() - 50.0).abs() < f64::EPSILON);

    let deleted = api::delete_task(&tracker, &owner(), &task.id.to_string()).unwrap();
    assert_eq!(deleted.id, task.id);
    assert_eq!(
        api::get_task(&tracker, &owner(), &task.id.to_string()).unwrap_err().status_code(),
        404
    );
}

#[test]
fn test_invalid_status_is_bad_request() {
    let tracker = tracker();
    let (_, tasks) = board_with_tasks(&tracker, "Sprint", 1);

    let err = api::update_task(
        &tracker,
        &owner(),
        &tasks[0].id.to_string(),
        request(json!({ "status": "blocked" })),
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
}

#[test]
fn test_empty_update_is_bad_request() {
    let tracker = tracker();
    let (_, tasks) = board_with_tasks(&tracker, "Sprint", 1);

    let err = api::update_task(&tracker, &owner(), &tasks[0].id.to_string(), request(json!({})))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
}

#[test]
fn test_move_task_between_neighbours() {
    let tracker = tracker();
    let (_, tasks) = board_with_tasks(&tracker, "Sprint", 3);

    let moved = api::move_task(
        &tracker,
        &owner(),
        &tasks[2].id.to_string(),
        &request(json!({
            "status": "TODO",
            "after": tasks[0].id.to_string(),
            "before": tasks[1].id.to_string()
        })),
    )
    .unwrap();
    assert!(tasks[0].order_key < moved.order_key && moved.order_key < tasks[1].order_key);
}

#[test]
fn test_reorder_column_and_bulk_delete() {
    let tracker = tracker();
    let (board, tasks) = board_with_tasks(&tracker, "Sprint", 3);
    let reversed: Vec<String> = tasks.iter().rev().map(|t| t.id.to_string()).collect();

    let data = api::reorder_column(
        &tracker,
        &owner(),
        &board.id.to_string(),
        "todo",
        &IdListRequest { ids: reversed },
    )
    .unwrap();
    let order: Vec<_> = data.tasks.iter().map(|t| t.id).collect();
    assert_eq!(order, vec![tasks[2].id, tasks[1].id, tasks[0].id]);

    let ids = IdListRequest {
        ids: tasks.iter().map(|t| t.id.to_string()).collect(),
    };
    assert_eq!(api::delete_tasks(&tracker, &owner(), &ids).unwrap().deleted, 3);
}

// =============================================================================
// Maintenance and Envelope
// =============================================================================

#[test]
fn test_check_repair_and_stats() {
    let tracker = tracker();
    let (board, _) = board_with_tasks(&tracker, "Sprint", 2);
    let id = board.id.to_string();

    assert!(api::check_board(&tracker, &owner(), &id).unwrap().is_consistent());
    assert!(!api::repair_board(&tracker, &owner(), &id).unwrap().repaired());

    let stats = api::get_stats(&tracker, &owner()).unwrap();
    assert_eq!(stats.total_boards, 1);
    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.by_status.todo, 2);
}

#[test]
fn test_response_envelope() {
    let ok = serde_json::to_value(ApiResponse::success(json!({ "n": 1 }))).unwrap();
    assert_eq!(ok["success"], true);
    assert_eq!(ok["data"]["n"], 1);
    assert!(ok.get("error").is_none());

    let err = serde_json::to_value(ApiResponse::error("NOT_FOUND", "Board not found")).unwrap();
    assert_eq!(err["success"], false);
    assert_eq!(err["error"]["code"], "NOT_FOUND");
    assert!(err.get("data").is_none());
}
