//! Test data builders

use sprintboard::adapters::DocumentStore;
use sprintboard::core::models::{Board, BoardDetails, OwnerId, Priority, Task, TaskStatus};
use sprintboard::core::ports::Store;
use sprintboard::service::{NewTask, Tracker};

/// The owner most tests act as
pub fn owner() -> OwnerId {
    OwnerId::new("alice")
}

/// A tracker over a fresh in-memory store
pub fn tracker() -> Tracker<DocumentStore> {
    Tracker::new(DocumentStore::in_memory())
}

/// Valid board fields
pub fn board_details(title: &str) -> BoardDetails {
    BoardDetails {
        title: title.to_string(),
        description: "Sprint board".to_string(),
        priority: Priority::Medium,
    }
}

/// Valid task fields in `status`
pub fn new_task(title: &str, status: TaskStatus) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: "Something to do".to_string(),
        priority: Priority::Low,
        status,
        start_date: None,
        due_date: None,
    }
}

/// Create a board with `count` TODO tasks titled `Task 1..=count`
pub fn board_with_tasks<S: Store>(
    tracker: &Tracker<S>,
    title: &str,
    count: usize,
) -> (Board, Vec<Task>) {
    let board = tracker.create_board(&owner(), board_details(title)).unwrap();
    let tasks = (1..=count)
        .map(|i| {
            tracker
                .create_task(&owner(), board.id, new_task(&format!("Task {i}"), TaskStatus::Todo))
                .unwrap()
        })
        .collect();
    (board, tasks)
}
