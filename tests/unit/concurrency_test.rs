//! Concurrent use of one tracker
//!
//! Threads share a tracker the way the HTTP workers do. Set mutations on
//! one board must never be lost and no task may end up in both sets.

use std::thread;

use sprintboard::core::models::{Membership, OrderKey, TaskStatus, TrackingSet};
use sprintboard::core::ports::{BatchWriter, TaskRepository, WriteOp};
use sprintboard::core::services::SetMutation;
use sprintboard::service::{MoveTask, TaskPatch, Tracker};

use crate::common::fixtures::{board_details, board_with_tasks, new_task, owner, tracker};
use crate::common::mocks::InterleavingStore;

#[test]
fn test_parallel_status_changes_keep_sets_exact() {
    let tracker = tracker();
    let (board, tasks) = board_with_tasks(&tracker, "Sprint", 16);

    thread::scope(|s| {
        for (i, task) in tasks.iter().enumerate() {
            let tracker = &tracker;
            s.spawn(move || {
                let status = if i % 2 == 0 { TaskStatus::Done } else { TaskStatus::InProgress };
                let patch = TaskPatch {
                    status: Some(status),
                    ..TaskPatch::default()
                };
                tracker.update_task(&owner(), task.id, &patch).unwrap();
            });
        }
    });

    let board = tracker.get_board(&owner(), board.id).unwrap();
    assert_eq!(board.sets().completed().len(), 8);
    assert_eq!(board.sets().open().len(), 8);
    assert!((board.progress() - 50.0).abs() < f64::EPSILON);
    for (i, task) in tasks.iter().enumerate() {
        let expected = if i % 2 == 0 { Membership::Completed } else { Membership::Open };
        assert_eq!(board.sets().membership(task.id), expected);
    }
    assert!(tracker.check_board(&owner(), board.id).unwrap().is_consistent());
}

#[test]
fn test_flapping_one_task_ends_in_one_set() {
    let tracker = tracker();
    let (board, tasks) = board_with_tasks(&tracker, "Sprint", 1);
    let id = tasks[0].id;

    thread::scope(|s| {
        for i in 0..8 {
            let tracker = &tracker;
            s.spawn(move || {
                for round in 0..10 {
                    let status = if (i + round) % 2 == 0 { TaskStatus::Done } else { TaskStatus::Todo };
                    let target = MoveTask {
                        status,
                        after: None,
                        before: None,
                    };
                    tracker.move_task(&owner(), id, target).unwrap();
                }
            });
        }
    });

    let task = tracker.get_task(&owner(), id).unwrap();
    let board = tracker.get_board(&owner(), board.id).unwrap();
    let expected = if task.is_completed() { Membership::Completed } else { Membership::Open };
    assert_eq!(board.sets().membership(id), expected);
    assert_eq!(board.sets().len(), 1);
}

#[test]
fn test_parallel_creates_get_distinct_labels_and_keys() {
    let tracker = tracker();
    let board_id = tracker.create_board(&owner(), board_details("Sprint")).unwrap().id;

    thread::scope(|s| {
        for t in 0..4 {
            let tracker = &tracker;
            s.spawn(move || {
                for i in 0..5 {
                    tracker
                        .create_task(&owner(), board_id, new_task(&format!("T{t}-{i}"), TaskStatus::Todo))
                        .unwrap();
                }
            });
        }
    });

    let column = tracker.store().column(&owner(), board_id, TaskStatus::Todo).unwrap();
    assert_eq!(column.len(), 20);
    assert!(column.windows(2).all(|w| w[0].order_key < w[1].order_key));

    let mut labels: Vec<&str> = column.iter().map(|t| t.label.as_str()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), 20);
}

#[test]
fn test_parallel_board_reorders_stay_normalized() {
    let tracker = tracker();
    let ids: Vec<_> = ["Alpha", "Beta", "Gamma", "Delta"]
        .iter()
        .map(|title| tracker.create_board(&owner(), board_details(title)).unwrap().id)
        .collect();

    thread::scope(|s| {
        for shift in 0..4 {
            let (tracker, ids) = (&tracker, &ids);
            s.spawn(move || {
                let mut order = ids.clone();
                order.rotate_left(shift);
                tracker.reorder_boards(&owner(), &order).unwrap();
            });
        }
    });

    let boards = tracker.list_boards(&owner()).unwrap();
    assert_eq!(boards.len(), 4);
    for (i, board) in boards.iter().enumerate() {
        assert_eq!(board.order_key, OrderKey::from_position(i));
    }
}

#[test]
fn test_repair_keeps_status_change_committed_after_check() {
    let tracker = Tracker::new(InterleavingStore::new());
    let (board, tasks) = board_with_tasks(&tracker, "Sprint", 2);
    let (a, b) = (tasks[0].id, tasks[1].id);

    // drop b from the sets so the repair has work to do
    tracker
        .store()
        .apply(
            &owner(),
            &[WriteOp::MutateBoardSets {
                id: board.id,
                mutation: SetMutation::Detach { task_id: b },
            }],
        )
        .unwrap();

    // a status change on a lands between the repair's check and its write
    tracker.store().queue(
        owner(),
        vec![
            WriteOp::SetTaskStatus {
                id: a,
                status: TaskStatus::Done,
                key: OrderKey::FIRST,
            },
            WriteOp::MutateBoardSets {
                id: board.id,
                mutation: SetMutation::Place {
                    task_id: a,
                    into: TrackingSet::Completed,
                },
            },
        ],
    );

    let outcome = tracker.repair_board(&owner(), board.id).unwrap();
    assert!(outcome.repaired());
    assert_eq!(outcome.board.sets().membership(a), Membership::Completed);
    assert_eq!(outcome.board.sets().membership(b), Membership::Open);
    assert!((outcome.board.progress() - 50.0).abs() < f64::EPSILON);
    assert!(tracker.get_task(&owner(), a).unwrap().is_completed());
    assert!(tracker.check_board(&owner(), board.id).unwrap().is_consistent());
}
