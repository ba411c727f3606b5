//! Property-based tests for status transitions
//!
//! Whatever sequence of status changes a task goes through, its board
//! keeps it in exactly one tracking set and progress follows the sets.

use proptest::prelude::*;
use sprintboard::core::models::{
    Board, BoardDetails, Membership, OrderKey, OwnerId, Priority, Task, TaskDetails, TaskLabel,
    TaskStatus,
};
use sprintboard::core::services::progress::progress_from_counts;
use sprintboard::core::services::{apply_transition, resolve_board_set_mutation};

fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

fn board() -> Board {
    Board::new(
        OwnerId::new("alice"),
        BoardDetails {
            title: "Sprint".to_string(),
            description: "Property board".to_string(),
            priority: Priority::Low,
        },
        OrderKey::FIRST,
    )
}

fn task(board: &mut Board, n: u64, status: TaskStatus) -> Task {
    let task = Task::new(
        board.owner.clone(),
        board.id,
        TaskLabel::new("KAN", n),
        TaskDetails {
            title: format!("Task {n}"),
            description: "Generated".to_string(),
            priority: Priority::Low,
            start_date: None,
            due_date: None,
        },
        status,
        OrderKey::from_position(usize::try_from(n).unwrap_or(0)),
    );
    board.apply_set_mutation(&resolve_board_set_mutation(&task, status));
    task
}

fn expected_membership(status: TaskStatus) -> Membership {
    if status == TaskStatus::Done { Membership::Completed } else { Membership::Open }
}

proptest! {
    /// A task sits in exactly the set its latest status calls for
    #[test]
    fn task_stays_in_exactly_one_set(
        initial in status_strategy(),
        changes in prop::collection::vec(status_strategy(), 0..30),
    ) {
        let mut board = board();
        let mut task = task(&mut board, 1, initial);
        for status in changes {
            apply_transition(&mut board, &mut task, status);
            prop_assert_eq!(board.sets().membership(task.id), expected_membership(status));
            prop_assert_eq!(board.sets().len(), 1);
            prop_assert_eq!(task.is_completed(), status == TaskStatus::Done);
        }
    }

    /// Applying the same transition twice changes nothing the second time
    #[test]
    fn transition_is_idempotent(initial in status_strategy(), next in status_strategy()) {
        let mut board = board();
        let mut task = task(&mut board, 1, initial);

        let mutation = apply_transition(&mut board, &mut task, next);
        let sets = board.sets().clone();
        let progress = board.progress();

        prop_assert!(!board.apply_set_mutation(&mutation));
        prop_assert_eq!(board.sets(), &sets);
        prop_assert!((board.progress() - progress).abs() < f64::EPSILON);
    }

    /// Progress always matches the set sizes of a multi-task board
    #[test]
    fn progress_follows_sets(
        initial in prop::collection::vec(status_strategy(), 1..12),
        changes in prop::collection::vec((0_usize..12, status_strategy()), 0..40),
    ) {
        let mut board = board();
        let mut tasks: Vec<Task> = initial
            .iter()
            .zip(1_u64..)
            .map(|(status, n)| task(&mut board, n, *status))
            .collect();

        for (index, status) in changes {
            let i = index % tasks.len();
            apply_transition(&mut board, &mut tasks[i], status);

            let done = tasks.iter().filter(|t| t.status() == TaskStatus::Done).count();
            let open = tasks.len() - done;
            prop_assert_eq!(board.sets().completed().len(), done);
            prop_assert_eq!(board.sets().open().len(), open);
            prop_assert!((board.progress() - progress_from_counts(open, done)).abs() < 1e-9);
            prop_assert!((0.0..=100.0).contains(&board.progress()));
        }
    }
}
