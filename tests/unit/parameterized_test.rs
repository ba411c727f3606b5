//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use sprintboard::core::models::{OrderKey, Priority, TaskStatus};
use sprintboard::core::services::compute_insertion_index;
use sprintboard::core::services::progress::{progress_from_counts, round_for_display};
use sprintboard::core::services::validation::{validate_description, validate_title};
use test_case::test_case;

// =============================================================================
// Status Parsing Tests
// =============================================================================

#[test_case("TODO", TaskStatus::Todo ; "upper todo")]
#[test_case("to-do", TaskStatus::Todo ; "dashed todo")]
#[test_case("in_progress", TaskStatus::InProgress ; "snake in progress")]
#[test_case("In Progress", TaskStatus::InProgress ; "spaced in progress")]
#[test_case("done", TaskStatus::Done ; "lower done")]
#[test_case("completed", TaskStatus::Done ; "completed alias")]
#[test_case("SAVED_FOR_LATER", TaskStatus::SavedForLater ; "upper saved for later")]
#[test_case("later", TaskStatus::SavedForLater ; "later alias")]
fn test_status_parsing(input: &str, expected: TaskStatus) {
    assert_eq!(input.parse::<TaskStatus>().unwrap(), expected);
}

#[test_case("" ; "empty")]
#[test_case("blocked" ; "unknown word")]
#[test_case("don e" ; "broken word")]
fn test_status_parsing_rejects(input: &str) {
    assert!(input.parse::<TaskStatus>().is_err());
}

#[test_case(TaskStatus::Todo, "\"TODO\"" ; "todo wire")]
#[test_case(TaskStatus::InProgress, "\"IN_PROGRESS\"" ; "in progress wire")]
#[test_case(TaskStatus::Done, "\"DONE\"" ; "done wire")]
#[test_case(TaskStatus::SavedForLater, "\"SAVED_FOR_LATER\"" ; "saved wire")]
fn test_status_wire_format(status: TaskStatus, json: &str) {
    assert_eq!(serde_json::to_string(&status).unwrap(), json);
    assert_eq!(status.to_string(), json.trim_matches('"'));
}

// =============================================================================
// Priority Parsing Tests
// =============================================================================

#[test_case("low", Priority::Low ; "low")]
#[test_case("MED", Priority::Medium ; "medium abbreviation")]
#[test_case("h", Priority::High ; "high letter")]
#[test_case("critical", Priority::Urgent ; "critical alias")]
fn test_priority_parsing(input: &str, expected: Priority) {
    assert_eq!(input.parse::<Priority>().unwrap(), expected);
}

#[test]
fn test_priority_default_is_low() {
    assert_eq!(Priority::default(), Priority::Low);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test_case("ab", false ; "too short")]
#[test_case("abc", true ; "minimum")]
#[test_case("  abc  ", true ; "trimmed to minimum")]
#[test_case("Sprint 12 planning", true ; "ordinary")]
#[test_case("abcdefghijklmnopqrst", true ; "maximum")]
#[test_case("abcdefghijklmnopqrstu", false ; "too long")]
fn test_title_length(title: &str, valid: bool) {
    assert_eq!(validate_title(title).is_ok(), valid, "title={title:?}");
}

#[test_case(2, false ; "too short")]
#[test_case(3, true ; "minimum")]
#[test_case(250, true ; "maximum")]
#[test_case(251, false ; "too long")]
fn test_description_length(len: usize, valid: bool) {
    let description = "x".repeat(len);
    assert_eq!(validate_description(&description).is_ok(), valid);
}

// =============================================================================
// Ordering Tests
// =============================================================================

fn key(v: f64) -> Option<OrderKey> {
    Some(OrderKey::new(v).unwrap())
}

#[test_case(None, None, 1.0 ; "empty collection")]
#[test_case(None, key(1.0), 0.5 ; "head of normalized column")]
#[test_case(None, key(0.5), 0.25 ; "head again")]
#[test_case(key(3.0), None, 4.0 ; "tail")]
#[test_case(key(1.0), key(2.0), 1.5 ; "between neighbours")]
#[test_case(key(1.5), key(2.0), 1.75 ; "between closer neighbours")]
fn test_insertion_index(prev: Option<OrderKey>, next: Option<OrderKey>, expected: f64) {
    let k = compute_insertion_index(prev, next).unwrap();
    assert!((k.value() - expected).abs() < f64::EPSILON, "got {k}");
}

// =============================================================================
// Progress Tests
// =============================================================================

#[test_case(0, 0, 0.0 ; "empty board")]
#[test_case(4, 0, 0.0 ; "nothing done")]
#[test_case(0, 3, 100.0 ; "everything done")]
#[test_case(1, 1, 50.0 ; "half done")]
#[test_case(2, 1, 33.33 ; "a third done")]
#[test_case(1, 2, 66.67 ; "two thirds done")]
fn test_progress_display(open: usize, done: usize, expected: f64) {
    let shown = round_for_display(progress_from_counts(open, done));
    assert!((shown - expected).abs() < 1e-9, "got {shown}");
}
