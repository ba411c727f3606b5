//! Field validation for boards and tasks

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::models::{BoardDetails, TaskDetails};

/// Minimum title length (characters, trimmed)
pub const TITLE_MIN: usize = 3;
/// Maximum title length (characters, trimmed)
pub const TITLE_MAX: usize = 20;
/// Minimum description length (characters, trimmed)
pub const DESCRIPTION_MIN: usize = 3;
/// Maximum description length (characters, trimmed)
pub const DESCRIPTION_MAX: usize = 250;

/// A field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Offending field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(ValidationError::new(field, format!("must be at least {min} characters long")));
    }
    if len > max {
        return Err(ValidationError::new(field, format!("must be at most {max} characters long")));
    }
    Ok(())
}

/// Validate a title
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    check_length("title", title, TITLE_MIN, TITLE_MAX)
}

/// Validate a description
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    check_length("description", description, DESCRIPTION_MIN, DESCRIPTION_MAX)
}

/// Due date, when present alongside a start date, must not precede it
pub fn validate_dates(
    start: Option<DateTime<Utc>>,
    due: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start, due) {
        (Some(start), Some(due)) if due < start => {
            Err(ValidationError::new("due_date", "must not be earlier than start_date"))
        },
        _ => Ok(()),
    }
}

/// Validate board fields
pub fn validate_board(details: &BoardDetails) -> Result<(), ValidationError> {
    validate_title(&details.title)?;
    validate_description(&details.description)
}

/// Validate task fields
pub fn validate_task(details: &TaskDetails) -> Result<(), ValidationError> {
    validate_title(&details.title)?;
    validate_description(&details.description)?;
    validate_dates(details.start_date, details.due_date)
}

/// Trim the free-text fields of board details
#[must_use]
pub fn normalize_board(details: BoardDetails) -> BoardDetails {
    BoardDetails {
        title: details.title.trim().to_string(),
        description: details.description.trim().to_string(),
        ..details
    }
}

/// Trim the free-text fields of task details
#[must_use]
pub fn normalize_task(details: TaskDetails) -> TaskDetails {
    TaskDetails {
        title: details.title.trim().to_string(),
        description: details.description.trim().to_string(),
        ..details
    }
}
