//! Task status
//!
//! The four Kanban columns. Every status is reachable from every other;
//! `Done` is terminal only in the sense that the board counts it as
//! completed work.

use serde::{Deserialize, Serialize};

/// Task status (one Kanban column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Completed
    Done,
    /// Parked for a later sprint
    SavedForLater,
}

impl TaskStatus {
    /// All statuses in column order
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Done, Self::SavedForLater];

    /// Whether this status counts as completed work
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Whether this status counts as pending work (started or not)
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Todo | Self::InProgress)
    }

    /// Column heading for human output
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::SavedForLater => "Saved For Later",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "TODO"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Done => write!(f, "DONE"),
            Self::SavedForLater => write!(f, "SAVED_FOR_LATER"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "todo" | "to_do" => Ok(Self::Todo),
            "in_progress" | "inprogress" | "started" => Ok(Self::InProgress),
            "done" | "complete" | "completed" => Ok(Self::Done),
            "saved_for_later" | "later" | "saved" => Ok(Self::SavedForLater),
            _ => Err(format!(
                "Invalid status: {s}. Use: todo, in_progress, done, saved_for_later"
            )),
        }
    }
}
