//! Board model
//!
//! A board ("sprint") is a named collection of tasks owned by one user.
//! Its progress is derived from its tracking sets and is never set
//! directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BoardId, OrderKey, OwnerId, Priority, TaskSets};
use crate::core::services::progress::compute_progress;
use crate::core::services::transition::SetMutation;

/// Editable board fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDetails {
    /// Title, unique per owner
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Overall priority tier
    #[serde(default)]
    pub priority: Priority,
}

/// A board (sprint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Unique identifier
    pub id: BoardId,
    /// Owning user
    pub owner: OwnerId,
    /// Title, unique per owner
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Overall priority tier
    #[serde(default)]
    pub priority: Priority,
    /// Position among the owner's boards
    pub order_key: OrderKey,
    #[serde(default)]
    progress: f64,
    #[serde(flatten)]
    sets: TaskSets,
    /// When created
    pub created_at: DateTime<Utc>,
    /// When last modified
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create an empty board
    #[must_use]
    pub fn new(owner: OwnerId, details: BoardDetails, order_key: OrderKey) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::generate(),
            owner,
            title: details.title,
            description: details.description,
            priority: details.priority,
            order_key,
            progress: 0.0,
            sets: TaskSets::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Completion percentage in `[0, 100]`, derived from the tracking sets
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// The open/completed tracking sets
    #[must_use]
    pub const fn sets(&self) -> &TaskSets {
        &self.sets
    }

    /// Current editable fields
    #[must_use]
    pub fn details(&self) -> BoardDetails {
        BoardDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
        }
    }

    /// Overwrite the editable fields
    pub fn apply_details(&mut self, details: BoardDetails) {
        self.title = details.title;
        self.description = details.description;
        self.priority = details.priority;
        self.updated_at = Utc::now();
    }

    /// Apply a set mutation, then recompute progress from scratch.
    ///
    /// Returns whether the sets changed.
    pub fn apply_set_mutation(&mut self, mutation: &SetMutation) -> bool {
        let changed = mutation.apply(&mut self.sets);
        self.refresh_progress();
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Replace both sets wholesale (integrity repair), recomputing progress
    pub fn replace_sets(&mut self, sets: TaskSets) {
        self.sets = sets;
        self.refresh_progress();
        self.updated_at = Utc::now();
    }

    fn refresh_progress(&mut self) {
        self.progress = compute_progress(self.sets.open(), self.sets.completed());
    }
}
