//! Business logic services
//!
//! Pure logic that operates on domain models. Nothing here performs
//! I/O; storage adapters and the tracker hand data in and persist what
//! comes out.
//!
//! - [`ordering`] - fractional insertion keys, bulk reorder plans, normalization
//! - [`transition`] - status changes to board set mutations
//! - [`progress`] - board progress from set sizes
//! - [`integrity`] - set consistency checks and repair planning
//! - [`stats`] - per-owner usage statistics
//! - [`validation`] - field rules

pub mod integrity;
pub mod ordering;
pub mod progress;
pub mod stats;
pub mod transition;
pub mod validation;

pub use integrity::{Inconsistency, IntegrityReport, check_board, rebuild_sets};
pub use ordering::{compute_insertion_index, needs_normalization, normalize, plan_spaced_keys};
pub use progress::compute_progress;
pub use stats::{UsageStats, usage_stats};
pub use transition::{SetMutation, apply_transition, resolve_board_set_mutation};
pub use validation::ValidationError;
