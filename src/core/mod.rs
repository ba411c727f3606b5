//! Core domain logic for sprintboard
//!
//! This module contains pure business logic with no I/O dependencies.
//! All persistence is abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Board, Task, OrderKey, TaskSets)
//! - `services/` - Ordering, transitions, progress, integrity, stats
//! - `ports/` - Trait definitions for persistence

pub mod models;
pub mod ports;
pub mod services;
