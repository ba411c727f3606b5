//! Domain models for sprintboard
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Board`] - a sprint: a named, ordered collection of tasks
//! - [`Task`] - a unit of work in one board column
//! - [`OrderKey`] - fractional sort key shared by boards and tasks
//! - [`TaskSets`] - a board's open/completed task indexes

mod board;
mod ids;
mod order_key;
mod priority;
mod status;
mod task;
mod task_sets;

pub use board::{Board, BoardDetails};
pub use ids::{BoardId, OwnerId, TaskId, TaskLabel};
pub use order_key::{OrderKey, OrderingError};
pub use priority::Priority;
pub use status::TaskStatus;
pub use task::{Task, TaskDetails};
pub use task_sets::{Membership, TaskSets, TrackingSet};
