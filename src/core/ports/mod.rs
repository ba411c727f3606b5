//! Port traits (interfaces) for persistence
//!
//! These traits define the boundary between the tracker's logic and
//! whatever stores boards and tasks. The core only depends on these
//! traits; implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! - **Reads** go through [`BoardRepository`] and [`TaskRepository`]
//! - **Writes** go through [`BatchWriter`] as atomic batches
//! - **Labels** come from [`SequenceCounter`]

mod board_repo;
mod sequence;
mod task_repo;
mod write_batch;

pub use board_repo::BoardRepository;
pub use sequence::SequenceCounter;
pub use task_repo::TaskRepository;
pub use write_batch::{BatchWriter, WriteOp, WriteSummary};

/// Everything the tracker needs from persistence
pub trait Store: BoardRepository + TaskRepository + SequenceCounter + BatchWriter {}

impl<T> Store for T where T: BoardRepository + TaskRepository + SequenceCounter + BatchWriter {}
