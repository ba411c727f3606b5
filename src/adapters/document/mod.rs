//! Document store
//!
//! Implements every persistence port on top of two in-memory document
//! collections (boards and tasks) plus per-owner counters, optionally
//! written through to a JSON file after each batch.

mod snapshot;
mod store;

pub use store::DocumentStore;
