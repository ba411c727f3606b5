//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `document/` - in-process document store with optional JSON file persistence

pub mod document;

pub use document::DocumentStore;
