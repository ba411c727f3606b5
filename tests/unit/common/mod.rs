//! Common test utilities
//!
//! - `fixtures.rs` - Test data builders
//! - `mocks.rs` - Port implementations with injectable failures

pub mod fixtures;
pub mod mocks;
