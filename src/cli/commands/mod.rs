//! Command implementations

mod board;
mod repair;
mod serve;
mod stats;
mod task;

pub use board::board;
pub use repair::repair;
pub use serve::serve;
pub use stats::stats;
pub use task::task;

use std::str::FromStr;

/// Parse a command-line value with the type's own error message
fn parse_arg<T>(value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| anyhow::anyhow!("{e}"))
}
