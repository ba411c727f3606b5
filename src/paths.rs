//! Centralized path definitions for sprintboard
//!
//! All state lives under one directory in the user's home:
//!
//! ```text
//! ~/.sprintboard/
//! ├── config.toml      # User configuration
//! └── data.json        # Boards, tasks and label counters
//! ```

use std::path::PathBuf;

/// Directory name under the home directory
const GLOBAL_DIR: &str = ".sprintboard";

/// Configuration filename
const CONFIG_FILE: &str = "config.toml";

/// Default document store filename
const DATA_FILE: &str = "data.json";

/// Get the sprintboard home directory (`~/.sprintboard`).
#[must_use]
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(GLOBAL_DIR)
}

/// Get path to the default config file.
#[must_use]
pub fn config_file() -> PathBuf {
    home_dir().join(CONFIG_FILE)
}

/// Get path to the default document store.
#[must_use]
pub fn data_file() -> PathBuf {
    home_dir().join(DATA_FILE)
}
