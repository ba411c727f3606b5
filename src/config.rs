//! Configuration management
//!
//! Config is stored at `~/.sprintboard/config.toml` unless a path is
//! given explicitly. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::paths;
use crate::service::DEFAULT_LABEL_PREFIX;

/// sprintboard configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Document store settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Task settings
    #[serde(default)]
    pub tasks: TaskConfig,
    /// Owner used by the CLI
    #[serde(default)]
    pub owner: OwnerConfig,
}

/// Document store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding boards and tasks (default `~/.sprintboard/data.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    7878
}

const fn default_workers() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

/// Task settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Prefix of task labels (`KAN` gives `KAN-1`, `KAN-2`, ...)
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
}

fn default_label_prefix() -> String {
    DEFAULT_LABEL_PREFIX.to_string()
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            label_prefix: default_label_prefix(),
        }
    }
}

/// Owner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerConfig {
    /// Owner id used when `--owner` is not given
    #[serde(default = "default_owner")]
    pub default: String,
}

fn default_owner() -> String {
    "local".to_string()
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            default: default_owner(),
        }
    }
}

impl Config {
    /// Default config file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::config_file()
    }

    /// Load config from `path` (or the default path), or defaults if the file does not exist
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Document store location, relative paths resolved against `base`
    #[must_use]
    pub fn data_file(&self, base: &Path) -> PathBuf {
        match &self.storage.data_file {
            Some(file) if file.is_relative() => base.join(file),
            Some(file) => file.clone(),
            None => paths::data_file(),
        }
    }
}
