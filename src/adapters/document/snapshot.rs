//! On-disk snapshot format

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::models::{Board, BoardId, OwnerId, Task, TaskId};

/// In-memory collections
#[derive(Debug, Clone, Default)]
pub(super) struct Documents {
    pub boards: BTreeMap<BoardId, Board>,
    pub tasks: BTreeMap<TaskId, Task>,
    pub sequences: BTreeMap<OwnerId, BTreeMap<String, u64>>,
}

/// Serialized form of [`Documents`]
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    boards: Vec<Board>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    sequences: BTreeMap<OwnerId, BTreeMap<String, u64>>,
}

impl Documents {
    /// Load from `path`, or start empty if the file does not exist yet
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        for task in &mut snapshot.tasks {
            if task.sync_completion() {
                warn!(
                    "Task {} had a completion flag out of step with status {}, corrected",
                    task.label,
                    task.status()
                );
            }
        }

        Ok(Self {
            boards: snapshot.boards.into_iter().map(|b| (b.id, b)).collect(),
            tasks: snapshot.tasks.into_iter().map(|t| (t.id, t)).collect(),
            sequences: snapshot.sequences,
        })
    }

    /// Write to `path` through a temporary file so readers never see half a snapshot
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let snapshot = Snapshot {
            boards: self.boards.values().cloned().collect(),
            tasks: self.tasks.values().cloned().collect(),
            sequences: self.sequences.clone(),
        };
        let content = serde_json::to_string_pretty(&snapshot)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
