use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::task::Task;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access task file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// File-backed task store.
///
/// The path is injected at construction so callers (and tests) control where
/// the list lives. Each command invocation reads the full list once and
/// writes it back in full; there are no partial updates.
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted list. A missing or blank file reads as an empty
    /// list; a present-but-malformed file is a `Parse` error and is left on
    /// disk untouched, so the caller decides whether to continue.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        Ok(tasks)
    }

    /// Serialize the full list and replace the file. The write goes to a
    /// temp file in the same directory followed by a rename, so a failed
    /// write leaves the previous contents intact.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "tasks.json".to_string());
        self.path.with_file_name(format!(".{file_name}.tmp"))
    }
}
