//! JSON snapshot persistence for review progress.
//!
//! One snapshot file per knowledge base, at
//! `~/.config/recall/progress/<base>.json`. Saving is best-effort: a
//! failed write is logged as a warning and the session continues with
//! in-memory state only.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::card::LearningState;
use crate::error::Result;

/// Serialized scheduler state: per-card learning fields plus the queue
/// order at the time of the save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub items: HashMap<String, LearningState>,
    #[serde(default)]
    pub queue_order: Vec<String>,
}

/// Filesystem-backed store of per-base snapshots.
pub struct ProgressStore {
    dir: PathBuf,
}

impl ProgressStore {
    /// Store rooted at the default data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(super::data_dir()?.join("progress")))
    }

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, base: &str) -> PathBuf {
        let stem = base.strip_suffix(".json").unwrap_or(base);
        self.dir.join(format!("{stem}.json"))
    }

    /// Persist a snapshot. Failures are demoted to logged warnings.
    pub fn save(&self, base: &str, snapshot: &Snapshot) {
        if let Err(e) = self.try_save(base, snapshot) {
            log::warn!("failed to save progress for '{base}': {e}");
        }
    }

    fn try_save(&self, base: &str, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string(snapshot)?;
        fs::write(self.path_for(base), raw)?;
        Ok(())
    }

    /// Load a base's snapshot, or `None` when it is absent or unreadable.
    pub fn restore(&self, base: &str) -> Option<Snapshot> {
        let path = self.path_for(base);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!(
                    "ignoring unreadable progress snapshot {}: {e}",
                    path.display()
                );
                None
            }
        }
    }

    /// Delete a base's snapshot. Returns whether a file was removed.
    pub fn reset(&self, base: &str) -> Result<bool> {
        let path = self.path_for(base);
        if path.exists() {
            fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
