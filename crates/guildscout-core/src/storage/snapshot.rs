//! JSON level-snapshot persistence.
//!
//! One file holds the roster from the previous run as a JSON array of
//! `{name, level}` objects. It is rewritten wholesale at the end of each
//! run, so there is never more than one prior data point.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::activity::{parse_roster, PlayerLevel};
use crate::error::{Result, StorageError};

/// Store for the previous-run level snapshot.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous run's snapshot as a name → level map.
    ///
    /// Returns `None` when the file does not exist yet (first run);
    /// that is a normal condition, not an error.
    pub fn load_previous(&self) -> Result<Option<HashMap<String, u32>>> {
        if !self.path.exists() {
            tracing::info!("no previous level snapshot found (first run)");
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| StorageError::ReadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        let entries = parse_roster(&raw).map_err(|e| StorageError::ReadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        tracing::info!(players = entries.len(), "loaded previous snapshot");
        Ok(Some(
            entries.into_iter().map(|p| (p.name, p.level)).collect(),
        ))
    }

    /// Overwrite the snapshot with the current roster.
    pub fn save(&self, roster: &[PlayerLevel]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        }

        let json = serde_json::to_string_pretty(roster)?;
        fs::write(&self.path, json).map_err(|e| StorageError::WriteFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        tracing::info!(players = roster.len(), "saved level snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(name: &str, level: u32) -> PlayerLevel {
        PlayerLevel {
            name: name.to_string(),
            level,
        }
    }

    #[test]
    fn test_missing_file_is_first_run() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("levels_latest.json"));
        assert!(store.load_previous().unwrap().is_none());
    }

    #[test]
    fn test_round_trip_preserves_mapping() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("levels_latest.json"));

        let roster = vec![entry("A", 120), entry("B", 310), entry("C", 145)];
        store.save(&roster).unwrap();

        let loaded = store.load_previous().unwrap().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded["A"], 120);
        assert_eq!(loaded["B"], 310);
        assert_eq!(loaded["C"], 145);
    }

    #[test]
    fn test_save_replaces_previous_content() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("levels_latest.json"));

        store.save(&[entry("A", 100), entry("B", 200)]).unwrap();
        store.save(&[entry("C", 300)]).unwrap();

        let loaded = store.load_previous().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["C"], 300);
    }

    #[test]
    fn test_corrupt_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("levels_latest.json");
        fs::write(&path, "{{{{").unwrap();

        let store = SnapshotStore::new(path);
        assert!(store.load_previous().is_err());
    }
}
