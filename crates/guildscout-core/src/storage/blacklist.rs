//! Winner-blacklist persistence.
//!
//! A JSON array of names that have already won and must not be drawn
//! again. Written sorted and rewritten wholesale on every mutation.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StorageError};

/// Store for the persisted winner blacklist.
pub struct BlacklistStore {
    path: PathBuf,
}

impl BlacklistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the blacklist; a missing file is an empty set.
    pub fn load(&self) -> Result<BTreeSet<String>> {
        if !self.path.exists() {
            tracing::info!("no blacklist file found, starting empty");
            return Ok(BTreeSet::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| StorageError::ReadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        let names: Vec<String> =
            serde_json::from_str(&raw).map_err(|e| StorageError::ReadFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let blacklist: BTreeSet<String> = names.into_iter().collect();
        tracing::info!(names = blacklist.len(), "loaded blacklist");
        Ok(blacklist)
    }

    /// Overwrite the blacklist file with a sorted name array.
    pub fn save(&self, blacklist: &BTreeSet<String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        }

        // BTreeSet iterates in sorted order, which is the file format.
        let names: Vec<&String> = blacklist.iter().collect();
        let json = serde_json::to_string_pretty(&names)?;
        fs::write(&self.path, json).map_err(|e| StorageError::WriteFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        tracing::info!(names = blacklist.len(), "saved blacklist");
        Ok(())
    }
}
