mod blacklist;
mod config;
mod snapshot;

pub use blacklist::BlacklistStore;
pub use config::{CommandConfig, Config, MessageConfig, RaffleConfig};
pub use snapshot::SnapshotStore;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/guildscout[-dev]/` based on GUILDSCOUT_ENV.
///
/// Set GUILDSCOUT_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GUILDSCOUT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("guildscout-dev")
    } else {
        base_dir.join("guildscout")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default location of the previous-run level snapshot.
pub fn snapshot_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("levels_latest.json"))
}

/// Default location of the winner blacklist.
pub fn blacklist_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("winner_blacklist.json"))
}
