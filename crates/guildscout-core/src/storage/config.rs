//! TOML-based application configuration.
//!
//! Stores:
//! - Raffle parameters (pool size, winner count, dispatch window, gap)
//! - Invitation message settings
//! - The external fetcher and mailer commands
//!
//! Configuration is stored at `~/.config/guildscout/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Raffle and dispatch-window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaffleConfig {
    /// Cap on the ranked candidate pool before the draw
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Number of winners sampled for dispatch
    #[serde(default = "default_winner_count")]
    pub winner_count: usize,
    /// First eligible minute-of-day, UTC (default 12:00)
    #[serde(default = "default_window_start")]
    pub window_start_minute: u32,
    /// Last eligible minute-of-day, UTC (default 17:00)
    #[serde(default = "default_window_end")]
    pub window_end_minute: u32,
    /// Minimum spacing between any two dispatch times
    #[serde(default = "default_min_gap")]
    pub min_gap_minutes: u32,
    /// Per-winner retry budget for slot placement
    #[serde(default = "default_max_attempts")]
    pub max_placement_attempts: u32,
    /// Random seed for reproducibility (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Add successfully notified winners to the blacklist
    #[serde(default = "default_true")]
    pub record_winners: bool,
}

/// Invitation message configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_guild_name")]
    pub guild_name: String,
}

/// An external command plus its fixed leading arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/guildscout/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub raffle: RaffleConfig,
    #[serde(default)]
    pub message: MessageConfig,
    /// Binary that prints the current roster as JSON on stdout
    #[serde(default = "default_fetcher")]
    pub fetcher: CommandConfig,
    /// Binary invoked as `<program> [args..] <name> <body>` per recipient
    #[serde(default = "default_mailer")]
    pub mailer: CommandConfig,
}

// Default functions
fn default_pool_size() -> usize {
    50
}
fn default_winner_count() -> usize {
    10
}
fn default_window_start() -> u32 {
    12 * 60
}
fn default_window_end() -> u32 {
    17 * 60
}
fn default_min_gap() -> u32 {
    10
}
fn default_max_attempts() -> u32 {
    1000
}
fn default_true() -> bool {
    true
}
fn default_guild_name() -> String {
    "Spaceengineers".to_string()
}
fn default_fetcher() -> CommandConfig {
    CommandConfig {
        program: "sf_fetcher".to_string(),
        args: Vec::new(),
    }
}
fn default_mailer() -> CommandConfig {
    CommandConfig {
        program: "sf_mailer".to_string(),
        args: Vec::new(),
    }
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            winner_count: default_winner_count(),
            window_start_minute: default_window_start(),
            window_end_minute: default_window_end(),
            min_gap_minutes: default_min_gap(),
            max_placement_attempts: default_max_attempts(),
            seed: None,
            record_winners: true,
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            guild_name: default_guild_name(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raffle: RaffleConfig::default(),
            message: MessageConfig::default(),
            fetcher: default_fetcher(),
            mailer: default_mailer(),
        }
    }
}

impl RaffleConfig {
    /// Reject windows that cannot express a minute-of-day schedule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_end_minute < self.window_start_minute {
            return Err(ConfigError::InvalidValue {
                key: "raffle.window_end_minute".to_string(),
                message: format!(
                    "window ends ({}) before it starts ({})",
                    self.window_end_minute, self.window_start_minute
                ),
            });
        }
        if self.window_end_minute >= 24 * 60 {
            return Err(ConfigError::InvalidValue {
                key: "raffle.window_end_minute".to_string(),
                message: format!("{} is past the end of the day", self.window_end_minute),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load the config file, falling back to defaults when it does not
    /// exist or cannot be parsed.
    pub fn load_or_default() -> Self {
        match Self::path() {
            Ok(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable config: {e}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Save to the default config path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }
}
