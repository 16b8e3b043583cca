//! External collaborators: the level source and the message transport.
//!
//! In production both are separate binaries (the Hall of Fame fetcher
//! and the in-game mailer), invoked once per fetch or per recipient.
//! The traits keep the pipeline testable without spawning anything.

use std::process::Command;

use crate::activity::{parse_roster, PlayerLevel};
use crate::error::{DeliveryError, FetchError};

/// Yields the current roster of `{name, level}` entries.
pub trait LevelSource {
    fn fetch(&self) -> Result<Vec<PlayerLevel>, FetchError>;
}

/// Delivers one in-game message to a named recipient.
pub trait MessageSender {
    fn send(&self, to: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Level source that runs the configured fetcher binary and parses its
/// stdout as a UTF-8 JSON roster.
pub struct CommandLevelSource {
    program: String,
    args: Vec<String>,
}

impl CommandLevelSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl LevelSource for CommandLevelSource {
    fn fetch(&self) -> Result<Vec<PlayerLevel>, FetchError> {
        tracing::info!(program = %self.program, "running level source");
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| FetchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(FetchError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| FetchError::InvalidEncoding)?;
        let roster = parse_roster(&stdout).map_err(FetchError::InvalidOutput)?;
        tracing::info!(players = roster.len(), "fetched roster");
        Ok(roster)
    }
}

/// Sender that runs the configured mailer binary once per recipient,
/// passing `<name> <body>` as trailing arguments.
pub struct CommandMailer {
    program: String,
    args: Vec<String>,
}

impl CommandMailer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl MessageSender for CommandMailer {
    fn send(&self, to: &str, body: &str) -> Result<(), DeliveryError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(to)
            .arg(body)
            .output()
            .map_err(|source| DeliveryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DeliveryError::Failed {
                recipient: to.to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
