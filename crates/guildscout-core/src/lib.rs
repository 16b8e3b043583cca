//! # Guildscout Core Library
//!
//! This library provides the core business logic for Guildscout, a guild
//! recruiting scout: it watches a game roster for players whose level
//! increased since the last run, raffles a bounded set of the most
//! improved, spreads invitations across a daily window with a minimum
//! gap, and sends them sequentially at their assigned times. The CLI
//! binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Activity**: snapshot diffing — strictly increased levels only
//! - **Selection**: blacklist-aware ranking and uniform raffle draw
//! - **Slots**: collision-avoiding random placement inside the window
//! - **Dispatch**: single-threaded wait-then-send loop over a clock trait
//! - **Storage**: JSON snapshot/blacklist files and TOML configuration
//! - **Source**: capability traits for the external fetcher and mailer
//!
//! ## Key Components
//!
//! - [`Pipeline`]: one configurable end-to-end run
//! - [`DispatchScheduler`]: the timed delivery loop
//! - [`SnapshotStore`] / [`BlacklistStore`]: persisted run state
//! - [`LevelSource`] / [`MessageSender`]: external collaborator seams

pub mod activity;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod selection;
pub mod slots;
pub mod source;
pub mod storage;

pub use activity::{diff_levels, parse_roster, ActivityRecord, PlayerLevel};
pub use dispatch::{Clock, DispatchScheduler, SystemClock};
pub use error::{ConfigError, CoreError, DeliveryError, FetchError, StorageError};
pub use message::build_invitation;
pub use pipeline::{Pipeline, RunReport};
pub use selection::{pick_winners, select_pool};
pub use slots::{assign_slots, SlotPlacement, SlotWindow, WinnerAssignment};
pub use source::{CommandLevelSource, CommandMailer, LevelSource, MessageSender};
pub use storage::{BlacklistStore, CommandConfig, Config, MessageConfig, RaffleConfig, SnapshotStore};
