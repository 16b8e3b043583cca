//! End-to-end run: fetch, diff, raffle, place, dispatch, persist.
//!
//! One configurable pipeline drives the whole day. Stage order matters:
//! the fetch must succeed before anything on disk is touched, the
//! snapshot is rewritten right after diffing, and the blacklist is only
//! extended with winners whose invitation actually went out.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::Serialize;

use crate::activity::{diff_levels, ActivityRecord};
use crate::dispatch::{Clock, DispatchScheduler};
use crate::error::Result;
use crate::message::build_invitation;
use crate::selection::{pick_winners, select_pool};
use crate::slots::{assign_slots, SlotWindow, WinnerAssignment};
use crate::source::{LevelSource, MessageSender};
use crate::storage::{BlacklistStore, Config, SnapshotStore};

/// What one run did, for operator inspection.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// No previous snapshot existed; nothing could be diffed.
    pub first_run: bool,
    /// Size of the fetched roster.
    pub roster_size: usize,
    /// Players whose level increased since the previous snapshot.
    pub active: Vec<ActivityRecord>,
    /// Ranked, blacklist-filtered candidate pool.
    pub pool: Vec<ActivityRecord>,
    /// Winners with assigned slots, sorted by minute.
    pub assignments: Vec<WinnerAssignment>,
    /// Winners dropped because placement ran out of attempts.
    pub unplaced: usize,
    /// Names whose invitation was delivered (empty on dry runs).
    pub sent: BTreeSet<String>,
    /// Whether this was a dry run (no writes, no sends).
    pub dry_run: bool,
}

/// The selection-and-timed-dispatch pipeline.
pub struct Pipeline<L, S, C> {
    config: Config,
    snapshot: SnapshotStore,
    blacklist: BlacklistStore,
    source: L,
    sender: S,
    clock: C,
}

impl<L: LevelSource, S: MessageSender, C: Clock> Pipeline<L, S, C> {
    pub fn new(
        config: Config,
        snapshot: SnapshotStore,
        blacklist: BlacklistStore,
        source: L,
        sender: S,
        clock: C,
    ) -> Self {
        Self {
            config,
            snapshot,
            blacklist,
            source,
            sender,
            clock,
        }
    }

    /// Execute one full run.
    ///
    /// With `dry_run` the diff, pool, winners and slots are computed and
    /// reported, but nothing is persisted or sent.
    pub fn run(&self, dry_run: bool) -> Result<RunReport> {
        self.config.raffle.validate()?;

        // Fetch failures abort here, before any persisted state changes.
        let roster = self.source.fetch()?;

        let previous = self.snapshot.load_previous()?;
        let first_run = previous.is_none();
        let active = diff_levels(previous.as_ref(), &roster);
        tracing::info!(
            roster = roster.len(),
            active = active.len(),
            "computed activity since last run"
        );

        if !dry_run {
            self.snapshot.save(&roster)?;
        }

        let mut blacklist = self.blacklist.load()?;
        let pool = select_pool(&active, &blacklist, self.config.raffle.pool_size);
        tracing::info!(pool = pool.len(), "built winner pool");

        let mut rng = self.make_rng();
        let winners = pick_winners(&pool, self.config.raffle.winner_count, &mut rng);
        tracing::info!(winners = winners.len(), "drew winners");

        let window = SlotWindow {
            start_minute: self.config.raffle.window_start_minute,
            end_minute: self.config.raffle.window_end_minute,
            min_gap_minutes: self.config.raffle.min_gap_minutes,
            max_attempts: self.config.raffle.max_placement_attempts,
        };
        let placement = assign_slots(&winners, &window, &mut rng);
        for assignment in &placement.assignments {
            tracing::info!(
                recipient = %assignment.name,
                slot = %assignment.time_of_day(),
                "+{} ({} -> {})",
                assignment.delta,
                assignment.from_level,
                assignment.to_level
            );
        }

        let sent = if dry_run {
            BTreeSet::new()
        } else {
            let scheduler = DispatchScheduler::new(&self.clock, &self.sender);
            let message_config = &self.config.message;
            let sent =
                scheduler.run(&placement.assignments, |a| {
                    build_invitation(&a.name, message_config)
                });

            if self.config.raffle.record_winners && !sent.is_empty() {
                blacklist.extend(sent.iter().cloned());
                self.blacklist.save(&blacklist)?;
            }
            sent
        };

        Ok(RunReport {
            first_run,
            roster_size: roster.len(),
            active,
            pool,
            assignments: placement.assignments,
            unplaced: placement.unplaced,
            sent,
            dry_run,
        })
    }

    fn make_rng(&self) -> Mcg128Xsl64 {
        match self.config.raffle.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        }
    }
}
