//! Randomized time-slot placement inside the daily dispatch window.
//!
//! Each winner gets a uniform random minute in the window, redrawn until
//! it sits at least `min_gap_minutes` away from every minute already
//! accepted in the batch. When the attempt budget runs out, the current
//! winner and everyone after them are dropped with a warning instead of
//! failing the batch: a window of W minutes cannot always hold k slots
//! spaced g apart, and that boundary is expected, not exceptional.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityRecord;

/// Placement parameters for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotWindow {
    /// First eligible minute-of-day (inclusive)
    pub start_minute: u32,
    /// Last eligible minute-of-day (inclusive)
    pub end_minute: u32,
    /// Minimum pairwise distance between assigned minutes
    pub min_gap_minutes: u32,
    /// Per-winner budget of random draws before giving up
    pub max_attempts: u32,
}

impl Default for SlotWindow {
    fn default() -> Self {
        Self {
            start_minute: 12 * 60,
            end_minute: 17 * 60,
            min_gap_minutes: 10,
            max_attempts: 1000,
        }
    }
}

/// A winner with an assigned minute-of-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerAssignment {
    pub name: String,
    pub from_level: u32,
    pub to_level: u32,
    pub delta: u32,
    /// Minutes after midnight, inside the configured window.
    pub minute_of_day: u32,
}

impl WinnerAssignment {
    /// Render the slot as `HH:MM`.
    pub fn time_of_day(&self) -> String {
        format!("{:02}:{:02}", self.minute_of_day / 60, self.minute_of_day % 60)
    }
}

/// Outcome of a placement pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPlacement {
    /// Successfully placed winners, sorted ascending by minute.
    pub assignments: Vec<WinnerAssignment>,
    /// Winners dropped because no valid slot was found in time.
    pub unplaced: usize,
}

impl SlotPlacement {
    pub fn is_complete(&self) -> bool {
        self.unplaced == 0
    }
}

/// Assign every winner a random slot respecting the minimum gap.
///
/// Winners are processed in input order; the returned assignments are
/// sorted ascending by minute regardless of that order. On exhaustion
/// the result is a strict prefix of the input with `unplaced > 0`.
pub fn assign_slots<R: Rng + ?Sized>(
    winners: &[ActivityRecord],
    window: &SlotWindow,
    rng: &mut R,
) -> SlotPlacement {
    let mut assignments: Vec<WinnerAssignment> = Vec::with_capacity(winners.len());

    for (index, winner) in winners.iter().enumerate() {
        let mut slot = None;
        for _ in 0..window.max_attempts {
            let candidate = rng.gen_range(window.start_minute..=window.end_minute);
            let fits = assignments
                .iter()
                .all(|a| candidate.abs_diff(a.minute_of_day) >= window.min_gap_minutes);
            if fits {
                slot = Some(candidate);
                break;
            }
        }

        match slot {
            Some(minute_of_day) => assignments.push(WinnerAssignment {
                name: winner.name.clone(),
                from_level: winner.from_level,
                to_level: winner.to_level,
                delta: winner.delta,
                minute_of_day,
            }),
            None => {
                let unplaced = winners.len() - index;
                tracing::warn!(
                    unplaced,
                    max_attempts = window.max_attempts,
                    "could not place every winner without breaking the minimum gap"
                );
                assignments.sort_by_key(|a| a.minute_of_day);
                return SlotPlacement {
                    assignments,
                    unplaced,
                };
            }
        }
    }

    assignments.sort_by_key(|a| a.minute_of_day);
    SlotPlacement {
        assignments,
        unplaced: 0,
    }
}
