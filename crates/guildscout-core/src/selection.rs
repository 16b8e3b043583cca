//! Winner-pool ranking and raffle draw.
//!
//! Two stages: `select_pool` filters active players against the
//! blacklist and keeps the `pool_size` most improved, then
//! `pick_winners` draws a uniform random subset of that pool. The RNG is
//! passed in by the caller so runs can be made reproducible with a
//! configured seed.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::activity::ActivityRecord;

/// Filter active players against the blacklist and rank by improvement.
///
/// Blacklisted names are removed, the rest are sorted by delta descending
/// (stable, so equal deltas keep their incoming order) and truncated to
/// `pool_size`.
pub fn select_pool(
    active: &[ActivityRecord],
    blacklist: &BTreeSet<String>,
    pool_size: usize,
) -> Vec<ActivityRecord> {
    let mut pool: Vec<ActivityRecord> = active
        .iter()
        .filter(|record| !blacklist.contains(&record.name))
        .cloned()
        .collect();

    pool.sort_by(|a, b| b.delta.cmp(&a.delta));
    pool.truncate(pool_size);
    pool
}

/// Draw `count` winners uniformly without replacement.
///
/// Takes everyone when the pool holds fewer than `count` candidates.
pub fn pick_winners<R: Rng + ?Sized>(
    pool: &[ActivityRecord],
    count: usize,
    rng: &mut R,
) -> Vec<ActivityRecord> {
    if pool.is_empty() {
        return Vec::new();
    }

    let n = count.min(pool.len());
    pool.choose_multiple(rng, n).cloned().collect()
}
