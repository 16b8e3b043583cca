//! Level-activity diffing.
//!
//! Compares the freshly fetched roster against the previous snapshot and
//! keeps only the players whose level strictly increased. A player that
//! was not tracked last time has no baseline and is skipped; the very
//! first run has no snapshot at all and yields an empty diff.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One roster entry as produced by the level source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLevel {
    pub name: String,
    pub level: u32,
}

/// A player whose level rose between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub name: String,
    pub from_level: u32,
    pub to_level: u32,
    /// Always `to_level - from_level`, strictly positive.
    pub delta: u32,
}

/// Parse a JSON roster: an array of `{name, level}` objects.
///
/// Entries missing either field are silently dropped rather than failing
/// the whole roster.
pub fn parse_roster(raw: &str) -> Result<Vec<PlayerLevel>, serde_json::Error> {
    #[derive(Deserialize)]
    struct RawEntry {
        name: Option<String>,
        level: Option<u32>,
    }

    let entries: Vec<RawEntry> = serde_json::from_str(raw)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match (entry.name, entry.level) {
            (Some(name), Some(level)) => Some(PlayerLevel { name, level }),
            _ => None,
        })
        .collect())
}

/// Diff the current roster against the previous snapshot.
///
/// Pure function; output order follows `current` and no stable ordering
/// is promised beyond that.
pub fn diff_levels(
    previous: Option<&HashMap<String, u32>>,
    current: &[PlayerLevel],
) -> Vec<ActivityRecord> {
    let Some(previous) = previous else {
        // First run: nothing to compare against.
        return Vec::new();
    };

    let mut active = Vec::new();
    for player in current {
        let Some(&from_level) = previous.get(&player.name) else {
            // Newly appeared player, no baseline yet.
            continue;
        };

        if player.level > from_level {
            active.push(ActivityRecord {
                name: player.name.clone(),
                from_level,
                to_level: player.level,
                delta: player.level - from_level,
            });
        }
    }

    active
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, level: u32) -> PlayerLevel {
        PlayerLevel {
            name: name.to_string(),
            level,
        }
    }

    #[test]
    fn test_first_run_yields_empty_diff() {
        let current = vec![entry("A", 7), entry("B", 10)];
        assert!(diff_levels(None, &current).is_empty());
    }

    #[test]
    fn test_diff_keeps_only_strict_increases() {
        let previous: HashMap<String, u32> =
            [("A".to_string(), 5), ("B".to_string(), 10)].into_iter().collect();
        let current = vec![entry("A", 7), entry("B", 10), entry("C", 1)];

        let diff = diff_levels(Some(&previous), &current);

        assert_eq!(
            diff,
            vec![ActivityRecord {
                name: "A".to_string(),
                from_level: 5,
                to_level: 7,
                delta: 2,
            }]
        );
    }

    #[test]
    fn test_level_drop_is_excluded() {
        let previous: HashMap<String, u32> = [("A".to_string(), 9)].into_iter().collect();
        let current = vec![entry("A", 4)];
        assert!(diff_levels(Some(&previous), &current).is_empty());
    }

    #[test]
    fn test_unknown_players_never_appear_in_diff() {
        let previous: HashMap<String, u32> = [("A".to_string(), 5)].into_iter().collect();
        let current = vec![entry("B", 99), entry("C", 200)];
        assert!(diff_levels(Some(&previous), &current).is_empty());
    }

    #[test]
    fn test_delta_is_strictly_positive() {
        let previous: HashMap<String, u32> = [
            ("A".to_string(), 1),
            ("B".to_string(), 50),
            ("C".to_string(), 100),
        ]
        .into_iter()
        .collect();
        let current = vec![entry("A", 3), entry("B", 50), entry("C", 170)];

        for record in diff_levels(Some(&previous), &current) {
            assert!(record.delta > 0);
            assert_eq!(record.delta, record.to_level - record.from_level);
        }
    }

    #[test]
    fn test_parse_roster_skips_incomplete_entries() {
        let raw = r#"[
            {"name": "A", "level": 120},
            {"name": "B"},
            {"level": 300},
            {"name": "C", "level": 140}
        ]"#;

        let roster = parse_roster(raw).unwrap();
        assert_eq!(roster, vec![entry("A", 120), entry("C", 140)]);
    }

    #[test]
    fn test_parse_roster_rejects_malformed_json() {
        assert!(parse_roster("not json").is_err());
        assert!(parse_roster(r#"{"name": "A"}"#).is_err());
    }
}
