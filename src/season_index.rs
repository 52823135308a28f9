//! Season index: consolidated (year, team) lookup.
//!
//! Joins each team-year's preseason record with its regular-season record
//! and the previous year's regular-season record. Pairs missing any of the
//! three source records simply do not appear; that is the expected path for
//! span edges and cancelled preseasons, not an error.

use std::collections::HashMap;

use tracing::warn;

use crate::records::{Phase, SeasonRecord};
use crate::teams::Team;

/// The three source records of one (year, team), flattened into the six
/// numeric metrics the correlation engine samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsolidatedTeamYear {
    pub prior_win_pct: f64,
    pub prior_point_diff: f64,
    pub preseason_win_pct: f64,
    pub preseason_point_diff: f64,
    pub win_pct: f64,
    pub point_diff: f64,
}

/// O(1) lookup from (year, team) to its consolidated metrics.
#[derive(Debug, Default)]
pub struct SeasonIndex {
    entries: HashMap<(i32, Team), ConsolidatedTeamYear>,
}

impl SeasonIndex {
    /// Build the index from an unordered record set.
    ///
    /// Duplicate (year, team, phase) records resolve last-write-wins; each
    /// overwrite is logged so data-quality problems stay visible.
    pub fn build(records: &[SeasonRecord]) -> SeasonIndex {
        let mut by_key: HashMap<(i32, Team, Phase), &SeasonRecord> = HashMap::new();
        for record in records {
            let key = (record.year, record.team, record.phase);
            if let Some(previous) = by_key.insert(key, record) {
                warn!(
                    "duplicate record for {} {} {}: overwriting {:?}",
                    record.year,
                    record.team.name(),
                    record.phase.as_str(),
                    previous
                );
            }
        }

        let mut entries = HashMap::new();
        for (&(year, team, phase), &record) in &by_key {
            if phase != Phase::Reg {
                continue;
            }
            let prior = match by_key.get(&(year - 1, team, Phase::Reg)) {
                Some(r) => r,
                None => continue,
            };
            let preseason = match by_key.get(&(year, team, Phase::Pre)) {
                Some(r) => r,
                None => continue,
            };
            entries.insert(
                (year, team),
                ConsolidatedTeamYear {
                    prior_win_pct: prior.win_pct,
                    prior_point_diff: prior.point_diff_per_game,
                    preseason_win_pct: preseason.win_pct,
                    preseason_point_diff: preseason.point_diff_per_game,
                    win_pct: record.win_pct,
                    point_diff: record.point_diff_per_game,
                },
            );
        }

        SeasonIndex { entries }
    }

    /// Consolidated metrics for (year, team), or `None` when any of the
    /// three prerequisite records is missing.
    pub fn get(&self, year: i32, team: Team) -> Option<&ConsolidatedTeamYear> {
        self.entries.get(&(year, team))
    }

    /// All consolidated entries for a year, in stable team order.
    pub fn teams_in_year(&self, year: i32) -> Vec<(Team, &ConsolidatedTeamYear)> {
        let mut found: Vec<(Team, &ConsolidatedTeamYear)> = self
            .entries
            .iter()
            .filter(|((y, _), _)| *y == year)
            .map(|((_, team), entry)| (*team, entry))
            .collect();
        found.sort_by_key(|(team, _)| *team);
        found
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, team: Team, phase: Phase, win_pct: f64, pd: f64) -> SeasonRecord {
        SeasonRecord {
            year,
            team,
            phase,
            win_pct,
            point_diff_per_game: pd,
            made_playoffs: false,
            won_division: false,
        }
    }

    #[test]
    fn test_complete_triple_produces_one_entry() {
        let records = vec![
            record(1990, Team::Bears, Phase::Reg, 0.5, 1.0),
            record(1991, Team::Bears, Phase::Pre, 0.75, 4.0),
            record(1991, Team::Bears, Phase::Reg, 0.688, 3.5),
        ];
        let index = SeasonIndex::build(&records);
        assert_eq!(index.len(), 1);

        let entry = index.get(1991, Team::Bears).unwrap();
        assert_eq!(entry.prior_win_pct, 0.5);
        assert_eq!(entry.prior_point_diff, 1.0);
        assert_eq!(entry.preseason_win_pct, 0.75);
        assert_eq!(entry.preseason_point_diff, 4.0);
        assert_eq!(entry.win_pct, 0.688);
        assert_eq!(entry.point_diff, 3.5);
    }

    #[test]
    fn test_missing_prerequisite_drops_pair() {
        // No preseason record for 1991.
        let records = vec![
            record(1990, Team::Bears, Phase::Reg, 0.5, 1.0),
            record(1991, Team::Bears, Phase::Reg, 0.688, 3.5),
        ];
        let index = SeasonIndex::build(&records);
        assert!(index.get(1991, Team::Bears).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_missing_prior_year_drops_pair() {
        let records = vec![
            record(1991, Team::Bears, Phase::Pre, 0.75, 4.0),
            record(1991, Team::Bears, Phase::Reg, 0.688, 3.5),
        ];
        let index = SeasonIndex::build(&records);
        assert!(index.get(1991, Team::Bears).is_none());
    }

    #[test]
    fn test_no_spurious_entries_across_teams() {
        // Bears complete, Lions missing preseason: exactly one entry.
        let records = vec![
            record(1990, Team::Bears, Phase::Reg, 0.5, 1.0),
            record(1991, Team::Bears, Phase::Pre, 0.75, 4.0),
            record(1991, Team::Bears, Phase::Reg, 0.688, 3.5),
            record(1990, Team::Lions, Phase::Reg, 0.375, -2.0),
            record(1991, Team::Lions, Phase::Reg, 0.75, 5.2),
        ];
        let index = SeasonIndex::build(&records);
        assert_eq!(index.len(), 1);
        assert!(index.get(1991, Team::Lions).is_none());
    }

    #[test]
    fn test_duplicate_record_last_write_wins() {
        let records = vec![
            record(1990, Team::Bears, Phase::Reg, 0.5, 1.0),
            record(1991, Team::Bears, Phase::Pre, 0.25, -1.0),
            // Corrected preseason row arrives later in the input.
            record(1991, Team::Bears, Phase::Pre, 0.75, 4.0),
            record(1991, Team::Bears, Phase::Reg, 0.688, 3.5),
        ];
        let index = SeasonIndex::build(&records);
        let entry = index.get(1991, Team::Bears).unwrap();
        assert_eq!(entry.preseason_win_pct, 0.75);
        assert_eq!(entry.preseason_point_diff, 4.0);
    }

    #[test]
    fn test_teams_in_year_sorted() {
        let mut records = Vec::new();
        for team in [Team::Lions, Team::Bears] {
            records.push(record(1990, team, Phase::Reg, 0.5, 0.0));
            records.push(record(1991, team, Phase::Pre, 0.5, 0.0));
            records.push(record(1991, team, Phase::Reg, 0.5, 0.0));
        }
        let index = SeasonIndex::build(&records);
        let in_year = index.teams_in_year(1991);
        assert_eq!(in_year.len(), 2);
        assert_eq!(in_year[0].0, Team::Bears);
        assert_eq!(in_year[1].0, Team::Lions);
    }
}
