//! Season record model.
//!
//! One `SeasonRecord` per (year, team, phase), carrying the two numeric
//! metrics the analysis consumes plus the regular-season outcome flags.
//! Rounding happens here, at ingestion; the correlation engine never
//! recomputes it.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::teams::Team;

/// Observation window within one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Pre,
    Reg,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pre => "pre",
            Phase::Reg => "reg",
        }
    }

    pub fn from_str(s: &str) -> Option<Phase> {
        match s {
            "pre" => Some(Phase::Pre),
            "reg" => Some(Phase::Reg),
            _ => None,
        }
    }
}

/// One row of the record store.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRecord {
    pub year: i32,
    pub team: Team,
    pub phase: Phase,
    /// Wins plus half of ties, divided by games played. Rounded to 3 digits.
    pub win_pct: f64,
    /// Points scored minus allowed, per game. Rounded to 2 digits.
    pub point_diff_per_game: f64,
    /// Regular season only; always false for preseason.
    pub made_playoffs: bool,
    /// Regular season only; always false for preseason.
    pub won_division: bool,
}

impl SeasonRecord {
    /// Validate field ranges. Called on every path into the store.
    pub fn validate(&self) -> Result<()> {
        if !self.win_pct.is_finite() || !(0.0..=1.0).contains(&self.win_pct) {
            bail!(
                "invalid win_pct {} for {} {} {}",
                self.win_pct,
                self.year,
                self.team.name(),
                self.phase.as_str()
            );
        }
        if !self.point_diff_per_game.is_finite() {
            bail!(
                "invalid point_diff_per_game for {} {} {}",
                self.year,
                self.team.name(),
                self.phase.as_str()
            );
        }
        Ok(())
    }
}

/// Win/loss/tie and point totals as they appear in a standings table,
/// before derivation into a `SeasonRecord`.
#[derive(Debug, Clone)]
pub struct RawTeamLine {
    pub team: Team,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub point_diff: i32,
    pub made_playoffs: bool,
    pub won_division: bool,
}

impl RawTeamLine {
    /// Derive the stored record for a (year, phase).
    ///
    /// Ties count as half a win. A line with zero games is malformed.
    pub fn into_record(self, year: i32, phase: Phase) -> Result<SeasonRecord> {
        let games = self.wins + self.losses + self.ties;
        if games == 0 {
            bail!(
                "no games played for {} in {} {}",
                self.team.name(),
                year,
                phase.as_str()
            );
        }
        let games = games as f64;
        let record = SeasonRecord {
            year,
            team: self.team,
            phase,
            win_pct: round3((self.wins as f64 + 0.5 * self.ties as f64) / games),
            point_diff_per_game: round2(self.point_diff as f64 / games),
            made_playoffs: phase == Phase::Reg && self.made_playoffs,
            won_division: phase == Phase::Reg && self.won_division,
        };
        record.validate()?;
        Ok(record)
    }
}

/// Round to 3 decimal digits (win percentage precision).
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Round to 2 decimal digits (per-game point differential precision).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
