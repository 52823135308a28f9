//! CSV interchange for the record store.
//!
//! Columns: `Yr, Tm, Ssn, W-L%, PD/G, Plf, Div`. `Ssn` is `pre`/`reg`,
//! the flags are 0/1. Round-trips `SeasonRecord` exactly; rows that fail
//! team matching or validation abort the import.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::records::{Phase, SeasonRecord};
use crate::teams::Team;

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Yr")]
    year: i32,
    #[serde(rename = "Tm")]
    team: String,
    #[serde(rename = "Ssn")]
    phase: String,
    #[serde(rename = "W-L%")]
    win_pct: f64,
    #[serde(rename = "PD/G")]
    point_diff_per_game: f64,
    #[serde(rename = "Plf")]
    made_playoffs: u8,
    #[serde(rename = "Div")]
    won_division: u8,
}

/// Read records from a CSV file
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<SeasonRecord>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open {}", path.as_ref().display()))?;
    read_from(file)
}

/// Write records to a CSV file
pub fn write_records<P: AsRef<Path>>(path: P, records: &[SeasonRecord]) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
    write_to(file, records)
}

fn read_from<R: Read>(rdr: R) -> Result<Vec<SeasonRecord>> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut records = Vec::new();
    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("Malformed CSV row {}", line + 2))?;
        let team = Team::match_name(&row.team)
            .ok_or_else(|| anyhow!("Unknown team name in CSV: {}", row.team))?;
        let phase = Phase::from_str(&row.phase)
            .ok_or_else(|| anyhow!("Unknown phase in CSV: {}", row.phase))?;
        let record = SeasonRecord {
            year: row.year,
            team,
            phase,
            win_pct: row.win_pct,
            point_diff_per_game: row.point_diff_per_game,
            made_playoffs: row.made_playoffs != 0,
            won_division: row.won_division != 0,
        };
        record.validate()?;
        records.push(record);
    }
    Ok(records)
}

fn write_to<W: Write>(wtr: W, records: &[SeasonRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(wtr);
    for record in records {
        writer.serialize(CsvRow {
            year: record.year,
            team: record.team.name().to_string(),
            phase: record.phase.as_str().to_string(),
            win_pct: record.win_pct,
            point_diff_per_game: record.point_diff_per_game,
            made_playoffs: record.made_playoffs as u8,
            won_division: record.won_division as u8,
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<SeasonRecord> {
        vec![
            SeasonRecord {
                year: 1991,
                team: Team::Commanders,
                phase: Phase::Reg,
                win_pct: 0.875,
                point_diff_per_game: 16.31,
                made_playoffs: true,
                won_division: true,
            },
            SeasonRecord {
                year: 1991,
                team: Team::Commanders,
                phase: Phase::Pre,
                win_pct: 0.5,
                point_diff_per_game: -2.0,
                made_playoffs: false,
                won_division: false,
            },
        ]
    }

    #[test]
    fn test_round_trip() {
        let records = sample_records();
        let mut buf = Vec::new();
        write_to(&mut buf, &records).unwrap();
        let parsed = read_from(buf.as_slice()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_header_columns() {
        let mut buf = Vec::new();
        write_to(&mut buf, &sample_records()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Yr,Tm,Ssn,W-L%,PD/G,Plf,Div"));
    }

    #[test]
    fn test_reads_historical_team_names() {
        let csv = "Yr,Tm,Ssn,W-L%,PD/G,Plf,Div\n\
                   1987,Washington Redskins,reg,0.733,4.67,1,1\n";
        let records = read_from(csv.as_bytes()).unwrap();
        assert_eq!(records[0].team, Team::Commanders);
        assert!(records[0].made_playoffs);
    }

    #[test]
    fn test_rejects_unknown_team() {
        let csv = "Yr,Tm,Ssn,W-L%,PD/G,Plf,Div\n\
                   1987,London Monarchs,reg,0.5,0.0,0,0\n";
        assert!(read_from(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_win_pct() {
        let csv = "Yr,Tm,Ssn,W-L%,PD/G,Plf,Div\n\
                   1987,Chicago Bears,reg,1.5,0.0,0,0\n";
        assert!(read_from(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_missing_field() {
        let csv = "Yr,Tm,Ssn,W-L%,PD/G,Plf,Div\n\
                   1987,Chicago Bears,reg,0.5\n";
        assert!(read_from(csv.as_bytes()).is_err());
    }
}
