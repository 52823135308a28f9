//! SQLite repository for CRUD operations on season records

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::schema::create_tables;
use crate::records::{Phase, SeasonRecord};
use crate::teams::Team;

/// Repository for the season record store
pub struct SeasonRepository {
    conn: Connection,
}

impl SeasonRepository {
    /// Open (or create) the database at `db_path`
    pub fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create database directory")?;
            }
        }

        let conn = Connection::open(db_path).context("Failed to open database")?;
        create_tables(&conn)?;

        Ok(Self { conn })
    }

    /// Create an in-memory repository (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(Self { conn })
    }

    // ==================== Insert Operations ====================

    /// Insert a record (upsert on year, team, phase). Validates first;
    /// malformed records never reach the table.
    pub fn insert_record(&self, record: &SeasonRecord) -> Result<()> {
        record.validate()?;
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO season_records
            (year, team, phase, win_pct, point_diff_per_game, made_playoffs, won_division)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.year,
                record.team.name(),
                record.phase.as_str(),
                record.win_pct,
                record.point_diff_per_game,
                record.made_playoffs,
                record.won_division,
            ],
        )?;
        Ok(())
    }

    /// Insert a batch of records in one transaction
    pub fn insert_records(&mut self, records: &[SeasonRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for record in records {
            record.validate()?;
            tx.execute(
                r#"
                INSERT OR REPLACE INTO season_records
                (year, team, phase, win_pct, point_diff_per_game, made_playoffs, won_division)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    record.year,
                    record.team.name(),
                    record.phase.as_str(),
                    record.win_pct,
                    record.point_diff_per_game,
                    record.made_playoffs,
                    record.won_division,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Record a completed (year, phase) ingestion for resume bookkeeping
    pub fn log_ingest(&self, year: i32, phase: Phase, record_count: usize) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO ingest_log (year, phase, record_count, fetched_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                year,
                phase.as_str(),
                record_count as i64,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    // ==================== Query Operations ====================

    /// Load every record in the store
    pub fn get_all_records(&self) -> Result<Vec<SeasonRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT year, team, phase, win_pct, point_diff_per_game, made_playoffs, won_division
            FROM season_records
            ORDER BY year, team, phase
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let team_name: String = row.get(1)?;
            let phase_str: String = row.get(2)?;
            Ok((
                row.get::<_, i32>(0)?,
                team_name,
                phase_str,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, bool>(5)?,
                row.get::<_, bool>(6)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (year, team_name, phase_str, win_pct, pd, playoffs, division) = row?;
            let team = Team::match_name(&team_name)
                .ok_or_else(|| anyhow!("unknown team name in store: {}", team_name))?;
            let phase = Phase::from_str(&phase_str)
                .ok_or_else(|| anyhow!("unknown phase in store: {}", phase_str))?;
            records.push(SeasonRecord {
                year,
                team,
                phase,
                win_pct,
                point_diff_per_game: pd,
                made_playoffs: playoffs,
                won_division: division,
            });
        }
        Ok(records)
    }

    /// Total record count
    pub fn record_count(&self) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM season_records", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Record count for one (year, phase)
    #[allow(dead_code)]
    pub fn count_for(&self, year: i32, phase: Phase) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM season_records WHERE year = ?1 AND phase = ?2",
            params![year, phase.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Whether a (year, phase) ingestion has already been checkpointed
    pub fn is_ingested(&self, year: i32, phase: Phase) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM ingest_log WHERE year = ?1 AND phase = ?2",
            params![year, phase.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Most recent year with a checkpointed ingestion (for resume)
    pub fn last_ingested_year(&self) -> Result<Option<i32>> {
        let year: Option<i32> = self
            .conn
            .query_row("SELECT MAX(year) FROM ingest_log", [], |row| row.get(0))
            .optional()?
            .flatten();
        Ok(year)
    }

    /// Timestamp of the most recent checkpoint, if any
    #[allow(dead_code)]
    pub fn last_fetched_at(&self) -> Result<Option<DateTime<Utc>>> {
        let fetched: Option<String> = self
            .conn
            .query_row("SELECT MAX(fetched_at) FROM ingest_log", [], |row| {
                row.get(0)
            })
            .optional()?
            .flatten();
        Ok(fetched.and_then(|s| DateTime::parse_from_rfc3339(&s).ok().map(|d| d.with_timezone(&Utc))))
    }
}
