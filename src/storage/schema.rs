//! SQLite schema for the season record store
//!
//! Tables:
//! - season_records: one row per (year, team, phase)
//! - ingest_log: per-(year, phase) checkpoint trail for resumable scraping

use rusqlite::{Connection, Result};

/// Create all tables in the database
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS season_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            year INTEGER NOT NULL,
            team TEXT NOT NULL,
            phase TEXT NOT NULL,
            win_pct REAL NOT NULL,
            point_diff_per_game REAL NOT NULL,
            made_playoffs INTEGER NOT NULL DEFAULT 0,
            won_division INTEGER NOT NULL DEFAULT 0,
            UNIQUE(year, team, phase)
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS ingest_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            year INTEGER NOT NULL,
            phase TEXT NOT NULL,
            record_count INTEGER NOT NULL,
            fetched_at TEXT NOT NULL,
            UNIQUE(year, phase)
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_season_records_year ON season_records(year)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_ingest_log_year ON ingest_log(year)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_create_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('season_records', 'ingest_log')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // Should not fail on second call
        create_tables(&conn).unwrap();
    }
}
