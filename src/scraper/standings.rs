//! Conference standings table parser.
//!
//! Both the regular-season and preseason pages carry one table per
//! conference (`#NFC`, `#AFC`). Column layout drifts across five decades:
//! the tie column disappears in modern years, and some pages carry a
//! precomputed point differential while others only have points for and
//! against. The parser keys every cell by its header name to absorb this.

use anyhow::{anyhow, bail, Context, Result};
use scraper::{ElementRef, Html, Selector};

use super::CONFERENCE_TABLE_IDS;
use crate::records::RawTeamLine;
use crate::teams::Team;

/// Playoff berth marker on the raw team name (`*` or `+`).
fn is_playoff_team(raw_name: &str) -> bool {
    raw_name.contains('*') || raw_name.contains('+')
}

/// Division winner marker on the raw team name (`*`).
fn is_division_winner(raw_name: &str) -> bool {
    raw_name.contains('*')
}

/// Parse every conference standings table in a page.
///
/// A page with no conference tables (a cancelled preseason) yields an
/// empty list, not an error. An unmappable team name is fatal.
pub fn parse_standings(html: &str) -> Result<Vec<RawTeamLine>> {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();
    for table_id in CONFERENCE_TABLE_IDS {
        if let Ok(selector) = Selector::parse(&format!("table#{}", table_id)) {
            if let Some(table) = document.select(&selector).next() {
                let parsed = parse_table(&table)
                    .with_context(|| format!("Failed to parse #{} standings", table_id))?;
                lines.extend(parsed);
            }
        }
    }
    Ok(lines)
}

fn parse_table(table: &ElementRef) -> Result<Vec<RawTeamLine>> {
    let header_row = Selector::parse("thead tr").unwrap();
    let body_row = Selector::parse("tbody tr").unwrap();
    let cell = Selector::parse("th, td").unwrap();

    // Some pages stack an over-header above the real one; the last thead
    // row is the one naming the columns.
    let headers: Vec<String> = table
        .select(&header_row)
        .last()
        .map(|row| {
            row.select(&cell)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    if headers.is_empty() {
        bail!("standings table has no header row");
    }

    let col = |name: &str| headers.iter().position(|h| h == name);
    let tm_idx = col("Tm").ok_or_else(|| anyhow!("no Tm column"))?;
    let w_idx = col("W").ok_or_else(|| anyhow!("no W column"))?;
    let l_idx = col("L").ok_or_else(|| anyhow!("no L column"))?;
    let t_idx = col("T");
    let pd_idx = col("PD");
    let pf_idx = col("PF").or_else(|| col("Pts"));
    let pa_idx = col("PA");

    let mut lines = Vec::new();
    for row in table.select(&body_row) {
        let cells: Vec<String> = row
            .select(&cell)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();
        // Division separator rows have a single spanning cell.
        if cells.len() != headers.len() {
            continue;
        }

        let raw_name = &cells[tm_idx];
        let team = Team::match_name(raw_name)
            .ok_or_else(|| anyhow!("No match for team name: {}", raw_name))?;

        let wins = parse_count(&cells[w_idx])
            .with_context(|| format!("Bad win count for {}", raw_name))?;
        let losses = parse_count(&cells[l_idx])
            .with_context(|| format!("Bad loss count for {}", raw_name))?;
        // Tie column is absent in modern tables and sometimes blank.
        let ties = match t_idx {
            Some(idx) if !cells[idx].is_empty() => parse_count(&cells[idx])
                .with_context(|| format!("Bad tie count for {}", raw_name))?,
            _ => 0,
        };

        let point_diff = match pd_idx {
            Some(idx) if !cells[idx].is_empty() => cells[idx]
                .parse::<i32>()
                .with_context(|| format!("Bad point differential for {}", raw_name))?,
            _ => {
                let pf_idx = pf_idx
                    .ok_or_else(|| anyhow!("neither PD nor PF/Pts column present"))?;
                let pa_idx = pa_idx.ok_or_else(|| anyhow!("no PA column"))?;
                let pf: i32 = cells[pf_idx]
                    .parse()
                    .with_context(|| format!("Bad points-for for {}", raw_name))?;
                let pa: i32 = cells[pa_idx]
                    .parse()
                    .with_context(|| format!("Bad points-against for {}", raw_name))?;
                pf - pa
            }
        };

        lines.push(RawTeamLine {
            team,
            wins,
            losses,
            ties,
            point_diff,
            made_playoffs: is_playoff_team(raw_name),
            won_division: is_division_winner(raw_name),
        });
    }
    Ok(lines)
}

fn parse_count(cell: &str) -> Result<u32> {
    cell.parse::<u32>()
        .map_err(|_| anyhow!("not a count: {:?}", cell))
}
