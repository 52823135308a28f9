//! CLI commands for gridiron-stats.
//!
//! Covers collection (`scrape`, `import`, `export`) and analysis
//! (`analyze`) over the season record store.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::AppConfig;
use crate::correlation::{analyze_window, WindowCorrelation};
use crate::records::Phase;
use crate::report::{print_trend, print_windows, AnalysisReport};
use crate::retry::RetryConfig;
use crate::scraper::{StandingsClient, Throttle};
use crate::season_index::SeasonIndex;
use crate::storage::{csv, SeasonRepository};
use crate::trend::TrendSeries;
use crate::windows::{boundaries_every, windows_from_boundaries};

#[derive(Parser)]
#[command(name = "gridiron-stats")]
#[command(version, about = "NFL preseason correlation analysis: scraper and CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path override
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape standings into the record store
    Scrape {
        /// First season to fetch
        #[arg(long, default_value_t = 1983)]
        from: i32,

        /// Last season to fetch
        #[arg(long, default_value_t = 2023)]
        to: i32,

        /// Skip (year, phase) pages already checkpointed in the store
        #[arg(long)]
        resume: bool,

        /// Seconds between requests (overrides config)
        #[arg(long)]
        delay: Option<u64>,
    },

    /// Import records from a CSV file into the store
    Import {
        /// Path to CSV file (columns: Yr, Tm, Ssn, W-L%, PD/G, Plf, Div)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Export the store to a CSV file
    Export {
        /// Output CSV path
        #[arg(value_name = "FILE")]
        output: PathBuf,
    },

    /// Run windowed correlation analysis over the store
    Analyze {
        /// Explicit split boundaries, ascending (e.g. 1984,2004,2024)
        #[arg(long, value_delimiter = ',')]
        splits: Option<Vec<i32>>,

        /// Split every N years (ignored when --splits is given; 0 = one window)
        #[arg(long, default_value_t = 20)]
        every: u32,

        /// First split boundary (overrides config)
        #[arg(long)]
        start: Option<i32>,

        /// Last split boundary (overrides config)
        #[arg(long)]
        end: Option<i32>,

        /// Years to exclude from sampling (overrides config)
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<i32>>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write JSON output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_repository(config: &AppConfig, db_override: &Option<PathBuf>) -> Result<SeasonRepository> {
    let path = db_override
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.database.path));
    SeasonRepository::new(&path)
}

/// Scrape standings pages into the store, one (year, phase) at a time,
/// checkpointing after each so an interrupted run can resume.
pub async fn run_scrape(
    db: Option<PathBuf>,
    from: i32,
    to: i32,
    resume: bool,
    delay: Option<u64>,
) -> Result<()> {
    if to < from {
        bail!("--to must not be before --from");
    }
    let config = AppConfig::load()?;
    let mut repo = open_repository(&config, &db)?;

    let interval = delay.unwrap_or(config.scraper.min_interval_secs);
    let retry = RetryConfig {
        max_retries: config.scraper.max_retries,
        ..RetryConfig::default()
    };
    let mut client = StandingsClient::new(Throttle::new(Duration::from_secs(interval)), retry)?;

    if resume {
        if let Some(last) = repo.last_ingested_year()? {
            eprintln!("Resuming; last checkpointed year is {}", last);
        }
    }

    for year in from..=to {
        for phase in [Phase::Reg, Phase::Pre] {
            if resume && repo.is_ingested(year, phase)? {
                eprintln!("{} {}: already ingested, skipping", year, phase.as_str());
                continue;
            }
            let records = client
                .fetch_year(year, phase)
                .await
                .with_context(|| format!("Failed to ingest {} {}", year, phase.as_str()))?;
            repo.insert_records(&records)?;
            repo.log_ingest(year, phase, records.len())?;
            eprintln!("{} {}: {} records", year, phase.as_str(), records.len());
        }
    }

    eprintln!("Store now holds {} records", repo.record_count()?);
    Ok(())
}

/// Import CSV rows into the store.
pub fn run_import(db: Option<PathBuf>, input: &Path) -> Result<()> {
    let config = AppConfig::load()?;
    let mut repo = open_repository(&config, &db)?;

    let records = csv::read_records(input)?;
    repo.insert_records(&records)?;
    eprintln!(
        "Imported {} records; store now holds {}",
        records.len(),
        repo.record_count()?
    );
    Ok(())
}

/// Export the store to CSV.
pub fn run_export(db: Option<PathBuf>, output: &Path) -> Result<()> {
    let config = AppConfig::load()?;
    let repo = open_repository(&config, &db)?;

    let records = repo.get_all_records()?;
    csv::write_records(output, &records)?;
    eprintln!("Exported {} records to {}", records.len(), output.display());
    Ok(())
}

/// Run the windowed correlation analysis.
#[allow(clippy::too_many_arguments)]
pub fn run_analyze(
    db: Option<PathBuf>,
    splits: Option<Vec<i32>>,
    every: u32,
    start: Option<i32>,
    end: Option<i32>,
    exclude: Option<Vec<i32>>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = AppConfig::load()?;
    let repo = open_repository(&config, &db)?;

    let records = repo.get_all_records()?;
    let index = SeasonIndex::build(&records);
    if index.is_empty() {
        eprintln!("No consolidated team-years in the store; run scrape or import first");
    } else {
        eprintln!(
            "{} records, {} consolidated team-years",
            records.len(),
            index.len()
        );
    }

    let boundaries = match splits {
        Some(splits) => {
            if splits.windows(2).any(|pair| pair[0] > pair[1]) {
                bail!("--splits must be ascending");
            }
            splits
        }
        None => {
            let start = start.unwrap_or(config.analysis.start_year);
            let end = end.unwrap_or(config.analysis.end_year);
            if end < start {
                bail!("analysis end year precedes start year");
            }
            boundaries_every(start, end, every)
        }
    };
    let excluded = exclude.unwrap_or(config.analysis.excluded_years);

    let results: Vec<WindowCorrelation> = windows_from_boundaries(&boundaries, &excluded)
        .iter()
        .map(|window| analyze_window(&index, window))
        .collect();
    let trend = TrendSeries::collect(&results);

    match format.as_str() {
        "json" => {
            let report = AnalysisReport::build(&results, trend);
            let json = report.to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("Wrote report to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        _ => {
            print_windows(&results);
            print_trend(&trend);
        }
    }

    Ok(())
}
