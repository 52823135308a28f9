//! gridiron-stats
//!
//! Collects NFL preseason and regular-season standings into a record store
//! and analyzes how preseason and prior-season performance correlate with
//! regular-season results across configurable year windows.

mod cli;
mod config;
mod correlation;
mod records;
mod report;
mod retry;
mod scraper;
mod season_index;
mod storage;
mod teams;
mod trend;
mod windows;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridiron_stats=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            from,
            to,
            resume,
            delay,
        } => cli::run_scrape(cli.db, from, to, resume, delay).await,
        Commands::Import { input } => cli::run_import(cli.db, &input),
        Commands::Export { output } => cli::run_export(cli.db, &output),
        Commands::Analyze {
            splits,
            every,
            start,
            end,
            exclude,
            format,
            output,
        } => cli::run_analyze(cli.db, splits, every, start, end, exclude, format, output),
    }
}
