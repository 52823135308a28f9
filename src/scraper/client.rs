//! HTTP client for standings pages.

use anyhow::{bail, Context, Result};
use tracing::info;

use super::standings::parse_standings;
use super::{preseason_standings_url, regular_standings_url, Throttle};
use crate::records::{Phase, SeasonRecord};
use crate::retry::{retry_anyhow, RetryConfig};

const USER_AGENT: &str = concat!("gridiron-stats/", env!("CARGO_PKG_VERSION"));

/// Fetches and normalizes standings pages, one year and phase at a time.
pub struct StandingsClient {
    http: reqwest::Client,
    throttle: Throttle,
    retry: RetryConfig,
}

impl StandingsClient {
    pub fn new(throttle: Throttle, retry: RetryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            throttle,
            retry,
        })
    }

    /// Fetch one standings page and normalize it into season records.
    ///
    /// Returns an empty list for a year whose page carries no standings
    /// tables (a cancelled preseason), and an error for network failures
    /// (after retries) or unparseable tables.
    pub async fn fetch_year(&mut self, year: i32, phase: Phase) -> Result<Vec<SeasonRecord>> {
        let url = match phase {
            Phase::Pre => preseason_standings_url(year),
            Phase::Reg => regular_standings_url(year),
        };

        self.throttle.wait().await;
        let html = retry_anyhow(&self.retry, &format!("fetch {}", url), || {
            let http = self.http.clone();
            let url = url.clone();
            async move {
                let response = http.get(&url).send().await?;
                let status = response.status();
                // A missing page (e.g. a season with no preseason) is data
                // absence, not a transient failure.
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if !status.is_success() {
                    bail!("{} returned {}", url, status);
                }
                Ok(Some(response.text().await?))
            }
        })
        .await?;

        let html = match html {
            Some(html) => html,
            None => {
                info!("no page for {} {}", year, phase.as_str());
                return Ok(Vec::new());
            }
        };

        let lines = parse_standings(&html)
            .with_context(|| format!("Failed to parse standings for {} {}", year, phase.as_str()))?;
        if lines.is_empty() {
            info!("no standings tables for {} {}", year, phase.as_str());
        }

        lines
            .into_iter()
            .map(|line| line.into_record(year, phase))
            .collect()
    }
}
