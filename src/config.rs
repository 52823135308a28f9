//! Configuration for gridiron-stats.

use serde::{Deserialize, Serialize};

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/season_stats.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Scraper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Minimum seconds between requests
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,
    /// Retry attempts per page after the initial try
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_min_interval_secs() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: default_min_interval_secs(),
            max_retries: default_max_retries(),
        }
    }
}

/// Analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// First split boundary of the analysis span
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    /// Last split boundary of the analysis span
    #[serde(default = "default_end_year")]
    pub end_year: i32,
    /// Years skipped by the correlation engine (anomalous seasons)
    #[serde(default = "default_excluded_years")]
    pub excluded_years: Vec<i32>,
}

fn default_start_year() -> i32 {
    1984
}

fn default_end_year() -> i32 {
    2024
}

fn default_excluded_years() -> Vec<i32> {
    // 2020 had no preseason.
    vec![2020]
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            excluded_years: default_excluded_years(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (GRIDIRON_DATABASE_PATH, etc.)
            .add_source(
                config::Environment::with_prefix("GRIDIRON")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.start_year, 1984);
        assert_eq!(config.analysis.end_year, 2024);
        assert_eq!(config.analysis.excluded_years, vec![2020]);
        assert_eq!(config.scraper.min_interval_secs, 5);
    }
}
