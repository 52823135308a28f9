//! Output for the plotting collaborator.
//!
//! Serializes per-window scatter feeds (raw metric samples plus the
//! already-computed correlations) and the cross-window trend series.
//! Undefined values (no-data windows, zero-variance metrics) become
//! explicit `null`s in JSON, never zeros.

use serde::Serialize;

use crate::correlation::{WindowCorrelation, METRICS};
use crate::trend::TrendSeries;

/// Raw sample values for one metric within a window, for scatter plots.
#[derive(Debug, Serialize)]
pub struct MetricSamples {
    pub metric: &'static str,
    pub values: Vec<f64>,
}

/// One predictor/outcome test result. `None` marks an undefined value.
#[derive(Debug, Serialize)]
pub struct PairReport {
    pub x: &'static str,
    pub y: &'static str,
    pub r: Option<f64>,
    pub p_value: Option<f64>,
}

/// Everything the plotting collaborator needs for one window.
#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub first_year: i32,
    pub last_year: i32,
    pub excluded_years: Vec<i32>,
    pub end_year: i32,
    pub sample_size: usize,
    /// Absent for a no-data window.
    pub samples: Option<Vec<MetricSamples>>,
    /// Row-major 6x6, metric order as in `samples`; absent for a no-data
    /// window, entry `null` for a zero-variance metric.
    pub correlation_matrix: Option<Vec<Vec<Option<f64>>>>,
    pub pairs: Vec<PairReport>,
}

/// The full analysis output: per-window reports plus the trend series.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub windows: Vec<WindowReport>,
    pub trend: TrendSeries,
}

impl AnalysisReport {
    pub fn build(results: &[WindowCorrelation], trend: TrendSeries) -> AnalysisReport {
        let windows = results.iter().map(window_report).collect();
        AnalysisReport { windows, trend }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn window_report(result: &WindowCorrelation) -> WindowReport {
    let samples = result.samples.as_ref().map(|samples| {
        METRICS
            .iter()
            .map(|metric| MetricSamples {
                metric: metric.label(),
                values: samples.row(metric.idx()).to_vec(),
            })
            .collect()
    });

    let correlation_matrix = result.matrix.as_ref().map(|matrix| {
        (0..matrix.nrows())
            .map(|i| (0..matrix.ncols()).map(|j| finite(matrix[[i, j]])).collect())
            .collect()
    });

    let pairs = result
        .pairs
        .iter()
        .map(|pair| PairReport {
            x: pair.x.label(),
            y: pair.y.label(),
            r: finite(pair.r),
            p_value: finite(pair.p_value),
        })
        .collect();

    WindowReport {
        first_year: result.window.first_year,
        last_year: result.window.last_year,
        excluded_years: result.window.excluded_years.iter().copied().collect(),
        end_year: result.end_year,
        sample_size: result.sample_size,
        samples,
        correlation_matrix,
        pairs,
    }
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// Print per-window results in table format.
pub fn print_windows(results: &[WindowCorrelation]) {
    for result in results {
        let range = if result.window.first_year == result.window.last_year {
            format!("{}", result.window.first_year)
        } else {
            format!("{}-{}", result.window.first_year, result.window.last_year)
        };
        println!("=== Seasons {} ===", range);
        if !result.window.excluded_years.is_empty() {
            let excluded: Vec<String> = result
                .window
                .excluded_years
                .iter()
                .map(|y| y.to_string())
                .collect();
            println!("  excluding {}", excluded.join(", "));
        }
        if !result.has_data() {
            println!("  no data");
            println!();
            continue;
        }
        println!("  {} team-seasons", result.sample_size);
        for pair in &result.pairs {
            match (finite(pair.r), finite(pair.p_value)) {
                (Some(r), Some(p)) => {
                    println!("  {:>24} vs {:<10} r={:+.4}  p={:.5}", pair.x, pair.y, r, p)
                }
                _ => println!("  {:>24} vs {:<10} undefined", pair.x, pair.y),
            }
        }
        println!();
    }
}

/// Print the trend series in table format.
pub fn print_trend(trend: &TrendSeries) {
    println!(
        "=== Correlation to Win% over time ({}-year clusters) ===",
        trend.mean_cluster_years
    );
    let mut header = format!("  {:>6}", "year");
    for predictor in TrendSeries::predictors() {
        header.push_str(&format!("  {:>24}", predictor.label()));
    }
    println!("{}", header);
    for point in &trend.points {
        let mut line = format!("  {:>6}", point.end_year);
        for predictor in TrendSeries::predictors() {
            let cell = match point.coefficient(predictor) {
                Some(v) => format!("{:+.4}", v),
                None => "-".to_string(),
            };
            line.push_str(&format!("  {:>24}", cell));
        }
        println!("{}", line);
    }
}
