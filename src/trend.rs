//! Cross-window trend series.
//!
//! Collects the four predictor-to-win% correlations from every window into
//! parallel series ordered by window end year. Empty windows keep their
//! position with `None` values so a plot can show the gap.

use serde::Serialize;

use crate::correlation::{Metric, WindowCorrelation, PREDICTORS};

/// One trend observation: a window's end year and its four predictor
/// coefficients against regular-season win%. `None` marks a window with no
/// data (or a degenerate-variance predictor), never zero.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub end_year: i32,
    pub sample_size: usize,
    pub prior_win_pct: Option<f64>,
    pub prior_point_diff: Option<f64>,
    pub preseason_win_pct: Option<f64>,
    pub preseason_point_diff: Option<f64>,
}

impl TrendPoint {
    /// Coefficient for one predictor.
    pub fn coefficient(&self, predictor: Metric) -> Option<f64> {
        match predictor {
            Metric::PriorWinPct => self.prior_win_pct,
            Metric::PriorPointDiff => self.prior_point_diff,
            Metric::PreseasonWinPct => self.preseason_win_pct,
            Metric::PreseasonPointDiff => self.preseason_point_diff,
            _ => None,
        }
    }
}

/// The full correlation-over-time series handed to the plotting collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
    /// Descriptive label: span length divided by the number of windows that
    /// actually held data, rounded to the nearest year.
    pub mean_cluster_years: i32,
}

impl TrendSeries {
    /// Build the series from window results ordered by end year ascending.
    pub fn collect(results: &[WindowCorrelation]) -> TrendSeries {
        let points = results
            .iter()
            .map(|result| TrendPoint {
                end_year: result.end_year,
                sample_size: result.sample_size,
                prior_win_pct: result.win_pct_correlation(Metric::PriorWinPct),
                prior_point_diff: result.win_pct_correlation(Metric::PriorPointDiff),
                preseason_win_pct: result.win_pct_correlation(Metric::PreseasonWinPct),
                preseason_point_diff: result.win_pct_correlation(Metric::PreseasonPointDiff),
            })
            .collect();

        TrendSeries {
            points,
            mean_cluster_years: mean_cluster_years(results),
        }
    }

    /// The series for one predictor, parallel to `points`.
    #[allow(dead_code)]
    pub fn series_for(&self, predictor: Metric) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| p.coefficient(predictor))
            .collect()
    }

    /// Predictors in plotting order.
    pub fn predictors() -> [Metric; 4] {
        PREDICTORS
    }
}

/// Span length over the count of non-empty windows, rounded. Zero when no
/// window held data.
fn mean_cluster_years(results: &[WindowCorrelation]) -> i32 {
    let non_empty = results.iter().filter(|r| r.has_data()).count();
    if non_empty == 0 {
        return 0;
    }
    let span = match (results.first(), results.last()) {
        (Some(first), Some(last)) => last.end_year - first.window.first_year + 1,
        _ => 0,
    };
    (span as f64 / non_empty as f64).round() as i32
}
