//! Windowed cross-metric correlation.
//!
//! For each window the engine assembles a 6 x N sample matrix over every
//! consolidated team-year, computes the covariance and correlation
//! matrices, and tests the eight predictor/outcome pairs for significance.
//! Empty windows and zero-variance metrics degrade to sentinels rather
//! than failing the run.

use ndarray::Array2;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::season_index::{ConsolidatedTeamYear, SeasonIndex};
use crate::windows::Window;

/// The six sampled metrics, in sample-matrix row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    PriorWinPct,
    PriorPointDiff,
    PreseasonWinPct,
    PreseasonPointDiff,
    RegWinPct,
    RegPointDiff,
}

/// All metrics, ordered by their row in the sample matrix.
pub const METRICS: [Metric; 6] = [
    Metric::PriorWinPct,
    Metric::PriorPointDiff,
    Metric::PreseasonWinPct,
    Metric::PreseasonPointDiff,
    Metric::RegWinPct,
    Metric::RegPointDiff,
];

/// The four predictor metrics tested against each outcome.
pub const PREDICTORS: [Metric; 4] = [
    Metric::PriorWinPct,
    Metric::PriorPointDiff,
    Metric::PreseasonWinPct,
    Metric::PreseasonPointDiff,
];

/// The two regular-season outcome metrics.
pub const OUTCOMES: [Metric; 2] = [Metric::RegWinPct, Metric::RegPointDiff];

impl Metric {
    /// Row index in the sample and correlation matrices.
    pub fn idx(&self) -> usize {
        match self {
            Metric::PriorWinPct => 0,
            Metric::PriorPointDiff => 1,
            Metric::PreseasonWinPct => 2,
            Metric::PreseasonPointDiff => 3,
            Metric::RegWinPct => 4,
            Metric::RegPointDiff => 5,
        }
    }

    /// Human-readable axis label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::PriorWinPct => "Prev Season Win%",
            Metric::PriorPointDiff => "Prev Season Point Diff",
            Metric::PreseasonWinPct => "Preseason Win%",
            Metric::PreseasonPointDiff => "Preseason Point Diff",
            Metric::RegWinPct => "Win%",
            Metric::RegPointDiff => "Point Diff",
        }
    }

    /// Value of this metric in a consolidated team-year.
    pub fn value(&self, entry: &ConsolidatedTeamYear) -> f64 {
        match self {
            Metric::PriorWinPct => entry.prior_win_pct,
            Metric::PriorPointDiff => entry.prior_point_diff,
            Metric::PreseasonWinPct => entry.preseason_win_pct,
            Metric::PreseasonPointDiff => entry.preseason_point_diff,
            Metric::RegWinPct => entry.win_pct,
            Metric::RegPointDiff => entry.point_diff,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pearson correlation and two-tailed p-value for one metric pair.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PairCorrelation {
    pub x: Metric,
    pub y: Metric,
    pub r: f64,
    pub p_value: f64,
}

/// Correlation output for one window.
///
/// `samples` and `matrix` are `None` when the window had zero qualifying
/// team-years; callers must treat that as "no data", not zero. Inside a
/// present matrix, zero-variance metrics produce NaN entries.
#[derive(Debug, Clone)]
pub struct WindowCorrelation {
    pub window: Window,
    /// Representative year for trend ordering: the window's last year.
    pub end_year: i32,
    pub sample_size: usize,
    /// 6 x N raw metric samples, row order per [`METRICS`].
    pub samples: Option<Array2<f64>>,
    /// 6 x 6 correlation matrix.
    pub matrix: Option<Array2<f64>>,
    /// The eight predictor/outcome tests; empty when the window is empty.
    pub pairs: Vec<PairCorrelation>,
}

impl WindowCorrelation {
    /// Whether the window produced any sample at all.
    pub fn has_data(&self) -> bool {
        self.matrix.is_some()
    }

    /// Correlation of `x` against regular-season win percentage.
    pub fn win_pct_correlation(&self, x: Metric) -> Option<f64> {
        self.pairs
            .iter()
            .find(|p| p.x == x && p.y == Metric::RegWinPct)
            .map(|p| p.r)
            .filter(|r| r.is_finite())
    }
}

/// Analyze one window against the season index.
pub fn analyze_window(index: &SeasonIndex, window: &Window) -> WindowCorrelation {
    let mut columns: Vec<ConsolidatedTeamYear> = Vec::new();
    for year in window.years() {
        for (_, entry) in index.teams_in_year(year) {
            columns.push(*entry);
        }
    }

    let end_year = window.last_year;
    if columns.is_empty() {
        return WindowCorrelation {
            window: window.clone(),
            end_year,
            sample_size: 0,
            samples: None,
            matrix: None,
            pairs: Vec::new(),
        };
    }

    let n = columns.len();
    let mut samples = Array2::<f64>::zeros((METRICS.len(), n));
    for (j, entry) in columns.iter().enumerate() {
        for metric in METRICS {
            samples[[metric.idx(), j]] = metric.value(entry);
        }
    }

    let covariance = covariance_matrix(&samples);
    let matrix = correlation_matrix(&covariance);

    let mut pairs = Vec::with_capacity(PREDICTORS.len() * OUTCOMES.len());
    for y in OUTCOMES {
        for x in PREDICTORS {
            let r = matrix[[x.idx(), y.idx()]];
            pairs.push(PairCorrelation {
                x,
                y,
                r,
                p_value: p_value_for_r(r, n),
            });
        }
    }

    WindowCorrelation {
        window: window.clone(),
        end_year,
        sample_size: n,
        samples: Some(samples),
        matrix: Some(matrix),
        pairs,
    }
}

/// Sample covariance matrix (N-1 denominator) over the matrix rows.
///
/// A single observation leaves every entry undefined (NaN), matching the
/// degenerate-variance sentinel contract.
pub fn covariance_matrix(samples: &Array2<f64>) -> Array2<f64> {
    let (rows, n) = samples.dim();
    if n < 2 {
        return Array2::from_elem((rows, rows), f64::NAN);
    }

    let means: Vec<f64> = (0..rows)
        .map(|i| samples.row(i).sum() / n as f64)
        .collect();

    let mut covariance = Array2::<f64>::zeros((rows, rows));
    for i in 0..rows {
        for j in i..rows {
            let mut sum = 0.0;
            for k in 0..n {
                sum += (samples[[i, k]] - means[i]) * (samples[[j, k]] - means[j]);
            }
            let value = sum / (n - 1) as f64;
            covariance[[i, j]] = value;
            covariance[[j, i]] = value;
        }
    }
    covariance
}

/// Pearson-normalize a covariance matrix: divide by the outer product of
/// the per-row standard deviations. Zero-variance rows yield NaN entries.
pub fn correlation_matrix(covariance: &Array2<f64>) -> Array2<f64> {
    let rows = covariance.nrows();
    let std_devs: Vec<f64> = (0..rows).map(|i| covariance[[i, i]].sqrt()).collect();

    let mut matrix = Array2::<f64>::zeros((rows, rows));
    for i in 0..rows {
        for j in 0..rows {
            let denom = std_devs[i] * std_devs[j];
            matrix[[i, j]] = if denom > 0.0 && denom.is_finite() {
                covariance[[i, j]] / denom
            } else {
                f64::NAN
            };
        }
    }
    matrix
}

/// Two-tailed p-value for a Pearson r under the null of zero correlation,
/// from the t statistic `r * sqrt((n-2) / (1 - r^2))` with n-2 degrees of
/// freedom.
pub fn p_value_for_r(r: f64, n: usize) -> f64 {
    if !r.is_finite() {
        return f64::NAN;
    }
    if n < 3 {
        return 1.0;
    }
    if r.abs() >= 0.9999999 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t_stat = r * (df / (1.0 - r * r)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t_stat.abs()))).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Phase, SeasonRecord};
    use crate::teams::{Team, ALL_TEAMS};
    use crate::windows::windows_from_boundaries;

    fn record(year: i32, team: Team, phase: Phase, win_pct: f64, pd: f64) -> SeasonRecord {
        SeasonRecord {
            year,
            team,
            phase,
            win_pct,
            point_diff_per_game: pd,
            made_playoffs: false,
            won_division: false,
        }
    }

    /// Synthetic league where each team's regular-season win% is a
    /// noiseless linear function of its preseason win%.
    fn linear_league(years: std::ops::RangeInclusive<i32>, teams: &[Team]) -> Vec<SeasonRecord> {
        let mut records = Vec::new();
        for year in years {
            for (i, &team) in teams.iter().enumerate() {
                // Spread preseason win% across teams and years.
                let pre = (i as f64 * 0.1 + (year % 5) as f64 * 0.02).min(1.0);
                let reg = 0.5 * pre + 0.25;
                records.push(record(year, team, Phase::Pre, pre, pre * 10.0 - 4.0));
                records.push(record(year, team, Phase::Reg, reg, reg * 12.0 - 6.0));
            }
        }
        records
    }

    #[test]
    fn test_symmetric_unit_diagonal() {
        let teams = &ALL_TEAMS[..6];
        let records = linear_league(1990..=1994, teams);
        let index = SeasonIndex::build(&records);
        let window = &windows_from_boundaries(&[1991, 1995], &[])[0];
        let result = analyze_window(&index, window);

        let matrix = result.matrix.as_ref().unwrap();
        for i in 0..6 {
            assert!((matrix[[i, i]] - 1.0).abs() < 1e-12, "diagonal at {}", i);
            for j in 0..6 {
                assert!(
                    (matrix[[i, j]] - matrix[[j, i]]).abs() < 1e-12,
                    "symmetry at ({}, {})",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_noiseless_linear_predictor() {
        let teams = &ALL_TEAMS[..8];
        let records = linear_league(1990..=1993, teams);
        let index = SeasonIndex::build(&records);
        let window = &windows_from_boundaries(&[1991, 1994], &[])[0];
        let result = analyze_window(&index, window);

        assert!(result.sample_size >= 5);
        let pair = result
            .pairs
            .iter()
            .find(|p| p.x == Metric::PreseasonWinPct && p.y == Metric::RegWinPct)
            .unwrap();
        assert!((pair.r - 1.0).abs() < 1e-9, "r = {}", pair.r);
        assert!(pair.p_value < 1e-9, "p = {}", pair.p_value);
    }

    #[test]
    fn test_empty_window_is_no_data() {
        let index = SeasonIndex::build(&[]);
        let window = &windows_from_boundaries(&[1990, 1995], &[])[0];
        let result = analyze_window(&index, window);

        assert!(!result.has_data());
        assert_eq!(result.sample_size, 0);
        assert!(result.matrix.is_none());
        assert!(result.samples.is_none());
        assert!(result.pairs.is_empty());
        assert_eq!(result.end_year, 1994);
    }

    #[test]
    fn test_zero_variance_metric_is_nan() {
        // Two team-years with identical preseason win% but varying outcome.
        let records = vec![
            record(1990, Team::Bears, Phase::Reg, 0.4, 1.0),
            record(1991, Team::Bears, Phase::Pre, 0.5, 2.0),
            record(1991, Team::Bears, Phase::Reg, 0.6, 3.0),
            record(1990, Team::Lions, Phase::Reg, 0.5, -1.0),
            record(1991, Team::Lions, Phase::Pre, 0.5, 4.0),
            record(1991, Team::Lions, Phase::Reg, 0.3, -2.0),
        ];
        let index = SeasonIndex::build(&records);
        let window = &windows_from_boundaries(&[1991], &[])[0];
        let result = analyze_window(&index, window);

        let matrix = result.matrix.as_ref().unwrap();
        let pre = Metric::PreseasonWinPct.idx();
        let reg = Metric::RegWinPct.idx();
        assert!(matrix[[pre, reg]].is_nan());
        assert!(matrix[[pre, pre]].is_nan());
        // Metrics with variance still correlate.
        assert!(matrix[[reg, reg]].is_finite());

        let pair = result
            .pairs
            .iter()
            .find(|p| p.x == Metric::PreseasonWinPct && p.y == Metric::RegWinPct)
            .unwrap();
        assert!(pair.r.is_nan());
        assert!(pair.p_value.is_nan());
    }

    #[test]
    fn test_single_sample_all_nan() {
        let records = vec![
            record(1990, Team::Bears, Phase::Reg, 0.4, 1.0),
            record(1991, Team::Bears, Phase::Pre, 0.5, 2.0),
            record(1991, Team::Bears, Phase::Reg, 0.6, 3.0),
        ];
        let index = SeasonIndex::build(&records);
        let window = &windows_from_boundaries(&[1991], &[])[0];
        let result = analyze_window(&index, window);

        assert_eq!(result.sample_size, 1);
        let matrix = result.matrix.as_ref().unwrap();
        assert!(matrix.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_excluded_year_removes_samples() {
        let teams = &ALL_TEAMS[..4];
        let records = linear_league(1989..=1992, teams);
        let index = SeasonIndex::build(&records);

        let without = &windows_from_boundaries(&[1990, 1993], &[])[0];
        let with = &windows_from_boundaries(&[1990, 1993], &[1991])[0];
        let full = analyze_window(&index, without);
        let reduced = analyze_window(&index, with);

        // 1991's four team-years no longer qualify; 1992 still does, since
        // its prior-year regular-season records exist either way.
        assert_eq!(full.sample_size, 12);
        assert_eq!(reduced.sample_size, 8);
    }

    #[test]
    fn test_absent_year_also_removes_dependents() {
        // Drop 1991 from the store entirely: 1991 loses its preseason and
        // 1992 loses its prior regular season.
        let teams = &ALL_TEAMS[..4];
        let records: Vec<SeasonRecord> = linear_league(1989..=1992, teams)
            .into_iter()
            .filter(|r| r.year != 1991)
            .collect();
        let index = SeasonIndex::build(&records);
        let window = &windows_from_boundaries(&[1990, 1993], &[])[0];
        let result = analyze_window(&index, window);

        assert_eq!(result.sample_size, 4);
    }

    #[test]
    fn test_p_value_bounds() {
        assert_eq!(p_value_for_r(0.5, 2), 1.0);
        assert_eq!(p_value_for_r(1.0, 50), 0.0);
        assert!(p_value_for_r(f64::NAN, 50).is_nan());
        let p = p_value_for_r(0.0, 30);
        assert!((p - 1.0).abs() < 1e-9);
        let p = p_value_for_r(0.9, 30);
        assert!(p < 0.001);
    }
}
