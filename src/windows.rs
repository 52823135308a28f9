//! Year-range partitioning for windowed correlation.
//!
//! The caller supplies split boundaries (every year, every 5, one giant
//! window, ...); windows are the spans between consecutive boundaries, with
//! a degenerate single-year window at the final boundary.

use std::collections::BTreeSet;

use serde::Serialize;

/// A contiguous inclusive year range, with the excluded years inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub first_year: i32,
    pub last_year: i32,
    pub excluded_years: BTreeSet<i32>,
}

impl Window {
    /// Years eligible for sampling: the full range minus exclusions.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        (self.first_year..=self.last_year).filter(|y| !self.excluded_years.contains(y))
    }
}

/// Partition a boundary list into windows.
///
/// For boundaries `[b0, .., bk]`, windows are `[b_i, b_{i+1} - 1]` for
/// i < k, plus the degenerate final window `[bk, bk]`. A single boundary
/// yields only its degenerate window; an empty list yields no windows.
/// Excluded years are attached to whichever window contains them.
pub fn windows_from_boundaries(boundaries: &[i32], excluded_years: &[i32]) -> Vec<Window> {
    let mut windows = Vec::with_capacity(boundaries.len());
    for (i, &first_year) in boundaries.iter().enumerate() {
        let last_year = match boundaries.get(i + 1) {
            Some(&next) => next - 1,
            None => first_year,
        };
        if last_year < first_year {
            // Repeated boundary: the span between them is empty.
            continue;
        }
        let excluded: BTreeSet<i32> = excluded_years
            .iter()
            .copied()
            .filter(|y| (first_year..=last_year).contains(y))
            .collect();
        windows.push(Window {
            first_year,
            last_year,
            excluded_years: excluded,
        });
    }
    windows
}

/// Generate boundaries for an every-N-years split policy over
/// `[start_year, end_year]`: `start, start+n, ...` while below the end,
/// then the end itself. `n = 0` means one giant window.
pub fn boundaries_every(start_year: i32, end_year: i32, n: u32) -> Vec<i32> {
    if end_year < start_year {
        return Vec::new();
    }
    let mut boundaries = Vec::new();
    if n > 0 {
        let mut year = start_year;
        while year < end_year {
            boundaries.push(year);
            year += n as i32;
        }
    } else {
        boundaries.push(start_year);
    }
    boundaries.push(end_year);
    boundaries
}
