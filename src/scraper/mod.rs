//! Standings scraper for pro-football-reference.com
//!
//! Fetches the preseason and regular-season conference standings tables
//! and normalizes them into season records.

pub mod client;
pub mod standings;
pub mod throttle;

pub use client::StandingsClient;
pub use throttle::Throttle;

/// Base URL for pro-football-reference.com
pub const BASE_URL: &str = "https://www.pro-football-reference.com";

/// Conference standings table ids on both page kinds
pub const CONFERENCE_TABLE_IDS: [&str; 2] = ["NFC", "AFC"];

/// Build the regular-season standings URL for a year
pub fn regular_standings_url(year: i32) -> String {
    format!("{}/years/{}/", BASE_URL, year)
}

/// Build the preseason standings URL for a year
pub fn preseason_standings_url(year: i32) -> String {
    format!("{}/years/{}/preseason.htm", BASE_URL, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(
            regular_standings_url(1991),
            "https://www.pro-football-reference.com/years/1991/"
        );
        assert_eq!(
            preseason_standings_url(1991),
            "https://www.pro-football-reference.com/years/1991/preseason.htm"
        );
    }
}
