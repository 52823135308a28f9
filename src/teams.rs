//! Canonical team identities.
//!
//! Every record in the store is keyed by one of the 32 current franchises.
//! Raw standings names (including historical names and playoff markers) are
//! matched to a canonical identity at ingestion; rows that fail to match
//! never enter the store.

use serde::{Deserialize, Serialize};

/// The 32 NFL franchises under their current names.
///
/// Historical names map to the current franchise (Oilers -> Titans,
/// Redskins/Football Team -> Commanders, Oakland/LA Raiders -> Las Vegas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Cardinals,
    Falcons,
    Ravens,
    Bills,
    Panthers,
    Bears,
    Bengals,
    Browns,
    Cowboys,
    Broncos,
    Lions,
    Packers,
    Texans,
    Colts,
    Jaguars,
    Chiefs,
    Raiders,
    Chargers,
    Rams,
    Dolphins,
    Vikings,
    Patriots,
    Saints,
    Giants,
    Jets,
    Eagles,
    Steelers,
    FortyNiners,
    Seahawks,
    Buccaneers,
    Titans,
    Commanders,
}

/// All teams, in alphabetical order of their full names.
#[allow(dead_code)]
pub const ALL_TEAMS: [Team; 32] = [
    Team::Cardinals,
    Team::Falcons,
    Team::Ravens,
    Team::Bills,
    Team::Panthers,
    Team::Bears,
    Team::Bengals,
    Team::Browns,
    Team::Cowboys,
    Team::Broncos,
    Team::Lions,
    Team::Packers,
    Team::Texans,
    Team::Colts,
    Team::Jaguars,
    Team::Chiefs,
    Team::Raiders,
    Team::Chargers,
    Team::Rams,
    Team::Dolphins,
    Team::Vikings,
    Team::Patriots,
    Team::Saints,
    Team::Giants,
    Team::Jets,
    Team::Eagles,
    Team::Steelers,
    Team::FortyNiners,
    Team::Seahawks,
    Team::Buccaneers,
    Team::Titans,
    Team::Commanders,
];

impl Team {
    /// Full canonical name, used as the join key in CSV interchange.
    pub fn name(&self) -> &'static str {
        match self {
            Team::Cardinals => "Arizona Cardinals",
            Team::Falcons => "Atlanta Falcons",
            Team::Ravens => "Baltimore Ravens",
            Team::Bills => "Buffalo Bills",
            Team::Panthers => "Carolina Panthers",
            Team::Bears => "Chicago Bears",
            Team::Bengals => "Cincinnati Bengals",
            Team::Browns => "Cleveland Browns",
            Team::Cowboys => "Dallas Cowboys",
            Team::Broncos => "Denver Broncos",
            Team::Lions => "Detroit Lions",
            Team::Packers => "Green Bay Packers",
            Team::Texans => "Houston Texans",
            Team::Colts => "Indianapolis Colts",
            Team::Jaguars => "Jacksonville Jaguars",
            Team::Chiefs => "Kansas City Chiefs",
            Team::Raiders => "Las Vegas Raiders",
            Team::Chargers => "Los Angeles Chargers",
            Team::Rams => "Los Angeles Rams",
            Team::Dolphins => "Miami Dolphins",
            Team::Vikings => "Minnesota Vikings",
            Team::Patriots => "New England Patriots",
            Team::Saints => "New Orleans Saints",
            Team::Giants => "New York Giants",
            Team::Jets => "New York Jets",
            Team::Eagles => "Philadelphia Eagles",
            Team::Steelers => "Pittsburgh Steelers",
            Team::FortyNiners => "San Francisco 49ers",
            Team::Seahawks => "Seattle Seahawks",
            Team::Buccaneers => "Tampa Bay Buccaneers",
            Team::Titans => "Tennessee Titans",
            Team::Commanders => "Washington Commanders",
        }
    }

    /// Match a raw standings name to a canonical team.
    ///
    /// Matching is by nickname substring, case-insensitive, so playoff
    /// markers ("Dallas Cowboys*") and historical city moves both resolve.
    /// Returns `None` for names that match no franchise.
    pub fn match_name(raw: &str) -> Option<Team> {
        let lower = raw.to_lowercase();
        let table: [(&str, Team); 35] = [
            ("cardinal", Team::Cardinals),
            ("falcon", Team::Falcons),
            ("raven", Team::Ravens),
            ("bills", Team::Bills),
            ("panther", Team::Panthers),
            ("bear", Team::Bears),
            ("bengal", Team::Bengals),
            ("brown", Team::Browns),
            ("cowboy", Team::Cowboys),
            ("bronco", Team::Broncos),
            ("lion", Team::Lions),
            ("packer", Team::Packers),
            ("texan", Team::Texans),
            ("colt", Team::Colts),
            ("jaguar", Team::Jaguars),
            ("chief", Team::Chiefs),
            ("raider", Team::Raiders),
            ("charger", Team::Chargers),
            ("rams", Team::Rams),
            ("dolphin", Team::Dolphins),
            ("viking", Team::Vikings),
            ("patriot", Team::Patriots),
            ("saint", Team::Saints),
            ("giant", Team::Giants),
            ("jets", Team::Jets),
            ("eagle", Team::Eagles),
            ("steeler", Team::Steelers),
            ("49er", Team::FortyNiners),
            ("niner", Team::FortyNiners),
            ("seahawk", Team::Seahawks),
            ("buccaneer", Team::Buccaneers),
            ("titan", Team::Titans),
            ("oiler", Team::Titans),
            ("redskin", Team::Commanders),
            ("commander", Team::Commanders),
        ];
        for (needle, team) in table {
            if lower.contains(needle) {
                return Some(team);
            }
        }
        // "Washington Football Team" carries no nickname at all.
        if lower.contains("washington") {
            return Some(Team::Commanders);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_current_names() {
        assert_eq!(
            Team::match_name("Green Bay Packers"),
            Some(Team::Packers)
        );
        assert_eq!(
            Team::match_name("San Francisco 49ers"),
            Some(Team::FortyNiners)
        );
    }

    #[test]
    fn test_match_with_playoff_markers() {
        assert_eq!(Team::match_name("Dallas Cowboys*"), Some(Team::Cowboys));
        assert_eq!(Team::match_name("Buffalo Bills+"), Some(Team::Bills));
    }

    #[test]
    fn test_match_historical_names() {
        assert_eq!(Team::match_name("Houston Oilers"), Some(Team::Titans));
        assert_eq!(
            Team::match_name("Washington Redskins"),
            Some(Team::Commanders)
        );
        assert_eq!(
            Team::match_name("Washington Football Team"),
            Some(Team::Commanders)
        );
        assert_eq!(Team::match_name("Oakland Raiders"), Some(Team::Raiders));
        assert_eq!(Team::match_name("St. Louis Rams"), Some(Team::Rams));
        assert_eq!(
            Team::match_name("San Diego Chargers"),
            Some(Team::Chargers)
        );
    }

    #[test]
    fn test_unmappable_name() {
        assert_eq!(Team::match_name("London Monarchs"), None);
    }

    #[test]
    fn test_all_canonical_names_round_trip() {
        for team in ALL_TEAMS {
            assert_eq!(Team::match_name(team.name()), Some(team));
        }
        assert_eq!(ALL_TEAMS.len(), 32);
    }
}
