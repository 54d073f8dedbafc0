//! Season configuration
//!
//! The roster and season calendar are fixed by configuration and never
//! changed by the planner itself.

use std::collections::HashSet;

use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{constants, player::Player, week::Calendar};

/// The roster and season a planner works with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Registered players, in display order
    #[garde(length(min = 1, max = constants::roster::MAX_SIZE), custom(validate_roster))]
    roster: Vec<Player>,
    /// Date of the first week
    #[garde(skip)]
    start_date: NaiveDate,
    /// Number of weeks in the season
    #[garde(range(min = 1, max = constants::season::MAX_TOTAL_WEEKS))]
    total_weeks: u32,
}

/// Errors that can occur when building a configuration
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration document could not be parsed
    #[error("configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration violates a limit
    #[error("configuration is invalid: {0}")]
    Invalid(#[from] garde::Report),
}

/// Validates that every roster name is usable and unique
///
/// Names are compared exactly, so `"Robert "` and `"Robert E"` may coexist.
///
/// # Errors
///
/// Returns a `garde::Error` naming the first blank, overlong or repeated name.
fn validate_roster(roster: &[Player], _ctx: &()) -> garde::Result {
    let mut seen = HashSet::new();
    for player in roster {
        if player.is_blank() {
            return Err(garde::Error::new("roster contains a blank name"));
        }
        if player.name().chars().count() > constants::names::MAX_LENGTH {
            return Err(garde::Error::new(format!("name {player:?} is too long")));
        }
        if !seen.insert(player) {
            return Err(garde::Error::new(format!("name {player:?} appears twice")));
        }
    }
    Ok(())
}

impl Default for Config {
    /// The club's 2025 Wednesday-evening season
    fn default() -> Self {
        Self {
            roster: ["Erik", "Bob", "Robert E", "Robert ", "Wouter", "Benno"]
                .into_iter()
                .map(Player::from)
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 21).expect("season start is a valid date"),
            total_weeks: 19,
        }
    }
}

impl Config {
    /// Creates a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Invalid` if the roster is empty, too large, contains
    /// blank, overlong or repeated names, or the season length is out of range.
    pub fn new(roster: Vec<Player>, start_date: NaiveDate, total_weeks: u32) -> Result<Self, Error> {
        let config = Self {
            roster,
            start_date,
            total_weeks,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from JSON
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for malformed JSON and `Error::Invalid` when a
    /// limit is violated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use padel::config::Config;
    ///
    /// let config = Config::from_json(
    ///     r#"{"roster": ["Erik", "Bob", "Wouter", "Benno"], "startDate": "2025-05-21", "totalWeeks": 19}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.roster().len(), 4);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The registered players, in display order
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    /// Whether a player is on the roster
    pub fn is_registered(&self, player: &Player) -> bool {
        self.roster.contains(player)
    }

    /// Date of the first week
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Number of weeks in the season
    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    /// The season calendar
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.start_date, self.total_weeks)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<Player> {
        names.iter().copied().map(Player::from).collect()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 21).unwrap()
    }

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.roster().len(), 6);
        assert_eq!(config.total_weeks(), 19);
        assert!(config.is_registered(&Player::from("Robert ")));
        assert!(!config.is_registered(&Player::from("Robert")));
    }

    #[test]
    fn test_new_validates() {
        assert!(Config::new(roster(&["A", "B"]), start(), 10).is_ok());
        assert!(matches!(
            Config::new(vec![], start(), 10),
            Err(Error::Invalid(_))
        ));
        assert!(matches!(
            Config::new(roster(&["A", "A"]), start(), 10),
            Err(Error::Invalid(_))
        ));
        assert!(matches!(
            Config::new(roster(&["A", " "]), start(), 10),
            Err(Error::Invalid(_))
        ));
        assert!(matches!(
            Config::new(roster(&["A"]), start(), 0),
            Err(Error::Invalid(_))
        ));
        assert!(matches!(
            Config::new(roster(&["A"]), start(), 105),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn test_roster_name_too_long() {
        let long = "a".repeat(31);
        assert!(Config::new(roster(&["A", &long]), start(), 10).is_err());

        let accented = "É".repeat(30);
        assert!(Config::new(roster(&["A", &accented]), start(), 10).is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = Config::from_json(
            r#"{"roster":["A","B","C","D"],"startDate":"2025-06-04","totalWeeks":12}"#,
        )
        .unwrap();

        assert_eq!(config.roster(), roster(&["A", "B", "C", "D"]).as_slice());
        assert_eq!(config.start_date(), NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
        assert_eq!(config.calendar().total_weeks(), 12);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            Config::from_json("{"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"roster":[],"startDate":"2025-06-04","totalWeeks":12}"#),
            Err(Error::Invalid(_))
        ));
    }
}
