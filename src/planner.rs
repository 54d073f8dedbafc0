//! The stateful planner
//!
//! This module contains the [`Planner`], which owns the season's records and
//! exposes every operation with side effects: marking availability, managing
//! guests, creating and editing teams, entering results, and moving the
//! records through a [`Store`]. Every operation either succeeds completely
//! or leaves all records untouched.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Serialize, de::DeserializeOwned};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::{
    assignment::{self, InsufficientPlayers},
    availability::{AvailabilityRecord, Status},
    config::Config,
    constants::matches::PLAYERS_PER_MATCH,
    guests::{self, GuestPool},
    matches::{self, Match, Side},
    player::{Kind, Player},
    results::{MatchResult, ResultDraft, ScoreError},
    stats::{self, CompletedMatch, PlayerStats, Standing},
    store::{Record, Store},
    week::{Calendar, Week, Weekly},
};

/// Errors that can occur when operating the planner
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer than four players are eligible for the week
    #[error("not enough players available ({available}/{PLAYERS_PER_MATCH})")]
    InsufficientPlayers {
        /// Number of eligible players found
        available: usize,
    },
    /// A score could not be parsed
    #[error("invalid score: {0}")]
    InvalidScore(#[from] ScoreError),
    /// The player is already in the week's match
    #[error("{0} is already in the match")]
    DuplicatePlayer(Player),
    /// The slot does not exist in the team
    #[error("{0:?} has no slot {1}")]
    NoSlot(Side, usize),
    /// No teams have been created for the week
    #[error("no match for week {0}")]
    NoMatch(Week),
    /// The week is not part of the season
    #[error("week {0} is outside the season")]
    WeekOutOfRange(Week),
    /// A guest could not be added
    #[error("invalid guest: {0}")]
    Guest(#[from] guests::Error),
}

impl From<InsufficientPlayers> for Error {
    fn from(InsufficientPlayers { available }: InsufficientPlayers) -> Self {
        Self::InsufficientPlayers { available }
    }
}

/// Season planner holding all records
///
/// Serializes as a snapshot of its state for the presentation layer.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Planner {
    /// Roster and season
    config: Config,
    /// Who can play when
    availability: AvailabilityRecord,
    /// Lineups per week
    matches: Weekly<Match>,
    /// Scores per week
    results: Weekly<MatchResult>,
    /// Guests waiting for the next assignment run
    guests: GuestPool,
    /// Week whose result is being edited
    editing: Option<Week>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Planner {
    /// Creates a planner with empty records
    pub fn new(config: Config) -> Self {
        Self::with_records(
            config,
            AvailabilityRecord::default(),
            Weekly::default(),
            Weekly::default(),
        )
    }

    /// Creates a planner from existing records
    pub fn with_records(
        config: Config,
        availability: AvailabilityRecord,
        matches: Weekly<Match>,
        results: Weekly<MatchResult>,
    ) -> Self {
        Self {
            config,
            availability,
            matches,
            results,
            guests: GuestPool::default(),
            editing: None,
        }
    }

    /// Loads the records from a store
    ///
    /// Records that have never been saved start out empty.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a record cannot be read or decoded.
    pub fn load<S: Store>(config: Config, store: &S) -> Result<Self, S::Error> {
        Ok(Self::with_records(
            config,
            read(store, Record::Availability)?,
            read(store, Record::Matches)?,
            read(store, Record::Results)?,
        ))
    }

    /// Saves the records to a store
    ///
    /// The guest pool and edit state are transient and not saved.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a record cannot be encoded or written.
    pub fn save<S: Store>(&self, store: &mut S) -> Result<(), S::Error> {
        store.save(Record::Availability, serde_json::to_value(&self.availability)?)?;
        store.save(Record::Matches, serde_json::to_value(&self.matches)?)?;
        store.save(Record::Results, serde_json::to_value(&self.results)?)?;
        Ok(())
    }

    /// The configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The registered players, in display order
    pub fn roster(&self) -> &[Player] {
        self.config.roster()
    }

    /// The season calendar
    pub fn calendar(&self) -> Calendar {
        self.config.calendar()
    }

    /// The week to plan for on a given day
    pub fn current_week(&self, today: chrono::NaiveDate) -> Week {
        self.calendar().current_week(today)
    }

    /// The week to plan for today, by the local clock
    pub fn this_week(&self) -> Week {
        self.current_week(chrono::Local::now().date_naive())
    }

    /// Tells registered players and guests apart
    ///
    /// # Returns
    ///
    /// `None` if the player is neither on the roster nor in the guest pool
    pub fn kind_of(&self, player: &Player) -> Option<Kind> {
        if self.config.is_registered(player) {
            Some(Kind::Registered)
        } else if self.guests.contains(player) {
            Some(Kind::Guest)
        } else {
            None
        }
    }

    fn check_week(&self, week: Week) -> Result<(), Error> {
        if self.calendar().contains(week) {
            Ok(())
        } else {
            Err(Error::WeekOutOfRange(week))
        }
    }

    /// The availability record
    pub fn availability(&self) -> &AvailabilityRecord {
        &self.availability
    }

    /// Sets a player's availability for a week
    ///
    /// # Errors
    ///
    /// Returns `Error::WeekOutOfRange` if the week is not part of the season.
    pub fn set_availability(
        &mut self,
        week: Week,
        player: Player,
        status: Status,
    ) -> Result<(), Error> {
        self.check_week(week)?;
        self.availability.set(week, player, status);
        Ok(())
    }

    /// Advances a player's availability for a week to the next status
    ///
    /// # Errors
    ///
    /// Returns `Error::WeekOutOfRange` if the week is not part of the season.
    pub fn cycle_availability(&mut self, week: Week, player: &Player) -> Result<Status, Error> {
        self.check_week(week)?;
        Ok(self.availability.cycle(week, player))
    }

    /// Adds a guest for the next assignment run
    ///
    /// # Errors
    ///
    /// Returns `Error::Guest` if the name is rejected.
    pub fn add_guest(&mut self, name: &str) -> Result<Player, Error> {
        Ok(self.guests.add(name, self.config.roster())?)
    }

    /// Removes a guest from the pool
    ///
    /// # Returns
    ///
    /// `true` if the guest was in the pool
    pub fn remove_guest(&mut self, guest: &Player) -> bool {
        self.guests.remove(guest)
    }

    /// Empties the guest pool
    pub fn clear_guests(&mut self) {
        self.guests.clear();
    }

    /// The guests in the pool, in the order they were added
    pub fn guests(&self) -> &[Player] {
        self.guests.guests()
    }

    /// Lists the players who may be picked for a week
    pub fn eligible_players(&self, week: Week) -> Vec<Player> {
        assignment::compute_eligible_players(
            &self.availability,
            week,
            self.config.roster(),
            &self.guests,
        )
    }

    /// Counts how often each candidate has played, across all weeks
    pub fn match_counts(&self, candidates: &[Player]) -> HashMap<Player, usize> {
        assignment::compute_match_counts(self.matches.values(), candidates)
    }

    /// Creates the teams for a week from the least-played eligible players
    ///
    /// Replaces any existing match for the week. On success the guest pool
    /// is emptied and the week's result is cleared, even when the new lineup
    /// matches the old one.
    ///
    /// # Errors
    ///
    /// * `Error::WeekOutOfRange` - The week is not part of the season
    /// * `Error::InsufficientPlayers` - Fewer than four players are eligible
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use padel::{
    ///     availability::Status, config::Config, matches::Side, planner::Planner, player::Player,
    ///     week::Week,
    /// };
    ///
    /// let roster: Vec<Player> = ["A", "B", "C", "D", "E", "F"].into_iter().map(Player::from).collect();
    /// let start = NaiveDate::from_ymd_opt(2025, 5, 21).unwrap();
    /// let mut planner = Planner::new(Config::new(roster.clone(), start, 19).unwrap());
    ///
    /// for player in &roster[..4] {
    ///     planner.set_availability(Week::FIRST, player.clone(), Status::Available).unwrap();
    /// }
    /// let teams = planner.create_teams(Week::FIRST).unwrap();
    ///
    /// assert_eq!(teams.team(Side::Team1), &[Player::from("A"), Player::from("C")]);
    /// assert_eq!(teams.team(Side::Team2), &[Player::from("B"), Player::from("D")]);
    /// ```
    pub fn create_teams(&mut self, week: Week) -> Result<&Match, Error> {
        self.check_week(week)?;

        let eligible = self.eligible_players(week);
        let counts = self.match_counts(&eligible);
        let teams = assignment::assign_teams(&eligible, &counts)?;

        log::info!(
            "week {week}: {} vs {}",
            teams.team(Side::Team1).iter().join(" & "),
            teams.team(Side::Team2).iter().join(" & "),
        );

        self.guests.clear();
        self.results.remove(week);
        self.matches.insert(week, teams);
        self.matches.get(week).ok_or(Error::NoMatch(week))
    }

    /// Gets the match for a week
    pub fn match_for(&self, week: Week) -> Option<&Match> {
        self.matches.get(week)
    }

    /// Every match, by week
    pub fn matches(&self) -> &Weekly<Match> {
        &self.matches
    }

    fn match_mut(&mut self, week: Week) -> Result<&mut Match, Error> {
        self.matches.get_mut(week).ok_or(Error::NoMatch(week))
    }

    /// Moves a player to the other team of a week's match
    ///
    /// A move into a full team, or of a player who is not in `from`, is
    /// ignored.
    ///
    /// # Returns
    ///
    /// `true` if the lineup changed, in which case the week's result is
    /// cleared
    ///
    /// # Errors
    ///
    /// Returns `Error::NoMatch` if the week has no match.
    pub fn move_player(
        &mut self,
        week: Week,
        player: &Player,
        from: Side,
        to: Side,
    ) -> Result<bool, Error> {
        let moved = self.match_mut(week)?.move_player(player, from, to);
        if moved {
            log::debug!("week {week}: moved {player} to {to:?}");
            self.results.remove(week);
        } else {
            log::warn!("week {week}: cannot move {player} from {from:?} to {to:?}");
        }
        Ok(moved)
    }

    /// Swaps two players between the teams of a week's match
    ///
    /// # Returns
    ///
    /// `true` if the lineup changed, in which case the week's result is
    /// cleared
    ///
    /// # Errors
    ///
    /// Returns `Error::NoMatch` if the week has no match.
    pub fn swap_players(
        &mut self,
        week: Week,
        a: &Player,
        side_a: Side,
        b: &Player,
        side_b: Side,
    ) -> Result<bool, Error> {
        let swapped = self.match_mut(week)?.swap_players(a, side_a, b, side_b);
        if swapped {
            log::debug!("week {week}: swapped {a} and {b}");
            self.results.remove(week);
        } else {
            log::warn!("week {week}: cannot swap {a} ({side_a:?}) with {b} ({side_b:?})");
        }
        Ok(swapped)
    }

    /// Puts a player into a slot of a week's match
    ///
    /// Clears the week's result on success.
    ///
    /// # Errors
    ///
    /// * `Error::NoMatch` - The week has no match
    /// * `Error::DuplicatePlayer` - The player is already in the match
    /// * `Error::NoSlot` - The slot does not exist in the team
    pub fn change_player(
        &mut self,
        week: Week,
        side: Side,
        slot: usize,
        player: Player,
    ) -> Result<(), Error> {
        let name = player.clone();
        match self.match_mut(week)?.change_player(side, slot, player) {
            Ok(()) => {
                log::debug!("week {week}: {name} now plays {side:?} slot {slot}");
                self.results.remove(week);
                Ok(())
            }
            Err(matches::Error::Duplicate) => {
                log::warn!("week {week}: {name} is already in the match");
                Err(Error::DuplicatePlayer(name))
            }
            Err(matches::Error::NoSlot) => {
                log::warn!("week {week}: {side:?} has no slot {slot}");
                Err(Error::NoSlot(side, slot))
            }
        }
    }

    /// Records the score of a week's match
    ///
    /// Overwrites any previous result and ends result editing.
    ///
    /// # Errors
    ///
    /// * `Error::WeekOutOfRange` - The week is not part of the season
    /// * `Error::InvalidScore` - A score is missing, not a whole number or negative
    pub fn record_result(
        &mut self,
        week: Week,
        team1_score: &str,
        team2_score: &str,
    ) -> Result<MatchResult, Error> {
        self.check_week(week)?;
        let result = MatchResult::parse(team1_score, team2_score)?;

        if !self.matches.contains(week) {
            log::warn!("week {week}: result recorded without a match");
        }
        log::info!(
            "week {week}: result {}-{}",
            result.team1_score,
            result.team2_score
        );

        self.results.insert(week, result);
        self.editing = None;
        Ok(result)
    }

    /// Starts editing a week's result
    ///
    /// # Returns
    ///
    /// The form contents, pre-filled with the stored scores if there are any
    ///
    /// # Errors
    ///
    /// Returns `Error::WeekOutOfRange` if the week is not part of the season.
    pub fn start_editing_result(&mut self, week: Week) -> Result<ResultDraft, Error> {
        self.check_week(week)?;
        self.editing = Some(week);
        Ok(self
            .results
            .get(week)
            .map(ResultDraft::from)
            .unwrap_or_default())
    }

    /// Abandons result editing
    pub fn cancel_editing_result(&mut self) {
        self.editing = None;
    }

    /// The week whose result is being edited
    pub fn editing(&self) -> Option<Week> {
        self.editing
    }

    /// Gets the result for a week
    pub fn result(&self, week: Week) -> Option<&MatchResult> {
        self.results.get(week)
    }

    /// Every result, by week
    pub fn results(&self) -> &Weekly<MatchResult> {
        &self.results
    }

    /// Number of matches a player appeared in
    pub fn play_count(&self, player: &Player) -> usize {
        stats::get_play_count(player, &self.matches)
    }

    /// Number of matches a player won
    pub fn win_count(&self, player: &Player) -> usize {
        stats::get_win_count(player, &self.matches, &self.results)
    }

    /// A player's season record
    pub fn player_stats(&self, player: &Player) -> PlayerStats {
        PlayerStats::compute(player, &self.matches, &self.results)
    }

    /// The roster ranked by wins
    pub fn standings(&self) -> Vec<Standing> {
        stats::standings(self.config.roster(), &self.matches, &self.results)
    }

    /// Every week with a result, most recent first
    pub fn history(&self) -> Vec<CompletedMatch> {
        stats::history(&self.matches, &self.results)
    }
}

/// Reads and decodes one record, defaulting when it was never saved
fn read<S, T>(store: &S, record: Record) -> Result<T, S::Error>
where
    S: Store,
    T: DeserializeOwned + Default,
{
    Ok(store
        .load(record)?
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::store::MemoryStore;

    fn p(name: &str) -> Player {
        Player::from(name)
    }

    fn players(names: &[&str]) -> Vec<Player> {
        names.iter().copied().map(p).collect()
    }

    fn planner() -> Planner {
        let config = Config::new(
            players(&["A", "B", "C", "D", "E", "F"]),
            NaiveDate::from_ymd_opt(2025, 5, 21).unwrap(),
            19,
        )
        .unwrap();
        Planner::new(config)
    }

    fn make_available(planner: &mut Planner, week: Week, names: &[&str]) {
        for name in names {
            planner
                .set_availability(week, p(name), Status::Available)
                .unwrap();
        }
    }

    fn planner_with_lineup(team1: &[&str], team2: &[&str]) -> Planner {
        let matches = [(
            Week::FIRST,
            Match::new(players(team1), players(team2)).unwrap(),
        )]
        .into_iter()
        .collect();
        Planner::with_records(
            planner().config().clone(),
            AvailabilityRecord::default(),
            matches,
            Weekly::default(),
        )
    }

    fn planner_with_match() -> Planner {
        let mut planner = planner();
        make_available(&mut planner, Week::FIRST, &["A", "B", "C", "D"]);
        planner.create_teams(Week::FIRST).unwrap();
        planner
    }

    #[test]
    fn test_create_teams_first_week() {
        let mut planner = planner();
        make_available(&mut planner, Week::FIRST, &["A", "B", "C", "D"]);

        let teams = planner.create_teams(Week::FIRST).unwrap();

        assert_eq!(teams.team(Side::Team1), players(&["A", "C"]).as_slice());
        assert_eq!(teams.team(Side::Team2), players(&["B", "D"]).as_slice());
    }

    #[test]
    fn test_create_teams_insufficient_leaves_state() {
        let mut planner = planner();
        make_available(&mut planner, Week::FIRST, &["A", "B"]);
        planner.add_guest("Sanne").unwrap();

        assert_eq!(
            planner.create_teams(Week::FIRST),
            Err(Error::InsufficientPlayers { available: 3 })
        );
        assert!(planner.match_for(Week::FIRST).is_none());
        assert_eq!(planner.guests(), &[p("Sanne")]);
    }

    #[test]
    fn test_create_teams_with_guests_clears_pool() {
        let mut planner = planner();
        make_available(&mut planner, Week::FIRST, &["A", "B"]);
        planner.add_guest("Sanne").unwrap();
        planner.add_guest("Joost").unwrap();

        assert_eq!(planner.kind_of(&p("Sanne")), Some(Kind::Guest));
        let teams = planner.create_teams(Week::FIRST).unwrap().clone();

        assert_eq!(teams.team(Side::Team1), players(&["A", "Sanne"]).as_slice());
        assert_eq!(teams.team(Side::Team2), players(&["B", "Joost"]).as_slice());
        assert!(planner.guests().is_empty());
        assert_eq!(planner.kind_of(&p("Sanne")), None);
        assert_eq!(planner.kind_of(&p("A")), Some(Kind::Registered));
    }

    #[test]
    fn test_create_teams_rotates_by_play_count() {
        let mut planner = planner();
        let everyone = ["A", "B", "C", "D", "E", "F"];
        let expected = [
            (["A", "C"], ["B", "D"]),
            (["E", "A"], ["F", "B"]),
            (["C", "E"], ["D", "F"]),
        ];

        for (number, (team1, team2)) in (1..).zip(expected) {
            let week = Week::new(number);
            make_available(&mut planner, week, &everyone);
            let teams = planner.create_teams(week).unwrap();

            assert_eq!(teams.team(Side::Team1), players(&team1).as_slice());
            assert_eq!(teams.team(Side::Team2), players(&team2).as_slice());
        }
        for name in everyone {
            assert_eq!(planner.play_count(&p(name)), 2);
        }
    }

    #[test]
    fn test_create_teams_always_clears_result() {
        let mut planner = planner_with_match();
        let before = planner.match_for(Week::FIRST).unwrap().clone();
        planner.record_result(Week::FIRST, "6", "2").unwrap();

        let again = planner.create_teams(Week::FIRST).unwrap();
        assert!(again.same_lineup(&before));
        assert!(planner.result(Week::FIRST).is_none());

        planner.record_result(Week::FIRST, "6", "2").unwrap();
        make_available(&mut planner, Week::FIRST, &["E"]);
        planner
            .set_availability(Week::FIRST, p("A"), Status::Unavailable)
            .unwrap();
        planner.create_teams(Week::FIRST).unwrap();
        assert!(planner.result(Week::FIRST).is_none());
    }

    #[test]
    fn test_failed_create_teams_keeps_result() {
        let mut planner = planner_with_match();
        planner.record_result(Week::FIRST, "6", "2").unwrap();
        planner
            .set_availability(Week::FIRST, p("A"), Status::Unavailable)
            .unwrap();

        assert_eq!(
            planner.create_teams(Week::FIRST),
            Err(Error::InsufficientPlayers { available: 3 })
        );
        assert_eq!(planner.result(Week::FIRST), Some(&MatchResult::new(6, 2)));
    }

    #[test]
    fn test_week_out_of_range() {
        let mut planner = planner();

        assert_eq!(
            planner.set_availability(Week::new(20), p("A"), Status::Available),
            Err(Error::WeekOutOfRange(Week::new(20)))
        );
        assert_eq!(
            planner.create_teams(Week::new(0)),
            Err(Error::WeekOutOfRange(Week::new(0)))
        );
        assert_eq!(
            planner.record_result(Week::new(20), "1", "0"),
            Err(Error::WeekOutOfRange(Week::new(20)))
        );
        assert!(planner.availability().status(Week::new(20), &p("A")) == Status::Unavailable);
    }

    #[test]
    fn test_cycle_availability() {
        let mut planner = planner();

        assert_eq!(
            planner.cycle_availability(Week::FIRST, &p("A")),
            Ok(Status::Tentative)
        );
        assert_eq!(
            planner.cycle_availability(Week::FIRST, &p("A")),
            Ok(Status::Available)
        );
        assert_eq!(planner.eligible_players(Week::FIRST), players(&["A"]));
    }

    #[test]
    fn test_add_guest_errors() {
        let mut planner = planner();

        assert_eq!(
            planner.add_guest("A"),
            Err(Error::Guest(guests::Error::Registered))
        );
        assert_eq!(planner.add_guest(" "), Err(Error::Guest(guests::Error::Empty)));
        assert!(planner.add_guest("Sanne").is_ok());
        assert!(planner.remove_guest(&p("Sanne")));
        planner.add_guest("Joost").unwrap();
        planner.clear_guests();
        assert!(planner.guests().is_empty());
    }

    #[test]
    fn test_record_invalid_result_stores_nothing() {
        let mut planner = planner_with_match();

        assert_eq!(
            planner.record_result(Week::FIRST, "3", "-1"),
            Err(Error::InvalidScore(ScoreError::Negative))
        );
        assert_eq!(
            planner.record_result(Week::FIRST, "", "2"),
            Err(Error::InvalidScore(ScoreError::Missing))
        );
        assert!(planner.result(Week::FIRST).is_none());
    }

    #[test]
    fn test_record_result_overwrites_and_ends_editing() {
        let mut planner = planner_with_match();
        planner.record_result(Week::FIRST, "6", "3").unwrap();

        let draft = planner.start_editing_result(Week::FIRST).unwrap();
        assert_eq!(draft, ResultDraft::from(&MatchResult::new(6, 3)));
        assert_eq!(planner.editing(), Some(Week::FIRST));

        planner.record_result(Week::FIRST, "4", "6").unwrap();
        assert_eq!(planner.editing(), None);
        assert_eq!(planner.result(Week::FIRST), Some(&MatchResult::new(4, 6)));
    }

    #[test]
    fn test_editing_without_result_starts_blank() {
        let mut planner = planner();

        assert_eq!(
            planner.start_editing_result(Week::new(2)),
            Ok(ResultDraft::default())
        );
        planner.cancel_editing_result();
        assert_eq!(planner.editing(), None);
    }

    #[test]
    fn test_result_without_match_is_kept() {
        let mut planner = planner();

        assert!(planner.record_result(Week::new(3), "6", "0").is_ok());
        assert_eq!(planner.history().len(), 1);
        assert_eq!(planner.win_count(&p("A")), 0);
    }

    #[test]
    fn test_move_player_clears_result() {
        let mut planner = planner_with_lineup(&["A", "C"], &["B"]);
        planner.record_result(Week::FIRST, "6", "2").unwrap();

        assert_eq!(
            planner.move_player(Week::FIRST, &p("B"), Side::Team2, Side::Team1),
            Ok(false)
        );
        assert_eq!(
            planner.move_player(Week::FIRST, &p("A"), Side::Team2, Side::Team1),
            Ok(false)
        );
        assert!(planner.result(Week::FIRST).is_some());

        assert_eq!(
            planner.move_player(Week::FIRST, &p("A"), Side::Team1, Side::Team2),
            Ok(true)
        );
        assert_eq!(
            planner.match_for(Week::FIRST).unwrap().team(Side::Team2),
            players(&["B", "A"]).as_slice()
        );
        assert!(planner.result(Week::FIRST).is_none());
    }

    #[test]
    fn test_move_player_round_trip() {
        let mut planner = planner_with_lineup(&["A", "C"], &["B"]);
        let before = planner.match_for(Week::FIRST).unwrap().clone();

        assert_eq!(
            planner.move_player(Week::FIRST, &p("A"), Side::Team1, Side::Team2),
            Ok(true)
        );
        assert_eq!(
            planner.move_player(Week::FIRST, &p("A"), Side::Team2, Side::Team1),
            Ok(true)
        );
        assert!(planner.match_for(Week::FIRST).unwrap().same_lineup(&before));
    }

    #[test]
    fn test_swap_players_clears_result() {
        let mut planner = planner_with_match();
        planner.record_result(Week::FIRST, "6", "2").unwrap();

        assert_eq!(
            planner.swap_players(Week::FIRST, &p("A"), Side::Team1, &p("C"), Side::Team1),
            Ok(false)
        );
        assert!(planner.result(Week::FIRST).is_some());

        assert_eq!(
            planner.swap_players(Week::FIRST, &p("A"), Side::Team1, &p("D"), Side::Team2),
            Ok(true)
        );
        let teams = planner.match_for(Week::FIRST).unwrap();
        assert_eq!(teams.side_of(&p("A")), Some(Side::Team2));
        assert_eq!(teams.side_of(&p("D")), Some(Side::Team1));
        assert!(planner.result(Week::FIRST).is_none());
    }

    #[test]
    fn test_change_player_duplicate() {
        let mut planner = planner_with_match();
        planner.record_result(Week::FIRST, "6", "2").unwrap();
        let before = planner.match_for(Week::FIRST).unwrap().clone();

        assert_eq!(
            planner.change_player(Week::FIRST, Side::Team2, 0, p("A")),
            Err(Error::DuplicatePlayer(p("A")))
        );
        assert_eq!(
            planner.change_player(Week::FIRST, Side::Team2, 2, p("E")),
            Err(Error::NoSlot(Side::Team2, 2))
        );
        assert_eq!(planner.match_for(Week::FIRST), Some(&before));
        assert!(planner.result(Week::FIRST).is_some());

        assert!(
            planner
                .change_player(Week::FIRST, Side::Team2, 0, p("E"))
                .is_ok()
        );
        assert_eq!(
            planner.match_for(Week::FIRST).unwrap().team(Side::Team2),
            players(&["E", "D"]).as_slice()
        );
        assert!(planner.result(Week::FIRST).is_none());
    }

    #[test]
    fn test_edits_need_a_match() {
        let mut planner = planner();
        let week = Week::new(2);

        assert_eq!(
            planner.move_player(week, &p("A"), Side::Team1, Side::Team2),
            Err(Error::NoMatch(week))
        );
        assert_eq!(
            planner.swap_players(week, &p("A"), Side::Team1, &p("B"), Side::Team2),
            Err(Error::NoMatch(week))
        );
        assert_eq!(
            planner.change_player(week, Side::Team1, 0, p("A")),
            Err(Error::NoMatch(week))
        );
    }

    #[test]
    fn test_stats_views() {
        let mut planner = planner();
        let everyone = ["A", "B", "C", "D", "E", "F"];
        for number in 1..=2 {
            make_available(&mut planner, Week::new(number), &everyone);
            planner.create_teams(Week::new(number)).unwrap();
        }
        planner.record_result(Week::new(1), "6", "4").unwrap();
        planner.record_result(Week::new(2), "3", "3").unwrap();

        assert_eq!(
            planner.player_stats(&p("A")),
            PlayerStats {
                played: 2,
                won: 1,
                drawn: 1,
                lost: 0,
            }
        );
        let leaders = planner
            .standings()
            .into_iter()
            .take(2)
            .map(|standing| standing.player)
            .collect_vec();
        assert_eq!(leaders, players(&["A", "C"]));
        assert_eq!(
            planner
                .history()
                .iter()
                .map(|played| played.week)
                .collect_vec(),
            vec![Week::new(2), Week::new(1)]
        );
    }

    #[test]
    fn test_save_and_load() {
        let mut planner = planner_with_match();
        planner.record_result(Week::FIRST, "6", "2").unwrap();
        planner.add_guest("Sanne").unwrap();
        let mut store = MemoryStore::default();

        planner.save(&mut store).unwrap();
        let loaded = Planner::load(planner.config().clone(), &store).unwrap();

        assert_eq!(loaded.availability(), planner.availability());
        assert_eq!(loaded.matches(), planner.matches());
        assert_eq!(loaded.results(), planner.results());
        assert!(loaded.guests().is_empty());
    }

    #[test]
    fn test_load_missing_and_sparse_records() {
        let store = MemoryStore::with_documents([(
            Record::Matches,
            r#"[null, {"team1": ["A", "C"], "team2": ["B", "D"]}]"#,
        )]);

        let loaded = Planner::load(planner().config().clone(), &store).unwrap();

        assert!(loaded.results().is_empty());
        assert_eq!(loaded.play_count(&p("C")), 1);
        assert_eq!(
            loaded.match_for(Week::FIRST).unwrap().team(Side::Team2),
            players(&["B", "D"]).as_slice()
        );
    }

    #[test]
    fn test_load_rejects_bad_record() {
        let store = MemoryStore::with_documents([(Record::Results, r#"{"1": "six"}"#)]);

        assert!(Planner::load(Config::default(), &store).is_err());
    }

    #[test]
    fn test_load_rejects_impossible_lineup() {
        let store = MemoryStore::with_documents([(
            Record::Matches,
            r#"{"1": {"team1": ["A", "B", "C"], "team2": ["A"]}}"#,
        )]);

        assert!(Planner::load(Config::default(), &store).is_err());
    }

    #[test]
    fn test_snapshot_skips_idle_edit_state() {
        let mut planner = planner();
        let snapshot = serde_json::to_value(&planner).unwrap();
        assert!(snapshot.get("editing").is_none());
        assert_eq!(snapshot["config"]["totalWeeks"], 19);

        planner.start_editing_result(Week::new(4)).unwrap();
        let snapshot = serde_json::to_value(&planner).unwrap();
        assert_eq!(snapshot["editing"], 4);
    }

    #[test]
    fn test_current_week() {
        let planner = planner();

        assert_eq!(
            planner.current_week(NaiveDate::from_ymd_opt(2025, 5, 22).unwrap()),
            Week::new(2)
        );
        assert!(planner.calendar().contains(planner.this_week()));
    }
}
