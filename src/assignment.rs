//! Fair team assignment
//!
//! Picks the four eligible players who have played the least and splits
//! them into two pairs. Selection is deterministic: ties on play count keep
//! eligibility order (roster order, then guests in the order they were
//! added), so identical history always yields identical teams.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::{
    availability::AvailabilityRecord,
    constants::matches::PLAYERS_PER_MATCH,
    guests::GuestPool,
    matches::Match,
    player::Player,
    week::Week,
};

/// Not enough eligible players to fill a match
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[error("not enough players available ({available}/{PLAYERS_PER_MATCH})")]
pub struct InsufficientPlayers {
    /// Number of eligible players found
    pub available: usize,
}

/// Lists every player who may be picked for a week
///
/// These are the roster members marked available for `week`, in roster
/// order, followed by every guest in the pool.
pub fn compute_eligible_players(
    availability: &AvailabilityRecord,
    week: Week,
    roster: &[Player],
    guests: &GuestPool,
) -> Vec<Player> {
    availability
        .available_players(week, roster)
        .into_iter()
        .chain(guests.guests())
        .cloned()
        .collect_vec()
}

/// Counts how often each candidate has played
///
/// Every candidate starts at zero and gains one for each match in
/// `history` in which they appear on either team. Players in the history
/// who are not candidates are ignored.
///
/// # Arguments
///
/// * `history` - Every recorded match, across all weeks
/// * `candidates` - The players to count for
pub fn compute_match_counts<'a, I>(history: I, candidates: &[Player]) -> HashMap<Player, usize>
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut counts: HashMap<Player, usize> = candidates
        .iter()
        .map(|player| (player.clone(), 0))
        .collect();

    for player in history.into_iter().flat_map(|m| m.players()) {
        if let Some(count) = counts.get_mut(player) {
            *count += 1;
        }
    }

    counts
}

/// Creates a match from the least-played eligible players
///
/// Eligible players are stably sorted by ascending play count and the first
/// four `[p0, p1, p2, p3]` are paired as `team1 = [p0, p2]` and
/// `team2 = [p1, p3]`. Players missing from `match_counts` count as never
/// having played.
///
/// # Errors
///
/// Returns [`InsufficientPlayers`] when fewer than four players are eligible.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use padel::{assignment::assign_teams, matches::Side, player::Player};
///
/// let eligible: Vec<Player> = ["A", "B", "C", "D"].into_iter().map(Player::from).collect();
/// let teams = assign_teams(&eligible, &HashMap::new()).unwrap();
///
/// assert_eq!(teams.team(Side::Team1), &[Player::from("A"), Player::from("C")]);
/// assert_eq!(teams.team(Side::Team2), &[Player::from("B"), Player::from("D")]);
/// ```
pub fn assign_teams(
    eligible: &[Player],
    match_counts: &HashMap<Player, usize>,
) -> Result<Match, InsufficientPlayers> {
    if eligible.len() < PLAYERS_PER_MATCH {
        return Err(InsufficientPlayers {
            available: eligible.len(),
        });
    }

    let (p0, p1, p2, p3) = eligible
        .iter()
        .sorted_by_key(|player| match_counts.get(*player).copied().unwrap_or_default())
        .cloned()
        .take(PLAYERS_PER_MATCH)
        .collect_tuple()
        .ok_or(InsufficientPlayers {
            available: eligible.len(),
        })?;

    Match::new(vec![p0, p2], vec![p1, p3]).ok_or(InsufficientPlayers {
        available: eligible.iter().unique().count(),
    })
}
