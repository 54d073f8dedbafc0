//! Play and win statistics
//!
//! Statistics are always derived from the full match and result history;
//! nothing is maintained incrementally. A result whose week has no match
//! contributes nothing, and a tied result credits no one.

use itertools::Itertools;
use serde::Serialize;

use crate::{
    matches::Match,
    player::Player,
    results::{MatchResult, Outcome},
    week::{Week, Weekly},
};

/// Counts the matches a player appeared in, across all weeks
pub fn get_play_count(player: &Player, matches: &Weekly<Match>) -> usize {
    matches.values().filter(|m| m.contains(player)).count()
}

/// Counts the matches a player won
///
/// Only weeks with both a match and a result are considered. The player is
/// credited when their side scored strictly more than the other.
pub fn get_win_count(
    player: &Player,
    matches: &Weekly<Match>,
    results: &Weekly<MatchResult>,
) -> usize {
    decided(matches, results)
        .filter(|(m, result)| {
            result
                .winner()
                .is_some_and(|side| m.team(side).contains(player))
        })
        .count()
}

/// Pairs every result with the match played that week
fn decided<'a>(
    matches: &'a Weekly<Match>,
    results: &'a Weekly<MatchResult>,
) -> impl Iterator<Item = (&'a Match, &'a MatchResult)> {
    results
        .iter()
        .filter_map(|(week, result)| Some((matches.get(*week)?, result)))
}

/// A player's record over the season
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    /// Matches the player was lined up for
    pub played: usize,
    /// Matches won
    pub won: usize,
    /// Matches that ended in a tie
    pub drawn: usize,
    /// Matches lost
    pub lost: usize,
}

impl PlayerStats {
    /// Computes a player's record from history
    pub fn compute(
        player: &Player,
        matches: &Weekly<Match>,
        results: &Weekly<MatchResult>,
    ) -> Self {
        let mut stats = Self {
            played: get_play_count(player, matches),
            ..Self::default()
        };

        for (m, result) in decided(matches, results) {
            let Some(side) = m.side_of(player) else {
                continue;
            };
            match result.outcome() {
                Outcome::Won(winner) if winner == side => stats.won += 1,
                Outcome::Won(_) => stats.lost += 1,
                Outcome::Tie => stats.drawn += 1,
            }
        }

        stats
    }

    /// Share of played matches won, as a whole percentage
    ///
    /// Rounded half away from zero; zero when nothing was played.
    pub fn win_percentage(&self) -> u32 {
        if self.played == 0 {
            return 0;
        }
        ((self.won as f64 / self.played as f64) * 100.0).round() as u32
    }
}

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// The player
    pub player: Player,
    /// Their record
    pub stats: PlayerStats,
}

/// Ranks players by matches won, most wins first
///
/// Players with equal wins keep the order they were given in.
pub fn standings<'a, I>(
    players: I,
    matches: &Weekly<Match>,
    results: &Weekly<MatchResult>,
) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a Player>,
{
    players
        .into_iter()
        .map(|player| Standing {
            player: player.clone(),
            stats: PlayerStats::compute(player, matches, results),
        })
        .sorted_by_key(|standing| std::cmp::Reverse(standing.stats.won))
        .collect_vec()
}

/// A played week as shown in the match history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedMatch {
    /// The week it was played
    pub week: Week,
    /// The lineups, empty when the match record is missing
    pub teams: Match,
    /// The final score
    pub result: MatchResult,
}

/// Lists every week with a result, most recent first
pub fn history(matches: &Weekly<Match>, results: &Weekly<MatchResult>) -> Vec<CompletedMatch> {
    results
        .iter()
        .rev()
        .map(|(week, result)| CompletedMatch {
            week: *week,
            teams: matches.get(*week).cloned().unwrap_or_default(),
            result: *result,
        })
        .collect_vec()
}
