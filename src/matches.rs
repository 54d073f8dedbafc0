//! Weekly 2v2 matches and lineup edits
//!
//! A match holds the two teams playing in a given week. Lineups can be
//! edited after creation by moving, swapping or replacing players; every edit
//! keeps both teams at no more than two players and never lets a player
//! appear twice.

use serde::{Deserialize, Serialize};

use crate::{constants::matches::TEAM_SIZE, player::Player};

/// One of the two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The first team
    #[serde(rename = "team1")]
    Team1,
    /// The second team
    #[serde(rename = "team2")]
    Team2,
}

impl Side {
    /// The opposing side
    pub fn other(self) -> Self {
        match self {
            Self::Team1 => Self::Team2,
            Self::Team2 => Self::Team1,
        }
    }
}

/// Serialization helper for Match struct
#[derive(Deserialize)]
struct MatchSerde {
    #[serde(default)]
    team1: Vec<Option<Player>>,
    #[serde(default)]
    team2: Vec<Option<Player>>,
}

/// The two teams playing in one week
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatchSerde")]
pub struct Match {
    team1: Vec<Player>,
    team2: Vec<Player>,
}

impl TryFrom<MatchSerde> for Match {
    type Error = InvalidLineup;

    /// Drops unfilled slots (`null` or blank names) from stored lineups,
    /// then rejects lineups that break the team size or list a player twice
    fn try_from(serde: MatchSerde) -> Result<Self, Self::Error> {
        let filled = |team: Vec<Option<Player>>| -> Vec<Player> {
            team.into_iter()
                .flatten()
                .filter(|player| !player.is_blank())
                .collect()
        };
        Self::new(filled(serde.team1), filled(serde.team2)).ok_or(InvalidLineup)
    }
}

/// A stored lineup with an oversized team or a player listed twice
#[derive(thiserror::Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[error("teams hold at most {TEAM_SIZE} players and no player may appear twice")]
pub struct InvalidLineup;

impl Match {
    /// Creates a match from two lineups
    ///
    /// # Returns
    ///
    /// `None` if a team has more than two players or a player appears twice
    pub fn new(team1: Vec<Player>, team2: Vec<Player>) -> Option<Self> {
        let candidate = Self { team1, team2 };
        candidate.is_valid().then_some(candidate)
    }

    /// Whether both teams are within size and no player appears twice
    pub fn is_valid(&self) -> bool {
        let players = self.players().collect::<Vec<_>>();
        self.team1.len() <= TEAM_SIZE
            && self.team2.len() <= TEAM_SIZE
            && players
                .iter()
                .enumerate()
                .all(|(i, player)| !players[..i].contains(player))
    }

    /// Gets the lineup of one side
    pub fn team(&self, side: Side) -> &[Player] {
        match side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut Vec<Player> {
        match side {
            Side::Team1 => &mut self.team1,
            Side::Team2 => &mut self.team2,
        }
    }

    /// Iterates over every player in the match, team 1 first
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team1.iter().chain(self.team2.iter())
    }

    /// Whether a player is in either team
    pub fn contains(&self, player: &Player) -> bool {
        self.side_of(player).is_some()
    }

    /// Finds the side a player is on
    pub fn side_of(&self, player: &Player) -> Option<Side> {
        if self.team1.contains(player) {
            Some(Side::Team1)
        } else if self.team2.contains(player) {
            Some(Side::Team2)
        } else {
            None
        }
    }

    /// Whether two matches field the same players on the same sides
    ///
    /// Unlike `==` this ignores the order of players within a team.
    pub fn same_lineup(&self, other: &Match) -> bool {
        let same = |a: &[Player], b: &[Player]| {
            a.len() == b.len() && a.iter().all(|player| b.contains(player))
        };
        same(&self.team1, &other.team1) && same(&self.team2, &other.team2)
    }

    /// Moves a player from one team to the other
    ///
    /// The move is rejected, leaving the match untouched, when the player is
    /// not in `from`, when `from` and `to` are the same side, or when `to`
    /// already has two players.
    ///
    /// # Returns
    ///
    /// `true` if the lineup changed
    pub fn move_player(&mut self, player: &Player, from: Side, to: Side) -> bool {
        if from == to || !self.team(from).contains(player) || self.team(to).len() >= TEAM_SIZE {
            return false;
        }
        self.team_mut(from).retain(|p| p != player);
        self.team_mut(to).push(player.clone());
        true
    }

    /// Swaps two players between the teams
    ///
    /// Both players are removed from their teams, then `a` joins the side
    /// opposite `side_a` and `b` joins the side opposite `side_b`. Swapping
    /// two players from the same side, or players who are not on the sides
    /// given, is rejected and leaves the match untouched.
    ///
    /// # Returns
    ///
    /// `true` if the lineup changed
    pub fn swap_players(&mut self, a: &Player, side_a: Side, b: &Player, side_b: Side) -> bool {
        if a == b
            || side_a == side_b
            || !self.team(side_a).contains(a)
            || !self.team(side_b).contains(b)
        {
            return false;
        }
        for side in [Side::Team1, Side::Team2] {
            self.team_mut(side).retain(|p| p != a && p != b);
        }
        self.team_mut(side_a.other()).push(a.clone());
        self.team_mut(side_b.other()).push(b.clone());
        true
    }

    /// Puts a player into a specific slot of a team
    ///
    /// A `slot` within the lineup replaces the player there; a `slot` equal
    /// to the lineup length fills the next free place.
    ///
    /// # Errors
    ///
    /// * `Error::Duplicate` - The player is already in either team
    /// * `Error::NoSlot` - The slot is past the next free place or beyond team size
    pub fn change_player(&mut self, side: Side, slot: usize, player: Player) -> Result<(), Error> {
        if self.contains(&player) {
            return Err(Error::Duplicate);
        }
        let team = self.team_mut(side);
        if slot >= TEAM_SIZE || slot > team.len() {
            return Err(Error::NoSlot);
        }
        match team.get_mut(slot) {
            Some(occupant) => *occupant = player,
            None => team.push(player),
        }
        Ok(())
    }
}

/// Errors that can occur when editing a lineup directly
#[derive(thiserror::Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The player is already in one of the teams
    #[error("player is already in the match")]
    Duplicate,
    /// The slot does not exist in the team
    #[error("no such slot in the team")]
    NoSlot,
}
