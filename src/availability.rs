//! Weekly player availability
//!
//! Players mark themselves unavailable, tentative or available per week.
//! Only `Available` makes a registered player eligible for team creation.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{
    player::Player,
    week::{Week, Weekly},
};

/// A player's availability for a single week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// Cannot play (also the status of any player without an entry)
    #[default]
    Unavailable = 0,
    /// Might be able to play
    Tentative = 1,
    /// Can play
    Available = 2,
}

/// A stored availability code outside the known statuses
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown availability code {0}")]
pub struct UnknownStatus(pub u64);

impl Status {
    /// The status that follows this one when a player taps their cell
    ///
    /// Cycles unavailable → tentative → available → unavailable.
    pub fn cycle(self) -> Self {
        match self {
            Self::Unavailable => Self::Tentative,
            Self::Tentative => Self::Available,
            Self::Available => Self::Unavailable,
        }
    }

    /// Whether this status makes a player eligible
    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

impl TryFrom<u64> for Status {
    type Error = UnknownStatus;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Unavailable),
            1 => Ok(Self::Tentative),
            2 => Ok(Self::Available),
            other => Err(UnknownStatus(other)),
        }
    }
}

impl From<bool> for Status {
    /// Older records stored a plain checkbox per player
    fn from(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

/// Wire shapes accepted for a [`Status`]
#[derive(Deserialize)]
#[serde(untagged)]
enum StatusSerde {
    Code(u64),
    Flag(bool),
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Status, D::Error>
    where
        D: Deserializer<'de>,
    {
        match StatusSerde::deserialize(deserializer)? {
            StatusSerde::Code(code) => Status::try_from(code).map_err(serde::de::Error::custom),
            StatusSerde::Flag(flag) => Ok(flag.into()),
        }
    }
}

/// Availability of every player for every week
///
/// Missing weeks and missing players read as [`Status::Unavailable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityRecord(Weekly<HashMap<Player, Status>>);

impl AvailabilityRecord {
    /// Gets a player's status for a week
    pub fn status(&self, week: Week, player: &Player) -> Status {
        self.0
            .get(week)
            .and_then(|statuses| statuses.get(player))
            .copied()
            .unwrap_or_default()
    }

    /// Sets a player's status for a week
    pub fn set(&mut self, week: Week, player: Player, status: Status) {
        log::debug!("week {week}: {player} is now {status:?}");
        self.0.entry(week).or_default().insert(player, status);
    }

    /// Advances a player's status for a week to the next one in the cycle
    ///
    /// # Returns
    ///
    /// The newly stored status
    pub fn cycle(&mut self, week: Week, player: &Player) -> Status {
        let next = self.status(week, player).cycle();
        self.set(week, player.clone(), next);
        next
    }

    /// Whether a player is available for a week
    pub fn is_available(&self, week: Week, player: &Player) -> bool {
        self.status(week, player).is_available()
    }

    /// Lists the roster members available for a week, in roster order
    pub fn available_players<'a>(&self, week: Week, roster: &'a [Player]) -> Vec<&'a Player> {
        roster
            .iter()
            .filter(|player| self.is_available(week, player))
            .collect()
    }
}
