//! Guest player management and validation
//!
//! Guests are ad hoc players who fill up a week when too few registered
//! players are available. The pool keeps them in the order they were added
//! and is emptied once teams have been created.

use std::collections::HashSet;

use rustrict::CensorStr;
use serde::Serialize;
use thiserror::Error;

use crate::{constants, player::Player};

/// Errors that can occur when adding a guest
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The guest is already in the pool
    #[error("guest already added")]
    Used,
    /// The name belongs to a registered player
    #[error("name belongs to a registered player")]
    Registered,
    /// The name is empty or contains only whitespace
    #[error("name cannot be empty")]
    Empty,
    /// The name contains inappropriate content
    #[error("name is inappropriate")]
    Sinful,
    /// The name exceeds the maximum allowed length
    #[error("name is too long")]
    TooLong,
}

/// The transient pool of guest players
///
/// Serializes as the ordered guest list for planner snapshots; the pool is
/// never stored, so it has no deserialized form.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GuestPool {
    /// Guests in the order they were added
    guests: Vec<Player>,

    /// Set of guests for quick uniqueness checks (not serialized)
    #[serde(skip)]
    existing: HashSet<Player>,
}

impl GuestPool {
    /// Adds a guest after validation
    ///
    /// The name is trimmed of surrounding whitespace before any check.
    ///
    /// # Arguments
    ///
    /// * `name` - The requested guest name
    /// * `roster` - The registered players, whose names guests may not take
    ///
    /// # Returns
    ///
    /// The added guest on success
    ///
    /// # Errors
    ///
    /// * `Error::TooLong` - Name exceeds 30 characters
    /// * `Error::Empty` - Name is empty after trimming whitespace
    /// * `Error::Sinful` - Name contains inappropriate content
    /// * `Error::Registered` - Name belongs to a roster member
    /// * `Error::Used` - Guest is already in the pool
    pub fn add(&mut self, name: &str, roster: &[Player]) -> Result<Player, Error> {
        let name = rustrict::trim_whitespace(name);
        if name.chars().count() > constants::names::MAX_LENGTH {
            return Err(Error::TooLong);
        }
        if name.is_empty() {
            return Err(Error::Empty);
        }
        if name.is_inappropriate() {
            return Err(Error::Sinful);
        }
        if roster.iter().any(|player| player.name().trim() == name) {
            return Err(Error::Registered);
        }
        let guest = Player::from(name);
        if !self.existing.insert(guest.clone()) {
            return Err(Error::Used);
        }
        log::debug!("guest {guest} added");
        self.guests.push(guest.clone());
        Ok(guest)
    }

    /// Removes a guest from the pool
    ///
    /// # Returns
    ///
    /// `true` if the guest was in the pool
    pub fn remove(&mut self, guest: &Player) -> bool {
        if self.existing.remove(guest) {
            self.guests.retain(|g| g != guest);
            true
        } else {
            false
        }
    }

    /// Empties the pool
    pub fn clear(&mut self) {
        self.guests.clear();
        self.existing.clear();
    }

    /// Whether a player is a guest in the pool
    pub fn contains(&self, player: &Player) -> bool {
        self.existing.contains(player)
    }

    /// The guests in the order they were added
    pub fn guests(&self) -> &[Player] {
        &self.guests
    }

    /// Number of guests in the pool
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}
