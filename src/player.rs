//! Player identifiers
//!
//! Players are identified by their name. Registered players come from the
//! configured roster; guests are added ad hoc for a single assignment run.

use std::{borrow::Borrow, fmt::Display};

use serde::{Deserialize, Serialize};

/// A player identifier, unique within a roster
///
/// Identifiers are compared exactly, whitespace included, so roster entries
/// such as `"Robert "` and `"Robert E"` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Player(String);

impl Player {
    /// Creates a player identifier from a name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the player's name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether the identifier holds nothing but whitespace
    ///
    /// Stored lineups sometimes contain an empty string for an unfilled
    /// slot; such entries are not players.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Player {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Player {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Player {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Player {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Player {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Whether a player belongs to the roster or was added as a guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    /// Member of the fixed roster
    Registered,
    /// Transient player from the guest pool
    Guest,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_player_keeps_whitespace() {
        let robert = Player::from("Robert ");
        let robert_e = Player::from("Robert E");

        assert_ne!(robert, robert_e);
        assert_eq!(robert.name(), "Robert ");
        assert_eq!(robert.to_string(), "Robert ");
    }

    #[test]
    fn test_player_blank() {
        assert!(Player::from("").is_blank());
        assert!(Player::from("  ").is_blank());
        assert!(!Player::from("Erik").is_blank());
    }

    #[test]
    fn test_player_serializes_as_string() {
        let player = Player::from("Benno");
        assert_eq!(serde_json::to_string(&player).unwrap(), "\"Benno\"");

        let parsed: Player = serde_json::from_str("\"Wouter\"").unwrap();
        assert_eq!(parsed, "Wouter");
    }

    #[test]
    fn test_player_map_lookup_by_str() {
        let mut counts = HashMap::new();
        counts.insert(Player::from("Bob"), 3);

        assert_eq!(counts.get("Bob"), Some(&3));
        assert_eq!(counts.get("Erik"), None);
    }
}
