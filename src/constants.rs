//! Configuration constants for the planner
//!
//! This module contains the fixed limits used throughout the planner to
//! keep matches, rosters and seasons within the shape a 2v2 club expects.

/// Match shape constants
pub mod matches {
    /// Maximum number of players on one side of a match
    pub const TEAM_SIZE: usize = 2;
    /// Number of players needed to create a match
    pub const PLAYERS_PER_MATCH: usize = 2 * TEAM_SIZE;
}

/// Player name constants
pub mod names {
    /// Maximum length of a player or guest name in characters
    pub const MAX_LENGTH: usize = 30;
}

/// Roster configuration constants
pub mod roster {
    /// Maximum number of registered players in a roster
    pub const MAX_SIZE: usize = 64;
}

/// Season configuration constants
pub mod season {
    /// Maximum number of weeks in one season
    pub const MAX_TOTAL_WEEKS: u32 = 104;
    /// Number of days between two consecutive weeks
    pub const DAYS_PER_WEEK: u64 = 7;
}
