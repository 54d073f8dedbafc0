//! Match results and score entry
//!
//! Scores arrive as raw text from the result form and are only stored once
//! both parse as non-negative integers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matches::Side;

/// The final score of a week's match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Games won by team 1
    pub team1_score: u32,
    /// Games won by team 2
    pub team2_score: u32,
}

/// Who won a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One side scored more
    Won(Side),
    /// Both sides scored the same
    Tie,
}

impl MatchResult {
    /// Creates a result from two scores
    pub fn new(team1_score: u32, team2_score: u32) -> Self {
        Self {
            team1_score,
            team2_score,
        }
    }

    /// Parses a result from the raw text of the score form
    ///
    /// # Errors
    ///
    /// Returns the first [`ScoreError`] found, checking team 1 before team 2.
    pub fn parse(team1_score: &str, team2_score: &str) -> Result<Self, ScoreError> {
        Ok(Self::new(parse_score(team1_score)?, parse_score(team2_score)?))
    }

    /// Determines the winner
    pub fn outcome(&self) -> Outcome {
        match self.team1_score.cmp(&self.team2_score) {
            std::cmp::Ordering::Greater => Outcome::Won(Side::Team1),
            std::cmp::Ordering::Less => Outcome::Won(Side::Team2),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// The winning side, if any
    pub fn winner(&self) -> Option<Side> {
        match self.outcome() {
            Outcome::Won(side) => Some(side),
            Outcome::Tie => None,
        }
    }
}

/// Errors that can occur when parsing a score
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// No score was entered
    #[error("both scores must be filled in")]
    Missing,
    /// The score is not a whole number
    #[error("score must be a whole number")]
    NotNumeric,
    /// The score is below zero
    #[error("scores cannot be negative")]
    Negative,
}

/// Parses one score from form input
///
/// # Errors
///
/// * `ScoreError::Missing` - The input is empty after trimming whitespace
/// * `ScoreError::Negative` - The input is a negative whole number
/// * `ScoreError::NotNumeric` - The input is anything else that is not a non-negative whole number
pub fn parse_score(input: &str) -> Result<u32, ScoreError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScoreError::Missing);
    }
    match input.parse::<i64>() {
        Ok(score) if score < 0 => Err(ScoreError::Negative),
        Ok(score) => u32::try_from(score).map_err(|_| ScoreError::NotNumeric),
        Err(_) => Err(ScoreError::NotNumeric),
    }
}

/// Raw text of the score form while a result is being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDraft {
    /// Text entered for team 1
    pub team1_score: String,
    /// Text entered for team 2
    pub team2_score: String,
}

impl From<&MatchResult> for ResultDraft {
    fn from(result: &MatchResult) -> Self {
        Self {
            team1_score: result.team1_score.to_string(),
            team2_score: result.team2_score.to_string(),
        }
    }
}
