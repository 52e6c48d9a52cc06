//! Player identity and per-match counters.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PlayerId;
use crate::error::MatchError;

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 50;

/// A validated player display name.
///
/// Trimmed on construction; 2-50 characters; letters, digits, spaces, hyphens
/// and dots only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Validate and construct a player name.
    pub fn parse(raw: &str) -> Result<Self, MatchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MatchError::InvalidPlayerName(
                "player name cannot be empty".into(),
            ));
        }
        if trimmed.chars().count() < MIN_NAME_LEN {
            return Err(MatchError::InvalidPlayerName(format!(
                "player name must be at least {MIN_NAME_LEN} characters"
            )));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(MatchError::InvalidPlayerName(format!(
                "player name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        let valid = trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '.');
        if !valid {
            return Err(MatchError::InvalidPlayerName(
                "only letters, digits, spaces, hyphens and dots are allowed".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison, used to reject duplicate players.
    pub fn eq_ignore_case(&self, other: &PlayerName) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PlayerName::parse(&value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> String {
        name.0
    }
}

/// A player in a match: identity plus running counters.
///
/// `games_won` covers the current set only and resets when a new set starts;
/// `sets_won` and `points_won` persist for the match's lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    id: PlayerId,
    name: PlayerName,
    sets_won: u32,
    games_won: u32,
    points_won: u32,
}

impl Player {
    /// Create a player with a fresh id and zeroed counters.
    pub fn new(name: PlayerName) -> Self {
        Self {
            id: PlayerId::generate(),
            name,
            sets_won: 0,
            games_won: 0,
            points_won: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn sets_won(&self) -> u32 {
        self.sets_won
    }

    pub fn games_won(&self) -> u32 {
        self.games_won
    }

    pub fn points_won(&self) -> u32 {
        self.points_won
    }

    pub(crate) fn record_set_won(&mut self) {
        self.sets_won += 1;
    }

    pub(crate) fn record_game_won(&mut self) {
        self.games_won += 1;
    }

    pub(crate) fn record_point_won(&mut self) {
        self.points_won += 1;
    }

    /// Reset the per-set games counter at the start of a new set.
    pub(crate) fn reset_games_won(&mut self) {
        self.games_won = 0;
    }
}
