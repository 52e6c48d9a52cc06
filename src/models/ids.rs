//! Opaque identifiers for matches and players.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::MatchError;

/// Unique identifier for a match. Generated once at creation, never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Generate a fresh random match id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a match id from its canonical UUID string form.
    pub fn parse(s: &str) -> Result<Self, MatchError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MatchError::InvalidMatchId("match id cannot be empty".into()));
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| MatchError::InvalidMatchId(format!("not a valid UUID: {trimmed}")))
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl FromStr for MatchId {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Unique identifier for a player within a match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Generate a fresh random player id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a player id from its canonical UUID string form.
    pub fn parse(s: &str) -> Result<Self, MatchError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MatchError::InvalidPlayerId("player id cannot be empty".into()));
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| MatchError::InvalidPlayerId(format!("not a valid UUID: {trimmed}")))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
