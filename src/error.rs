//! Domain error taxonomy.
//!
//! Caller-correctable failures (validation, not-found, invalid state) are
//! returned as typed errors from the service boundary. Invariant breaches
//! inside the scoring engine (scoring a completed game, no current set in a
//! live match) are programming errors and panic instead.

use thiserror::Error;

use crate::models::{MatchId, MatchStatus, PlayerId};

/// Errors surfaced by match operations.
#[derive(Debug, Clone, Error)]
pub enum MatchError {
    #[error("invalid player name: {0}")]
    InvalidPlayerName(String),

    #[error("both players cannot be named \"{0}\"")]
    DuplicatePlayer(String),

    #[error("invalid match id: {0}")]
    InvalidMatchId(String),

    #[error("invalid player id: {0}")]
    InvalidPlayerId(String),

    #[error("unknown match status filter: {0}")]
    UnknownStatusFilter(String),

    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("player {player_id} is not part of match {match_id}")]
    PlayerNotFound {
        match_id: MatchId,
        player_id: PlayerId,
    },

    #[error("match {id} is already {status}")]
    MatchFinished { id: MatchId, status: MatchStatus },
}

impl MatchError {
    /// Whether this error is a caller-side input problem (as opposed to a
    /// missing resource or a state conflict).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MatchError::InvalidPlayerName(_)
                | MatchError::DuplicatePlayer(_)
                | MatchError::InvalidMatchId(_)
                | MatchError::InvalidPlayerId(_)
                | MatchError::UnknownStatusFilter(_)
        )
    }
}
