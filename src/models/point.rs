//! Point-level scoring values for a regular game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides of the court. The scoring engine indexes per-player
/// state by side; the match maps player ids to sides at its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    /// The opposite side.
    pub fn other(self) -> Side {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    /// Index into a per-side `[T; 2]` array.
    pub fn index(self) -> usize {
        match self {
            Side::PlayerOne => 0,
            Side::PlayerTwo => 1,
        }
    }
}

/// A player's progress within one regular game.
///
/// This is the rendered scoring ladder, not a counter. A player only holds
/// `Advantage` alone; both-`Forty` is the deuce state and needs no separate
/// flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointScore {
    Love,
    Fifteen,
    Thirty,
    Forty,
    Advantage,
}

impl PointScore {
    /// The next ladder step after winning a point below `Forty`.
    ///
    /// Advancing from `Forty` or `Advantage` depends on the opponent's score
    /// and is decided by the game, so calling this there is a bug.
    pub fn next(self) -> PointScore {
        match self {
            PointScore::Love => PointScore::Fifteen,
            PointScore::Fifteen => PointScore::Thirty,
            PointScore::Thirty => PointScore::Forty,
            PointScore::Forty | PointScore::Advantage => {
                panic!("cannot advance from {self:?} without opponent context")
            }
        }
    }

    /// Whether winning a point at this score wins the game outright against
    /// the given opponent score.
    pub fn wins_against(self, opponent: PointScore) -> bool {
        match self {
            PointScore::Advantage => true,
            PointScore::Forty => {
                opponent != PointScore::Forty && opponent != PointScore::Advantage
            }
            _ => false,
        }
    }

    /// Display label used in formatted scores.
    pub fn label(self) -> &'static str {
        match self {
            PointScore::Love => "0",
            PointScore::Fifteen => "15",
            PointScore::Thirty => "30",
            PointScore::Forty => "40",
            PointScore::Advantage => "AD",
        }
    }
}

impl fmt::Display for PointScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
