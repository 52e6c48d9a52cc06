//! Game-level scoring state machine.
//!
//! A game is either a regular game (Love/15/30/40 ladder with deuce and
//! advantage) or a tiebreak (first to 7 points, win by 2, no upper bound).
//! Deuce is not tracked separately: both sides at `Forty` is the deuce state.

use serde::Serialize;

use super::{PointScore, Side};

/// Localized label rendered when a regular game stands at deuce.
const DEUCE_LABEL: &str = "Deuce";

/// Per-game scoring representation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum GameScoring {
    /// Ladder scores for a regular game, indexed by side.
    Regular { scores: [PointScore; 2] },
    /// Raw point counts for a tiebreak, indexed by side.
    Tiebreak { points: [u32; 2] },
}

/// A single game within a set.
///
/// Immutable once completed: the winner is set exactly once and scoring a
/// completed game panics, because the set must never route a point here.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    number: u32,
    scoring: GameScoring,
    winner: Option<Side>,
}

impl Game {
    /// Create a regular game with both sides at love.
    pub fn regular(number: u32) -> Self {
        Self {
            number,
            scoring: GameScoring::Regular {
                scores: [PointScore::Love; 2],
            },
            winner: None,
        }
    }

    /// Create a tiebreak game with both sides at zero.
    pub fn tiebreak(number: u32) -> Self {
        Self {
            number,
            scoring: GameScoring::Tiebreak { points: [0; 2] },
            winner: None,
        }
    }

    /// Sequence number of this game within its set (1-based).
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn is_tiebreak(&self) -> bool {
        matches!(self.scoring, GameScoring::Tiebreak { .. })
    }

    pub fn is_completed(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Record a point for `scorer`. Returns true if the game is now complete.
    ///
    /// # Panics
    ///
    /// Panics if the game is already completed; upper layers must only route
    /// points to the current game.
    pub fn score_point(&mut self, scorer: Side) -> bool {
        assert!(
            !self.is_completed(),
            "cannot score on completed game {}",
            self.number
        );

        match &mut self.scoring {
            GameScoring::Regular { scores } => {
                Self::score_regular(scores, scorer, &mut self.winner)
            }
            GameScoring::Tiebreak { points } => {
                Self::score_tiebreak(points, scorer, &mut self.winner)
            }
        }
    }

    fn score_regular(scores: &mut [PointScore; 2], scorer: Side, winner: &mut Option<Side>) -> bool {
        let mine = scores[scorer.index()];
        let theirs = scores[scorer.other().index()];

        if mine.wins_against(theirs) {
            *winner = Some(scorer);
            return true;
        }

        match (mine, theirs) {
            // Deuce: the scorer takes advantage.
            (PointScore::Forty, PointScore::Forty) => {
                scores[scorer.index()] = PointScore::Advantage;
            }
            // Scoring against advantage pulls the game back to deuce.
            (PointScore::Forty, PointScore::Advantage) => {
                scores[scorer.other().index()] = PointScore::Forty;
            }
            // Below forty: plain ladder step.
            _ => {
                scores[scorer.index()] = mine.next();
            }
        }
        false
    }

    fn score_tiebreak(points: &mut [u32; 2], scorer: Side, winner: &mut Option<Side>) -> bool {
        points[scorer.index()] += 1;
        let mine = points[scorer.index()];
        let theirs = points[scorer.other().index()];
        if mine >= 7 && mine > theirs && mine - theirs >= 2 {
            *winner = Some(scorer);
            return true;
        }
        false
    }

    /// The ladder score for one side of a regular game.
    ///
    /// Returns `None` for tiebreak games; use [`Game::tiebreak_points`] there.
    pub fn point_score(&self, side: Side) -> Option<PointScore> {
        match &self.scoring {
            GameScoring::Regular { scores } => Some(scores[side.index()]),
            GameScoring::Tiebreak { .. } => None,
        }
    }

    /// The raw point count for one side of a tiebreak game.
    pub fn tiebreak_points(&self, side: Side) -> Option<u32> {
        match &self.scoring {
            GameScoring::Tiebreak { points } => Some(points[side.index()]),
            GameScoring::Regular { .. } => None,
        }
    }

    /// Whether a regular game stands at deuce (both sides at forty).
    pub fn is_deuce(&self) -> bool {
        matches!(
            self.scoring,
            GameScoring::Regular {
                scores: [PointScore::Forty, PointScore::Forty]
            }
        )
    }

    /// The side holding advantage, if any.
    pub fn advantage(&self) -> Option<Side> {
        match &self.scoring {
            GameScoring::Regular { scores } => {
                if scores[0] == PointScore::Advantage {
                    Some(Side::PlayerOne)
                } else if scores[1] == PointScore::Advantage {
                    Some(Side::PlayerTwo)
                } else {
                    None
                }
            }
            GameScoring::Tiebreak { .. } => None,
        }
    }

    /// Formatted score oriented player-one first, e.g. "40-30", "Deuce",
    /// "AD-40", or "5-3" for tiebreaks.
    pub fn format_score(&self) -> String {
        match &self.scoring {
            GameScoring::Tiebreak { points } => format!("{}-{}", points[0], points[1]),
            GameScoring::Regular { scores } => match (scores[0], scores[1]) {
                (PointScore::Forty, PointScore::Forty) => DEUCE_LABEL.to_string(),
                (PointScore::Advantage, _) => "AD-40".to_string(),
                (_, PointScore::Advantage) => "40-AD".to_string(),
                (p1, p2) => format!("{}-{}", p1.label(), p2.label()),
            },
        }
    }
}
