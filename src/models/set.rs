//! Set-level game accumulation and tiebreak triggering.

use serde::Serialize;

use super::{Game, Side};

/// A set within a match: an ordered list of games (completed games followed
/// by at most one in-progress game) and the per-side games-won tally.
#[derive(Debug, Clone, Serialize)]
pub struct Set {
    number: u32,
    games: Vec<Game>,
    games_won: [u32; 2],
    winner: Option<Side>,
    /// Games each side must reach before the next game is a tiebreak.
    tiebreak_at: u32,
}

impl Set {
    /// Create a set with its first regular game already in progress.
    pub fn new(number: u32, tiebreak_at: u32) -> Self {
        Self {
            number,
            games: vec![Game::regular(1)],
            games_won: [0; 2],
            winner: None,
            tiebreak_at,
        }
    }

    /// Sequence number of this set within its match (1-based).
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn is_completed(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn games_won(&self, side: Side) -> u32 {
        self.games_won[side.index()]
    }

    pub fn total_games_played(&self) -> u32 {
        self.games.len() as u32
    }

    /// The in-progress game, if the set is still live.
    pub fn current_game(&self) -> Option<&Game> {
        if self.is_completed() {
            return None;
        }
        self.games.iter().find(|game| !game.is_completed())
    }

    /// Mutable access to the in-progress game.
    ///
    /// # Panics
    ///
    /// Panics if the set is completed or holds no live game; the match must
    /// only route points to its current set.
    pub fn current_game_mut(&mut self) -> &mut Game {
        assert!(!self.is_completed(), "no current game in completed set {}", self.number);
        self.games
            .iter_mut()
            .find(|game| !game.is_completed())
            .unwrap_or_else(|| panic!("set {} has no game in progress", self.number))
    }

    /// Record that the current game finished with `winner`. Returns true if
    /// the set is now complete; otherwise exactly one new game (tiebreak at
    /// 6-6) is created.
    pub fn complete_game(&mut self, winner: Side) -> bool {
        assert!(!self.is_completed(), "cannot complete game in completed set {}", self.number);

        self.games_won[winner.index()] += 1;

        if self.is_set_won(winner) {
            self.winner = Some(winner);
            return true;
        }

        let next_number = self.games.len() as u32 + 1;
        if self.needs_tiebreak() {
            self.games.push(Game::tiebreak(next_number));
        } else {
            self.games.push(Game::regular(next_number));
        }
        false
    }

    fn is_set_won(&self, side: Side) -> bool {
        let mine = self.games_won[side.index()];
        let theirs = self.games_won[side.other().index()];

        // Standard win: six games (the tiebreak threshold) with a two-game lead.
        if mine >= self.tiebreak_at && mine > theirs && mine - theirs >= 2 {
            return true;
        }

        // 7-6: only via the tiebreak itself, checked against the decisive
        // game's flag and winner rather than inferred from arithmetic.
        if mine == self.tiebreak_at + 1 && theirs == self.tiebreak_at {
            if let Some(last) = self.games.last() {
                return last.is_tiebreak() && last.winner() == Some(side);
            }
        }

        false
    }

    /// Whether the next game must be a tiebreak (both sides at 6).
    pub fn needs_tiebreak(&self) -> bool {
        self.games_won[0] == self.tiebreak_at && self.games_won[1] == self.tiebreak_at
    }

    /// Whether the live game is a tiebreak.
    pub fn is_in_tiebreak(&self) -> bool {
        self.current_game().is_some_and(|game| game.is_tiebreak())
    }

    /// Games tally oriented player-one first, e.g. "6-4".
    pub fn format_score(&self) -> String {
        format!("{}-{}", self.games_won[0], self.games_won[1])
    }

    /// Formatted score of the live game, or `None` once the set is over.
    pub fn current_game_score(&self) -> Option<String> {
        self.current_game().map(|game| game.format_score())
    }
}
