//! Match aggregate: set accumulation, lifecycle, and score reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Game, MatchId, Player, PlayerId, PlayerName, Set, Side};
use crate::error::MatchError;

/// Lifecycle status of a match. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    InProgress,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn is_active(self) -> bool {
        self == MatchStatus::InProgress
    }

    pub fn is_finished(self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Cancelled)
    }

    /// Parse a status filter string (case-insensitive).
    pub fn parse_filter(s: &str) -> Result<Self, MatchError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN_PROGRESS" => Ok(MatchStatus::InProgress),
            "COMPLETED" => Ok(MatchStatus::Completed),
            "CANCELLED" => Ok(MatchStatus::Cancelled),
            other => Err(MatchError::UnknownStatusFilter(other.to_string())),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStatus::InProgress => "IN_PROGRESS",
            MatchStatus::Completed => "COMPLETED",
            MatchStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{label}")
    }
}

/// Match format expressed as plain configuration rather than a factory
/// hierarchy: how many sets win the match, and the games count at which a
/// tied set goes to a tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFormat {
    pub sets_to_win: u32,
    pub tiebreak_at: u32,
}

impl MatchFormat {
    /// Standard singles: best of three sets, tiebreak at 6-6.
    pub fn standard() -> Self {
        Self {
            sets_to_win: 2,
            tiebreak_at: 6,
        }
    }

    /// Best of five sets, tiebreak at 6-6.
    pub fn best_of_five() -> Self {
        Self {
            sets_to_win: 3,
            tiebreak_at: 6,
        }
    }
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self::standard()
    }
}

/// What one scored point changed, beyond the point itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointOutcome {
    /// Set if this point completed a game.
    pub game_winner: Option<PlayerId>,
    /// Set if this point also completed the current set.
    pub set_winner: Option<PlayerId>,
    /// True if this point decided the match.
    pub match_completed: bool,
}

/// A singles tennis match: two players, an ordered list of sets, and the
/// overall lifecycle state. All mutation goes through [`Match::score_point`]
/// and [`Match::cancel`]; a finished match is immutable.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    id: MatchId,
    players: [Player; 2],
    sets: Vec<Set>,
    status: MatchStatus,
    format: MatchFormat,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    winner: Option<PlayerId>,
}

impl Match {
    /// Create a match with the standard best-of-three format.
    ///
    /// Validates both names and rejects case-insensitive duplicates before
    /// any state is created.
    pub fn create(player1_name: &str, player2_name: &str) -> Result<Self, MatchError> {
        Self::with_format(player1_name, player2_name, MatchFormat::standard())
    }

    /// Create a match with an explicit format.
    pub fn with_format(
        player1_name: &str,
        player2_name: &str,
        format: MatchFormat,
    ) -> Result<Self, MatchError> {
        let name1 = PlayerName::parse(player1_name)?;
        let name2 = PlayerName::parse(player2_name)?;
        if name1.eq_ignore_case(&name2) {
            return Err(MatchError::DuplicatePlayer(name1.as_str().to_string()));
        }

        Ok(Self {
            id: MatchId::generate(),
            players: [Player::new(name1), Player::new(name2)],
            sets: vec![Set::new(1, format.tiebreak_at)],
            status: MatchStatus::InProgress,
            format,
            created_at: Utc::now(),
            completed_at: None,
            winner: None,
        })
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn format(&self) -> MatchFormat {
        self.format
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Map a player id to its side of the court.
    pub fn side_of(&self, player_id: &PlayerId) -> Option<Side> {
        if self.players[0].id() == *player_id {
            Some(Side::PlayerOne)
        } else if self.players[1].id() == *player_id {
            Some(Side::PlayerTwo)
        } else {
            None
        }
    }

    pub fn player_id(&self, side: Side) -> PlayerId {
        self.players[side.index()].id()
    }

    /// The first non-completed set, if the match is live.
    pub fn current_set(&self) -> Option<&Set> {
        if self.status.is_finished() {
            return None;
        }
        self.sets.iter().find(|set| !set.is_completed())
    }

    /// The live game within the current set.
    pub fn current_game(&self) -> Option<&Game> {
        self.current_set().and_then(|set| set.current_game())
    }

    pub fn current_set_number(&self) -> Option<u32> {
        self.current_set().map(|set| set.number())
    }

    pub fn current_game_number(&self) -> Option<u32> {
        self.current_game().map(|game| game.number())
    }

    pub fn is_current_game_tiebreak(&self) -> bool {
        self.current_game().is_some_and(|game| game.is_tiebreak())
    }

    /// Record a point for the given player.
    ///
    /// Runs the full Game → Set → Match completion cascade in one synchronous
    /// step: a completed game updates the set tally, a completed set updates
    /// the sets-won counter and either finishes the match or opens a new set.
    pub fn score_point(&mut self, player_id: &PlayerId) -> Result<PointOutcome, MatchError> {
        if self.status.is_finished() {
            return Err(MatchError::MatchFinished {
                id: self.id,
                status: self.status,
            });
        }

        let side = self.side_of(player_id).ok_or(MatchError::PlayerNotFound {
            match_id: self.id,
            player_id: *player_id,
        })?;

        let set = self
            .sets
            .iter_mut()
            .find(|set| !set.is_completed())
            .unwrap_or_else(|| panic!("match {} in progress but has no current set", self.id));

        let mut outcome = PointOutcome {
            game_winner: None,
            set_winner: None,
            match_completed: false,
        };

        let game_completed = set.current_game_mut().score_point(side);
        if game_completed {
            outcome.game_winner = Some(*player_id);
            self.players[side.index()].record_game_won();

            let set_completed = set.complete_game(side);
            if set_completed {
                outcome.set_winner = Some(*player_id);
                self.players[side.index()].record_set_won();

                if self.players[side.index()].sets_won() >= self.format.sets_to_win {
                    self.status = MatchStatus::Completed;
                    self.winner = Some(*player_id);
                    self.completed_at = Some(Utc::now());
                    outcome.match_completed = true;
                    return Ok(outcome);
                }

                self.start_new_set();
            }
        }

        self.players[side.index()].record_point_won();
        Ok(outcome)
    }

    fn start_new_set(&mut self) {
        let next_number = self.sets.len() as u32 + 1;
        self.sets.push(Set::new(next_number, self.format.tiebreak_at));
        for player in &mut self.players {
            player.reset_games_won();
        }
    }

    /// Cancel a live match. Fails once the match is completed or cancelled.
    pub fn cancel(&mut self) -> Result<(), MatchError> {
        if self.status.is_finished() {
            return Err(MatchError::MatchFinished {
                id: self.id,
                status: self.status,
            });
        }
        self.status = MatchStatus::Cancelled;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Human-readable score summary: completed sets as "a-b", then the
    /// in-progress set with the live game in parentheses, e.g.
    /// `"6-4 2-1 (40-30)"`.
    pub fn current_score(&self) -> String {
        let mut parts = Vec::with_capacity(self.sets.len());
        for set in &self.sets {
            if set.is_completed() {
                parts.push(set.format_score());
            } else {
                let mut part = set.format_score();
                if let Some(game_score) = set.current_game_score() {
                    part.push_str(&format!(" ({game_score})"));
                }
                parts.push(part);
            }
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_match() -> Match {
        Match::create("Alice", "Bob").unwrap()
    }

    fn p1(m: &Match) -> PlayerId {
        m.player_id(Side::PlayerOne)
    }

    fn p2(m: &Match) -> PlayerId {
        m.player_id(Side::PlayerTwo)
    }

    /// Score straight points for `player` until the current game completes.
    fn win_game(m: &mut Match, player: PlayerId) -> PointOutcome {
        loop {
            let outcome = m.score_point(&player).unwrap();
            if outcome.game_winner.is_some() {
                return outcome;
            }
        }
    }

    fn win_set(m: &mut Match, player: PlayerId) -> PointOutcome {
        loop {
            let outcome = win_game(m, player);
            if outcome.set_winner.is_some() {
                return outcome;
            }
        }
    }

    #[test]
    fn test_create_initializes_first_set_and_game() {
        let m = new_match();
        assert_eq!(m.status(), MatchStatus::InProgress);
        assert_eq!(m.sets().len(), 1);
        assert_eq!(m.current_set_number(), Some(1));
        assert_eq!(m.current_game_number(), Some(1));
        assert!(m.winner().is_none());
        assert!(m.completed_at().is_none());
        assert_eq!(m.current_score(), "0-0 (0-0)");
    }

    #[test]
    fn test_create_rejects_invalid_names() {
        assert!(Match::create("", "Bob").is_err());
        assert!(Match::create("Alice", "   ").is_err());
        assert!(Match::create("A", "Bob").is_err());
        assert!(Match::create(&"x".repeat(51), "Bob").is_err());
        assert!(Match::create("Alice!", "Bob").is_err());
    }

    #[test]
    fn test_create_rejects_duplicate_names_case_insensitive() {
        let err = Match::create("Alice", "ALICE").unwrap_err();
        assert!(matches!(err, MatchError::DuplicatePlayer(_)));
        let err = Match::create(" alice ", "Alice").unwrap_err();
        assert!(matches!(err, MatchError::DuplicatePlayer(_)));
    }

    #[test]
    fn test_score_point_rejects_unknown_player() {
        let mut m = new_match();
        let stranger = PlayerId::generate();
        let err = m.score_point(&stranger).unwrap_err();
        assert!(matches!(err, MatchError::PlayerNotFound { .. }));
    }

    // End-to-end scenario A: four straight points win game 1.
    #[test]
    fn test_four_points_win_first_game() {
        let mut m = new_match();
        let alice = p1(&m);

        for _ in 0..3 {
            let outcome = m.score_point(&alice).unwrap();
            assert_eq!(outcome.game_winner, None);
        }
        let outcome = m.score_point(&alice).unwrap();
        assert_eq!(outcome.game_winner, Some(alice));
        assert_eq!(outcome.set_winner, None);
        assert!(!outcome.match_completed);

        assert_eq!(m.current_set().unwrap().games_won(Side::PlayerOne), 1);
        assert_eq!(m.current_game_number(), Some(2));
        assert_eq!(m.current_score(), "1-0 (0-0)");
        assert_eq!(m.player(Side::PlayerOne).games_won(), 1);
        assert_eq!(m.player(Side::PlayerOne).points_won(), 4);
    }

    // End-to-end scenario B: 6-6 forces a tiebreak; 7-0 in it takes the set.
    #[test]
    fn test_tiebreak_set_flow() {
        let mut m = new_match();
        let alice = p1(&m);
        let bob = p2(&m);

        for _ in 0..6 {
            win_game(&mut m, alice);
            win_game(&mut m, bob);
        }
        assert!(m.is_current_game_tiebreak());
        assert_eq!(m.current_set().unwrap().format_score(), "6-6");

        let mut outcome = m.score_point(&alice).unwrap();
        for _ in 0..6 {
            outcome = m.score_point(&alice).unwrap();
        }
        assert_eq!(outcome.set_winner, Some(alice));
        assert!(!outcome.match_completed);

        assert_eq!(m.sets()[0].format_score(), "7-6");
        assert_eq!(m.sets()[0].winner(), Some(Side::PlayerOne));
        assert_eq!(m.current_set_number(), Some(2));
        // Fresh set: games-won counters reset for both players.
        assert_eq!(m.player(Side::PlayerOne).games_won(), 0);
        assert_eq!(m.player(Side::PlayerTwo).games_won(), 0);
    }

    // End-to-end scenario C: two 6-0 sets complete the match.
    #[test]
    fn test_double_bagel_completes_match() {
        let mut m = new_match();
        let alice = p1(&m);

        let outcome = win_set(&mut m, alice);
        assert!(!outcome.match_completed);
        let outcome = win_set(&mut m, alice);
        assert!(outcome.match_completed);

        assert_eq!(m.status(), MatchStatus::Completed);
        assert_eq!(m.winner(), Some(alice));
        assert!(m.completed_at().is_some());
        assert_eq!(m.current_score(), "6-0 6-0");
        assert_eq!(m.player(Side::PlayerOne).sets_won(), 2);

        let err = m.score_point(&alice).unwrap_err();
        assert!(matches!(err, MatchError::MatchFinished { .. }));
    }

    // End-to-end scenario D: cancellation is terminal.
    #[test]
    fn test_cancel_lifecycle() {
        let mut m = new_match();
        let alice = p1(&m);

        m.cancel().unwrap();
        assert_eq!(m.status(), MatchStatus::Cancelled);
        assert!(m.completed_at().is_some());

        assert!(matches!(
            m.cancel().unwrap_err(),
            MatchError::MatchFinished { .. }
        ));
        assert!(matches!(
            m.score_point(&alice).unwrap_err(),
            MatchError::MatchFinished { .. }
        ));
    }

    #[test]
    fn test_cancel_rejected_after_completion() {
        let mut m = new_match();
        let alice = p1(&m);
        win_set(&mut m, alice);
        win_set(&mut m, alice);
        assert!(matches!(
            m.cancel().unwrap_err(),
            MatchError::MatchFinished { .. }
        ));
    }

    #[test]
    fn test_third_set_decides_match() {
        let mut m = new_match();
        let alice = p1(&m);
        let bob = p2(&m);

        win_set(&mut m, alice);
        win_set(&mut m, bob);
        assert_eq!(m.current_set_number(), Some(3));

        let outcome = win_set(&mut m, bob);
        assert!(outcome.match_completed);
        assert_eq!(m.winner(), Some(bob));
        assert_eq!(m.current_score(), "6-0 0-6 0-6");
    }

    #[test]
    fn test_current_score_mid_game() {
        let mut m = new_match();
        let alice = p1(&m);
        let bob = p2(&m);

        win_set(&mut m, alice); // 6-0
        win_game(&mut m, alice);
        win_game(&mut m, alice);
        win_game(&mut m, bob);
        // 2-1 in set two; 40-30 in the current game.
        m.score_point(&alice).unwrap();
        m.score_point(&alice).unwrap();
        m.score_point(&alice).unwrap();
        m.score_point(&bob).unwrap();
        m.score_point(&bob).unwrap();
        assert_eq!(m.current_score(), "6-0 2-1 (40-30)");
    }

    #[test]
    fn test_current_score_round_trips_set_tallies() {
        let mut m = new_match();
        let alice = p1(&m);
        let bob = p2(&m);

        win_set(&mut m, alice);
        win_game(&mut m, bob);
        win_game(&mut m, alice);
        win_game(&mut m, bob);

        let rendered = m.current_score();
        // Strip the parenthesised game score, then parse each set tally back.
        let sets_part = match rendered.split_once(" (") {
            Some((sets, _)) => sets,
            None => &rendered,
        };
        let parsed: Vec<(u32, u32)> = sets_part
            .split(' ')
            .map(|part| {
                let (a, b) = part.split_once('-').unwrap();
                (a.parse().unwrap(), b.parse().unwrap())
            })
            .collect();

        let expected: Vec<(u32, u32)> = m
            .sets()
            .iter()
            .map(|set| (set.games_won(Side::PlayerOne), set.games_won(Side::PlayerTwo)))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_match_winning_point_not_counted_in_points_won() {
        let mut m = new_match();
        let alice = p1(&m);
        win_set(&mut m, alice); // 24 points
        win_set(&mut m, alice); // 24 points, last one ends the match
        assert_eq!(m.player(Side::PlayerOne).points_won(), 47);
    }

    #[test]
    fn test_best_of_five_format() {
        let mut m =
            Match::with_format("Alice", "Bob", MatchFormat::best_of_five()).unwrap();
        let alice = m.player_id(Side::PlayerOne);
        win_set(&mut m, alice);
        win_set(&mut m, alice);
        assert_eq!(m.status(), MatchStatus::InProgress);
        let outcome = win_set(&mut m, alice);
        assert!(outcome.match_completed);
        assert_eq!(m.status(), MatchStatus::Completed);
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!(
            MatchStatus::parse_filter("in_progress").unwrap(),
            MatchStatus::InProgress
        );
        assert_eq!(
            MatchStatus::parse_filter(" COMPLETED ").unwrap(),
            MatchStatus::Completed
        );
        assert!(MatchStatus::parse_filter("paused").is_err());
    }
}
