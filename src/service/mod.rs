//! Match service: the synchronous application boundary.
//!
//! Parses and validates caller-supplied identifiers, drives the scoring
//! engine through the store's atomic update cycle, and publishes domain
//! events after each successful operation.

use std::sync::Arc;

use crate::error::MatchError;
use crate::models::{
    Match, MatchEvent, MatchId, MatchStatus, Notification, PlayerId, PointOutcome,
};
use crate::notify::MatchNotifier;
use crate::storage::MatchStore;

/// Coordinates match operations across the store and the notifier.
#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn MatchStore>,
    notifier: Arc<dyn MatchNotifier>,
}

impl MatchService {
    pub fn new(store: Arc<dyn MatchStore>, notifier: Arc<dyn MatchNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Create and persist a new match between two named players.
    pub fn create_match(
        &self,
        player1_name: &str,
        player2_name: &str,
    ) -> Result<Match, MatchError> {
        let created = Match::create(player1_name, player2_name)?;
        self.store.save(created.clone());

        self.publish(MatchEvent::MatchCreated {
            match_id: created.id(),
            player1_name: created.players()[0].name().as_str().to_string(),
            player2_name: created.players()[1].name().as_str().to_string(),
        });

        tracing::info!(match_id = %created.id(), "match created");
        Ok(created)
    }

    /// Score a point for a player, addressed by string ids.
    ///
    /// Returns the updated match snapshot. The store serializes the whole
    /// read-modify-write step per match id.
    pub fn score_point(&self, match_id: &str, player_id: &str) -> Result<Match, MatchError> {
        let match_id = MatchId::parse(match_id)?;
        let player_id = PlayerId::parse(player_id)?;

        let mut outcome: Option<PointOutcome> = None;
        let updated = self.store.update(&match_id, &mut |entry| {
            outcome = Some(entry.score_point(&player_id)?);
            Ok(())
        })?;
        let outcome = outcome.unwrap_or_else(|| {
            panic!("store update for match {match_id} succeeded without an outcome")
        });

        self.publish_point_events(&updated, player_id, outcome);
        Ok(updated)
    }

    /// Cancel a live match.
    pub fn cancel_match(&self, match_id: &str) -> Result<Match, MatchError> {
        let match_id = MatchId::parse(match_id)?;
        let updated = self.store.update(&match_id, &mut |entry| entry.cancel())?;
        tracing::info!(match_id = %updated.id(), "match cancelled");
        Ok(updated)
    }

    /// Delete a match from the store.
    pub fn delete_match(&self, match_id: &str) -> Result<(), MatchError> {
        let match_id = MatchId::parse(match_id)?;
        self.store.delete(&match_id)?;

        self.publish(MatchEvent::MatchDeleted { match_id });
        tracing::info!(%match_id, "match deleted");
        Ok(())
    }

    /// Fetch a match snapshot by string id.
    pub fn get_match(&self, match_id: &str) -> Result<Match, MatchError> {
        let match_id = MatchId::parse(match_id)?;
        self.store.find_by_id(&match_id)
    }

    /// All matches, optionally filtered by status.
    pub fn list_matches(&self, status: Option<MatchStatus>) -> Vec<Match> {
        match status {
            Some(status) => self.store.find_by_status(status),
            None => self.store.find_all(),
        }
    }

    /// Whether a match with this id exists. Malformed ids count as absent.
    pub fn match_exists(&self, match_id: &str) -> bool {
        match MatchId::parse(match_id) {
            Ok(id) => self.store.exists(&id),
            Err(_) => false,
        }
    }

    fn publish_point_events(&self, updated: &Match, player_id: PlayerId, outcome: PointOutcome) {
        // Events reference the set and game the point landed in. After a
        // completion the match has already opened the next game or set, so the
        // landing spot is the most recent completed one, not the current one.
        let landing_set = if outcome.set_winner.is_some() {
            updated
                .sets()
                .iter()
                .rev()
                .find(|set| set.is_completed())
                .expect("set completion outcome implies a completed set")
        } else {
            updated
                .current_set()
                .expect("live match must have a current set")
        };
        let set_number = landing_set.number();
        let game_number = if outcome.game_winner.is_some() {
            landing_set
                .games()
                .iter()
                .rev()
                .find(|game| game.is_completed())
                .expect("game completion outcome implies a completed game")
                .number()
        } else {
            landing_set
                .current_game()
                .expect("live set must have a current game")
                .number()
        };

        self.publish(MatchEvent::PointScored {
            match_id: updated.id(),
            player_id,
            current_score: updated.current_score(),
            set_number,
            game_number,
        });

        if let Some(winner_id) = outcome.game_winner {
            self.publish(MatchEvent::GameCompleted {
                match_id: updated.id(),
                winner_id,
                set_number,
                game_number,
            });
        }

        if let Some(winner_id) = outcome.set_winner {
            self.publish(MatchEvent::SetCompleted {
                match_id: updated.id(),
                winner_id,
                set_number,
                set_score: landing_set.format_score(),
            });
        }

        if outcome.match_completed {
            let winner_id = updated
                .winner()
                .expect("completed match must record a winner");
            self.publish(MatchEvent::MatchCompleted {
                match_id: updated.id(),
                winner_id,
                final_score: updated.current_score(),
                total_sets: updated.sets().len() as u32,
            });
        }
    }

    fn publish(&self, event: MatchEvent) {
        self.notifier.notify(&Notification::new(event));
    }
}
