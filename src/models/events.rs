//! Domain event records emitted after successful match operations.
//!
//! Events are plain data: a closed set of variants wrapped in a small
//! envelope carrying the event id and timestamp. Delivery is the notifier's
//! concern; the core only produces the payloads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{MatchId, PlayerId};

/// The fixed set of domain events this service emits.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    MatchCreated {
        match_id: MatchId,
        player1_name: String,
        player2_name: String,
    },
    PointScored {
        match_id: MatchId,
        player_id: PlayerId,
        current_score: String,
        set_number: u32,
        game_number: u32,
    },
    GameCompleted {
        match_id: MatchId,
        winner_id: PlayerId,
        set_number: u32,
        game_number: u32,
    },
    SetCompleted {
        match_id: MatchId,
        winner_id: PlayerId,
        set_number: u32,
        set_score: String,
    },
    MatchCompleted {
        match_id: MatchId,
        winner_id: PlayerId,
        final_score: String,
        total_sets: u32,
    },
    MatchDeleted {
        match_id: MatchId,
    },
}

impl MatchEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchEvent::MatchCreated { .. } => "match_created",
            MatchEvent::PointScored { .. } => "point_scored",
            MatchEvent::GameCompleted { .. } => "game_completed",
            MatchEvent::SetCompleted { .. } => "set_completed",
            MatchEvent::MatchCompleted { .. } => "match_completed",
            MatchEvent::MatchDeleted { .. } => "match_deleted",
        }
    }
}

/// Envelope pairing an event payload with its identity and timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: MatchEvent,
}

impl Notification {
    pub fn new(event: MatchEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            event,
        }
    }
}
