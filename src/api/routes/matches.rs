//! Match management endpoints and their request/response DTOs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Game, Match, MatchStatus, Player, Set, Side};

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub player1_name: String,
    pub player2_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ScorePointRequest {
    pub player_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListMatchesParams {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub id: String,
    pub name: String,
    pub sets_won: u32,
    pub games_won: u32,
    pub points_won: u32,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub number: u32,
    pub is_tiebreak: bool,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<String>,
    /// "40-30", "Deuce", "AD-40", or tiebreak points like "5-3".
    pub score: String,
}

#[derive(Debug, Serialize)]
pub struct SetResponse {
    pub number: u32,
    pub player1_games: u32,
    pub player2_games: u32,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<String>,
    pub games: Vec<GameResponse>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: String,
    pub player1: PlayerResponse,
    pub player2: PlayerResponse,
    pub status: MatchStatus,
    pub current_score: String,
    pub sets: Vec<SetResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_set_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_game_number: Option<u32>,
    pub in_tiebreak: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub match_id: String,
    pub current_score: String,
    pub status: MatchStatus,
}

fn player_response(player: &Player) -> PlayerResponse {
    PlayerResponse {
        id: player.id().to_string(),
        name: player.name().as_str().to_string(),
        sets_won: player.sets_won(),
        games_won: player.games_won(),
        points_won: player.points_won(),
    }
}

fn game_response(tennis_match: &Match, game: &Game) -> GameResponse {
    GameResponse {
        number: game.number(),
        is_tiebreak: game.is_tiebreak(),
        completed: game.is_completed(),
        winner_id: game
            .winner()
            .map(|side| tennis_match.player_id(side).to_string()),
        score: game.format_score(),
    }
}

fn set_response(tennis_match: &Match, set: &Set) -> SetResponse {
    SetResponse {
        number: set.number(),
        // Games-won reported by recorded winner identity per game, never
        // inferred from game ordering.
        player1_games: set.games_won(Side::PlayerOne),
        player2_games: set.games_won(Side::PlayerTwo),
        completed: set.is_completed(),
        winner_id: set
            .winner()
            .map(|side| tennis_match.player_id(side).to_string()),
        games: set
            .games()
            .iter()
            .map(|game| game_response(tennis_match, game))
            .collect(),
    }
}

fn match_response(tennis_match: &Match) -> MatchResponse {
    MatchResponse {
        id: tennis_match.id().to_string(),
        player1: player_response(tennis_match.player(Side::PlayerOne)),
        player2: player_response(tennis_match.player(Side::PlayerTwo)),
        status: tennis_match.status(),
        current_score: tennis_match.current_score(),
        sets: tennis_match
            .sets()
            .iter()
            .map(|set| set_response(tennis_match, set))
            .collect(),
        current_set_number: tennis_match.current_set_number(),
        current_game_number: tennis_match.current_game_number(),
        in_tiebreak: tennis_match.is_current_game_tiebreak(),
        created_at: tennis_match.created_at().to_rfc3339(),
        completed_at: tennis_match.completed_at().map(|t| t.to_rfc3339()),
        winner_id: tennis_match.winner().map(|id| id.to_string()),
    }
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let created = state
        .service
        .create_match(&request.player1_name, &request.player2_name)?;
    Ok((StatusCode::CREATED, Json(match_response(&created))))
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<ListMatchesParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(MatchStatus::parse_filter)
        .transpose()?;
    let mut matches = state.service.list_matches(status);
    matches.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

    let responses: Vec<MatchResponse> = matches.iter().map(match_response).collect();
    let total = responses.len();
    Ok(Json(MatchListResponse {
        matches: responses,
        total,
    }))
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MatchResponse>, ApiError> {
    let found = state.service.get_match(&id)?;
    Ok(Json(match_response(&found)))
}

pub async fn score_point(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ScorePointRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let updated = state.service.score_point(&id, &request.player_id)?;
    Ok(Json(match_response(&updated)))
}

pub async fn cancel_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MatchResponse>, ApiError> {
    let cancelled = state.service.cancel_match(&id)?;
    Ok(Json(match_response(&cancelled)))
}

pub async fn get_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let found = state.service.get_match(&id)?;
    Ok(Json(ScoreResponse {
        match_id: found.id().to_string(),
        current_score: found.current_score(),
        status: found.status(),
    }))
}

pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_match(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_router;
    use crate::notify::NoopNotifier;
    use crate::service::MatchService;
    use crate::storage::InMemoryMatchStore;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let service = MatchService::new(
            Arc::new(InMemoryMatchStore::new()),
            Arc::new(NoopNotifier::new()),
        );
        build_router(AppState::new(service))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn create_test_match(app: &Router) -> serde_json::Value {
        let (status, body) = send(
            app,
            post_json(
                "/api/matches",
                serde_json::json!({"player1_name": "Alice", "player2_name": "Bob"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_create_match_returns_created() {
        let app = test_app();
        let body = create_test_match(&app).await;

        assert_eq!(body["status"], "IN_PROGRESS");
        assert_eq!(body["player1"]["name"], "Alice");
        assert_eq!(body["player2"]["name"], "Bob");
        assert_eq!(body["current_score"], "0-0 (0-0)");
        assert_eq!(body["sets"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_match_invalid_name_is_bad_request() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json(
                "/api/matches",
                serde_json::json!({"player1_name": "", "player2_name": "Bob"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_create_match_duplicate_names_conflict() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json(
                "/api/matches",
                serde_json::json!({"player1_name": "Alice", "player2_name": "ALICE"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_get_match_not_found() {
        let app = test_app();
        let id = crate::models::MatchId::generate();
        let (status, _) = send(&app, get(&format!("/api/matches/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_match_malformed_id_is_bad_request() {
        let app = test_app();
        let (status, _) = send(&app, get("/api/matches/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score_point_updates_match() {
        let app = test_app();
        let created = create_test_match(&app).await;
        let id = created["id"].as_str().unwrap();
        let player1 = created["player1"]["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            post_json(
                &format!("/api/matches/{id}/points"),
                serde_json::json!({"player_id": player1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_score"], "0-0 (15-0)");
        assert_eq!(body["player1"]["points_won"], 1);
    }

    #[tokio::test]
    async fn test_score_point_unknown_player_not_found() {
        let app = test_app();
        let created = create_test_match(&app).await;
        let id = created["id"].as_str().unwrap();
        let stranger = crate::models::PlayerId::generate();

        let (status, _) = send(
            &app,
            post_json(
                &format!("/api/matches/{id}/points"),
                serde_json::json!({"player_id": stranger.to_string()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cancel_then_score_conflict() {
        let app = test_app();
        let created = create_test_match(&app).await;
        let id = created["id"].as_str().unwrap();
        let player1 = created["player1"]["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            post_json(&format!("/api/matches/{id}/cancel"), serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "CANCELLED");
        assert!(body["completed_at"].is_string());

        let (status, _) = send(
            &app,
            post_json(&format!("/api/matches/{id}/cancel"), serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            post_json(
                &format!("/api/matches/{id}/points"),
                serde_json::json!({"player_id": player1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_list_matches_and_status_filter() {
        let app = test_app();
        create_test_match(&app).await;

        let (status, body) = send(&app, get("/api/matches")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);

        let (status, body) = send(&app, get("/api/matches?status=completed")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);

        let (status, _) = send(&app, get("/api/matches?status=bogus")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score_endpoint_and_delete() {
        let app = test_app();
        let created = create_test_match(&app).await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(&app, get(&format!("/api/matches/{id}/score"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_score"], "0-0 (0-0)");

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/matches/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, get(&format!("/api/matches/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
