//! REST API endpoints.
//!
//! Axum-based HTTP adapter over the match service. This layer only
//! translates between HTTP and the service's typed calls; no scoring rule
//! lives here.

use axum::routing::{get, post};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::MatchError;

pub mod routes;
pub mod state;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match &err {
            MatchError::InvalidPlayerName(_)
            | MatchError::InvalidMatchId(_)
            | MatchError::InvalidPlayerId(_)
            | MatchError::UnknownStatusFilter(_) => ApiError::BadRequest(err.to_string()),
            MatchError::DuplicatePlayer(_) | MatchError::MatchFinished { .. } => {
                ApiError::Conflict(err.to_string())
            }
            MatchError::MatchNotFound(_) | MatchError::PlayerNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router with tracing and CORS applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/matches",
            post(routes::matches::create_match).get(routes::matches::list_matches),
        )
        .route(
            "/api/matches/:id",
            get(routes::matches::get_match).delete(routes::matches::delete_match),
        )
        .route(
            "/api/matches/:id/points",
            post(routes::matches::score_point),
        )
        .route(
            "/api/matches/:id/cancel",
            post(routes::matches::cancel_match),
        )
        .route("/api/matches/:id/score", get(routes::matches::get_score))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
