//! # Courtside
//!
//! A tennis match scoring service with a REST API.
//!
//! ## Architecture
//!
//! - **models**: The scoring engine — points, games, sets, matches — plus
//!   domain-event records. All scoring rules live here.
//! - **service**: Application boundary coordinating validation, storage,
//!   and event notification.
//! - **storage**: Match store trait and the in-memory implementation.
//! - **notify**: Notification sinks for domain events.
//! - **api**: Axum REST adapter.
//! - **config**: TOML configuration loading.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod service;
pub mod storage;

pub use error::MatchError;
pub use models::*;
