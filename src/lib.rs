// Library crate for the spymaster match tracker
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod db;
pub mod matches;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::{Config, StorageBackend};
pub use matches::{InMemoryMatchRepository, MatchRepository, SqliteMatchRepository};
pub use shared::{AppError, AppState};
pub use stats::{AdvancedStats, PlayerStat, StatsService};

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the HTTP router for the given state
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/spymasters",
            get(matches::get_current_spymasters)
                .post(matches::record_match)
                .delete(matches::clear_matches),
        )
        .route("/api/spymasters/history", get(matches::get_history))
        .route("/api/spymasters/stats", get(stats::get_side_totals))
        .route(
            "/api/spymasters/stats/advanced",
            get(stats::get_advanced_stats),
        )
        .route(
            "/api/spymasters/stats/players",
            get(stats::get_spymaster_appearances),
        )
        .route("/api/spymasters/:id", delete(matches::delete_match))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
