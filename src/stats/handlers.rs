use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{AdvancedStats, PlayerAppearancesResponse, SideTotals},
    service::StatsService,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for wins per side
///
/// GET /api/spymasters/stats
#[instrument(name = "get_side_totals", skip(state))]
pub async fn get_side_totals(State(state): State<AppState>) -> Result<Json<SideTotals>, AppError> {
    let service = StatsService::new(Arc::clone(&state.match_repository));
    Ok(Json(service.side_totals().await?))
}

/// HTTP handler for per-player statistics and leaderboards
///
/// GET /api/spymasters/stats/advanced
#[instrument(name = "get_advanced_stats", skip(state))]
pub async fn get_advanced_stats(
    State(state): State<AppState>,
) -> Result<Json<AdvancedStats>, AppError> {
    let service = StatsService::new(Arc::clone(&state.match_repository));
    let stats = service.advanced_stats().await?;

    info!(players = stats.all_player_stats.len(), "Advanced stats computed");
    Ok(Json(stats))
}

/// GET /api/spymasters/stats/players
#[instrument(name = "get_spymaster_appearances", skip(state))]
pub async fn get_spymaster_appearances(
    State(state): State<AppState>,
) -> Result<Json<PlayerAppearancesResponse>, AppError> {
    let service = StatsService::new(Arc::clone(&state.match_repository));
    let players = service.spymaster_appearances(Utc::now()).await?;

    Ok(Json(PlayerAppearancesResponse { players }))
}
