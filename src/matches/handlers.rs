use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::MatchService,
    types::{
        CurrentSpymastersResponse, DeleteResponse, HistoryQuery, HistoryResponse,
        RecordMatchRequest, RecordMatchResponse,
    },
};
use crate::shared::{AppError, AppState};

/// HTTP handler for the current spymaster pairing
///
/// GET /api/spymasters
#[instrument(name = "get_current_spymasters", skip(state))]
pub async fn get_current_spymasters(
    State(state): State<AppState>,
) -> Result<Json<CurrentSpymastersResponse>, AppError> {
    let service = MatchService::new(Arc::clone(&state.match_repository));
    Ok(Json(service.current_spymasters().await?))
}

/// HTTP handler for recent match history
///
/// GET /api/spymasters/history?limit=N
#[instrument(name = "get_history", skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let limit = query.limit.unwrap_or(state.history_limit);
    let service = MatchService::new(Arc::clone(&state.match_repository));
    let history = service.history(limit).await?;

    info!(count = history.len(), "History listed");
    Ok(Json(HistoryResponse { history }))
}

/// HTTP handler for recording a match
///
/// POST /api/spymasters
#[instrument(name = "record_match", skip(state, payload))]
pub async fn record_match(
    State(state): State<AppState>,
    payload: Result<Json<RecordMatchRequest>, JsonRejection>,
) -> Result<Json<RecordMatchResponse>, AppError> {
    let Json(request) = payload?;
    let service = MatchService::new(Arc::clone(&state.match_repository));
    let recorded = service.record_match(request).await?;

    Ok(Json(RecordMatchResponse {
        message: "Spymasters saved successfully".to_string(),
        recorded,
    }))
}

/// HTTP handler for deleting a single match
///
/// DELETE /api/spymasters/:id
#[instrument(name = "delete_match", skip(state))]
pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let service = MatchService::new(Arc::clone(&state.match_repository));
    service.delete_match(id).await?;

    Ok(Json(DeleteResponse {
        message: "Match deleted successfully".to_string(),
        deleted: 1,
    }))
}

/// HTTP handler for deleting every match
///
/// DELETE /api/spymasters
#[instrument(name = "clear_matches", skip(state))]
pub async fn clear_matches(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let service = MatchService::new(Arc::clone(&state.match_repository));
    let deleted = service.clear_matches().await?;

    Ok(Json(DeleteResponse {
        message: "Spymasters cleared successfully".to_string(),
        deleted,
    }))
}
