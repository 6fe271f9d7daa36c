use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{NewMatch, Side, SortOrder},
    repository::MatchRepository,
    types::{CurrentSpymastersResponse, MatchResponse, RecordMatchRequest},
};
use crate::{config::MAX_HISTORY_LIMIT, shared::AppError};

/// Service for recording and browsing match records
pub struct MatchService {
    repository: Arc<dyn MatchRepository + Send + Sync>,
}

impl MatchService {
    pub fn new(repository: Arc<dyn MatchRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Validates a request and stores it as a new match
    #[instrument(skip(self, request))]
    pub async fn record_match(
        &self,
        request: RecordMatchRequest,
    ) -> Result<MatchResponse, AppError> {
        let new_match = validate_request(request)?;
        debug!(
            red_spymaster = %new_match.red_spymaster,
            blue_spymaster = %new_match.blue_spymaster,
            "Match request validated"
        );

        let record = self.repository.insert_match(&new_match).await?;

        info!(
            match_id = record.id,
            winner = record.winner.map(|side| side.as_str()).unwrap_or("none"),
            "Match recorded"
        );
        Ok(record.into())
    }

    /// Spymasters of the most recently created match
    #[instrument(skip(self))]
    pub async fn current_spymasters(&self) -> Result<CurrentSpymastersResponse, AppError> {
        let latest = self
            .repository
            .list_matches(SortOrder::NewestFirst, Some(1))
            .await?
            .into_iter()
            .next();

        Ok(match latest {
            Some(record) => CurrentSpymastersResponse {
                red_spymaster: Some(record.red_spymaster),
                blue_spymaster: Some(record.blue_spymaster),
            },
            None => CurrentSpymastersResponse {
                red_spymaster: None,
                blue_spymaster: None,
            },
        })
    }

    /// Most recent matches, newest first
    #[instrument(skip(self))]
    pub async fn history(&self, limit: u32) -> Result<Vec<MatchResponse>, AppError> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        let records = self
            .repository
            .list_matches(SortOrder::NewestFirst, Some(limit))
            .await?;

        debug!(count = records.len(), limit, "History loaded");
        Ok(records.into_iter().map(MatchResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn delete_match(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete_match(id).await?;
        info!(match_id = id, "Match deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn clear_matches(&self) -> Result<u64, AppError> {
        let removed = self.repository.delete_all().await?;
        info!(removed, "All matches cleared");
        Ok(removed)
    }
}

/// Turns a raw request into a storable match, rejecting missing spymasters
/// and unknown winners before anything reaches storage
fn validate_request(request: RecordMatchRequest) -> Result<NewMatch, AppError> {
    let red_spymaster = required_name(request.red_spymaster);
    let blue_spymaster = required_name(request.blue_spymaster);

    let (red_spymaster, blue_spymaster) = match (red_spymaster, blue_spymaster) {
        (Some(red), Some(blue)) => (red, blue),
        _ => {
            return Err(AppError::Validation(
                "Both spymasters are required".to_string(),
            ))
        }
    };

    let winner = match request.winner.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(Side::parse(value).ok_or_else(|| {
            AppError::Validation(format!("Unknown winner '{}', expected red or blue", value))
        })?),
    };

    Ok(NewMatch {
        red_spymaster,
        blue_spymaster,
        red_team: clean_team(request.red_team),
        blue_team: clean_team(request.blue_team),
        winner,
        black_card: required_name(request.black_card),
        created_at: Utc::now(),
    })
}

fn required_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

fn clean_team(team: Option<Vec<String>>) -> Vec<String> {
    team.unwrap_or_default()
        .into_iter()
        .filter_map(|name| required_name(Some(name)))
        .collect()
}
