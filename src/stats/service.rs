use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    accumulator::accumulate,
    appearances::{side_totals, spymaster_appearances},
    leaderboard::extract,
    models::{AdvancedStats, NormalizedMatch, SideTotals, SpymasterAppearance},
    normalizer::normalize,
};
use crate::{
    matches::{MatchRepository, SortOrder},
    shared::AppError,
};

/// Derives statistics from the stored match history. Nothing is cached:
/// every call reads a fresh snapshot and recomputes from scratch.
pub struct StatsService {
    repository: Arc<dyn MatchRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn MatchRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn side_totals(&self) -> Result<SideTotals, AppError> {
        let records = self.repository.list_completed_matches().await?;
        let totals = side_totals(&records);

        debug!(red = totals.red, blue = totals.blue, "Side totals computed");
        Ok(totals)
    }

    #[instrument(skip(self))]
    pub async fn advanced_stats(&self) -> Result<AdvancedStats, AppError> {
        // Oldest first: streaks only make sense in chronological order
        let records = self.repository.list_completed_matches().await?;

        let normalized: Vec<NormalizedMatch> = records.iter().filter_map(normalize).collect();
        let table = accumulate(&normalized);

        info!(
            matches = normalized.len(),
            players = table.len(),
            "Player statistics accumulated"
        );
        Ok(extract(table.into_players()))
    }

    #[instrument(skip(self))]
    pub async fn spymaster_appearances(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<SpymasterAppearance>, AppError> {
        let records = self
            .repository
            .list_matches(SortOrder::OldestFirst, None)
            .await?;
        let appearances = spymaster_appearances(&records, now);

        debug!(spymasters = appearances.len(), "Spymaster appearances computed");
        Ok(appearances)
    }
}
