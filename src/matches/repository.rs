use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{
    encode_team, format_timestamp, MatchRecord, MatchRow, NewMatch, SortOrder,
};
use crate::shared::AppError;

/// Trait for match record storage
#[async_trait]
pub trait MatchRepository {
    async fn insert_match(&self, new_match: &NewMatch) -> Result<MatchRecord, AppError>;

    /// Removes one record, `AppError::NotFound` if the id is unknown
    async fn delete_match(&self, id: i64) -> Result<(), AppError>;

    /// Removes every record and returns how many were deleted
    async fn delete_all(&self) -> Result<u64, AppError>;

    /// Records ordered by creation time (ties by id), optionally limited
    async fn list_matches(
        &self,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Result<Vec<MatchRecord>, AppError>;

    /// Records with a recorded winner, oldest first
    async fn list_completed_matches(&self) -> Result<Vec<MatchRecord>, AppError>;
}

/// In-memory implementation of MatchRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryMatchRepository {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i64,
    records: Vec<MatchRecord>,
}

impl InMemoryMatchRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current number of stored records
    pub async fn match_count(&self) -> usize {
        self.state.read().await.records.len()
    }
}

fn sort_records(records: &mut [MatchRecord], order: SortOrder) {
    records.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    if order == SortOrder::NewestFirst {
        records.reverse();
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, new_match))]
    async fn insert_match(&self, new_match: &NewMatch) -> Result<MatchRecord, AppError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let record = new_match.clone().into_record(state.next_id);
        state.records.push(record.clone());

        debug!(match_id = record.id, "Match stored in memory");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|record| record.id != id);

        if state.records.len() == before {
            warn!(match_id = id, "Match not found for deletion in memory");
            return Err(AppError::NotFound(format!("Match {} not found", id)));
        }

        debug!(match_id = id, "Match deleted from memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        let removed = state.records.len() as u64;
        state.records.clear();

        debug!(removed, "All matches deleted from memory");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn list_matches(
        &self,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Result<Vec<MatchRecord>, AppError> {
        let mut records = self.state.read().await.records.clone();
        sort_records(&mut records, order);
        if let Some(limit) = limit {
            records.truncate(limit as usize);
        }
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn list_completed_matches(&self) -> Result<Vec<MatchRecord>, AppError> {
        let mut records: Vec<MatchRecord> = self
            .state
            .read()
            .await
            .records
            .iter()
            .filter(|record| record.winner.is_some())
            .cloned()
            .collect();
        sort_records(&mut records, SortOrder::OldestFirst);
        Ok(records)
    }
}

// Rows are ordered by `julianday(created_at)` rather than the raw text so that
// RFC 3339 values and the `CURRENT_TIMESTAMP` layout interleave by instant.
const SELECT_COLUMNS: &str = "SELECT id, red_spymaster, blue_spymaster, red_team, blue_team, winner, black_card, created_at FROM spymasters";

/// SQLite implementation of match repository
pub struct SqliteMatchRepository {
    pool: SqlitePool,
}

impl SqliteMatchRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Rows whose timestamp cannot be read are skipped
    fn into_records(rows: Vec<MatchRow>) -> Vec<MatchRecord> {
        rows.into_iter()
            .filter_map(|row| {
                let id = row.id;
                let created_at = row.created_at.clone();
                let record = row.into_record();
                if record.is_none() {
                    warn!(
                        match_id = id,
                        %created_at,
                        "Skipping match with unreadable timestamp"
                    );
                }
                record
            })
            .collect()
    }
}

#[async_trait]
impl MatchRepository for SqliteMatchRepository {
    #[instrument(skip(self, new_match))]
    async fn insert_match(&self, new_match: &NewMatch) -> Result<MatchRecord, AppError> {
        debug!(
            red_spymaster = %new_match.red_spymaster,
            blue_spymaster = %new_match.blue_spymaster,
            "Inserting match into database"
        );

        let result = sqlx::query(
            "INSERT INTO spymasters (red_spymaster, blue_spymaster, red_team, blue_team, winner, black_card, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_match.red_spymaster)
        .bind(&new_match.blue_spymaster)
        .bind(encode_team(&new_match.red_team))
        .bind(encode_team(&new_match.blue_team))
        .bind(new_match.winner.map(|side| side.as_str()))
        .bind(&new_match.black_card)
        .bind(format_timestamp(&new_match.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to insert match into database");
            AppError::from(e)
        })?;

        let id = result.last_insert_rowid();
        debug!(match_id = id, "Match inserted into database");
        Ok(new_match.clone().into_record(id))
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM spymasters WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, match_id = id, "Failed to delete match from database");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            warn!(match_id = id, "Match not found for deletion in database");
            return Err(AppError::NotFound(format!("Match {} not found", id)));
        }

        debug!(match_id = id, "Match deleted from database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM spymasters")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to clear matches in database");
                AppError::from(e)
            })?;

        debug!(removed = result.rows_affected(), "All matches deleted from database");
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_matches(
        &self,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Result<Vec<MatchRecord>, AppError> {
        let direction = match order {
            SortOrder::OldestFirst => "ASC",
            SortOrder::NewestFirst => "DESC",
        };
        // SQLite treats a negative LIMIT as no limit
        let limit = limit.map(i64::from).unwrap_or(-1);
        let sql = format!(
            "{} ORDER BY julianday(created_at) {dir}, id {dir} LIMIT ?",
            SELECT_COLUMNS,
            dir = direction
        );

        let rows: Vec<MatchRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list matches from database");
                AppError::from(e)
            })?;

        Ok(Self::into_records(rows))
    }

    #[instrument(skip(self))]
    async fn list_completed_matches(&self) -> Result<Vec<MatchRecord>, AppError> {
        let sql = format!(
            "{} WHERE winner IS NOT NULL ORDER BY julianday(created_at) ASC, id ASC",
            SELECT_COLUMNS
        );

        let rows: Vec<MatchRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list completed matches from database");
                AppError::from(e)
            })?;

        // Rows with an unrecognised winner value count as undecided
        Ok(Self::into_records(rows)
            .into_iter()
            .filter(|record| record.winner.is_some())
            .collect())
    }
}
