use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::models::{MatchRecord, Side};

/// Request payload for recording a match
///
/// Every field is optional at the wire level so that missing spymasters
/// surface as a validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatchRequest {
    pub red_spymaster: Option<String>,
    pub blue_spymaster: Option<String>,
    #[serde(default, deserialize_with = "lenient_team")]
    pub red_team: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_team")]
    pub blue_team: Option<Vec<String>>,
    pub winner: Option<String>,
    pub black_card: Option<String>,
}

/// Anything other than a list of strings reads as no team
fn lenient_team<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Query parameters for the history endpoint
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// A match as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: i64,
    pub red_spymaster: String,
    pub blue_spymaster: String,
    pub red_team: Vec<String>,
    pub blue_team: Vec<String>,
    pub winner: Option<Side>,
    pub black_card: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MatchRecord> for MatchResponse {
    fn from(record: MatchRecord) -> Self {
        Self {
            id: record.id,
            red_spymaster: record.red_spymaster,
            blue_spymaster: record.blue_spymaster,
            red_team: record.red_team,
            blue_team: record.blue_team,
            winner: record.winner,
            black_card: record.black_card,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatchResponse {
    pub message: String,
    #[serde(rename = "match")]
    pub recorded: MatchResponse,
}

/// Spymasters of the most recent match, both `None` when nothing is recorded
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSpymastersResponse {
    pub red_spymaster: Option<String>,
    pub blue_spymaster: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<MatchResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: u64,
}
