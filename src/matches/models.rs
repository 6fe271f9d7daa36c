use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Text format used for the `created_at` column. Matches SQLite's
/// `CURRENT_TIMESTAMP` layout so old and new rows sort together.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One of the two teams in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }

    /// Parses the stored representation; anything unrecognised is `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "red" => Some(Side::Red),
            "blue" => Some(Side::Blue),
            _ => None,
        }
    }
}

/// A stored match record
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id: i64,
    pub red_spymaster: String,
    pub blue_spymaster: String,
    pub red_team: Vec<String>,
    pub blue_team: Vec<String>,
    pub winner: Option<Side>,
    pub black_card: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn spymaster(&self, side: Side) -> &str {
        match side {
            Side::Red => &self.red_spymaster,
            Side::Blue => &self.blue_spymaster,
        }
    }

    pub fn team(&self, side: Side) -> &[String] {
        match side {
            Side::Red => &self.red_team,
            Side::Blue => &self.blue_team,
        }
    }
}

/// A match that has passed validation but has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub red_spymaster: String,
    pub blue_spymaster: String,
    pub red_team: Vec<String>,
    pub blue_team: Vec<String>,
    pub winner: Option<Side>,
    pub black_card: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewMatch {
    pub fn into_record(self, id: i64) -> MatchRecord {
        MatchRecord {
            id,
            red_spymaster: self.red_spymaster,
            blue_spymaster: self.blue_spymaster,
            red_team: self.red_team,
            blue_team: self.blue_team,
            winner: self.winner,
            black_card: self.black_card,
            created_at: self.created_at,
        }
    }
}

/// Retrieval order by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    OldestFirst,
    NewestFirst,
}

/// Database row for the spymasters table
#[derive(Debug, Clone, FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub red_spymaster: String,
    pub blue_spymaster: String,
    pub red_team: Option<String>, // JSON array of names, NULL on rows from before team tracking
    pub blue_team: Option<String>,
    pub winner: Option<String>,
    pub black_card: Option<String>,
    pub created_at: String,
}

impl MatchRow {
    /// Converts a raw row into a record. Team columns that are missing or
    /// not a JSON list of strings read as empty; an unknown winner reads as none.
    pub fn into_record(self) -> Option<MatchRecord> {
        let created_at = parse_timestamp(&self.created_at)?;

        Some(MatchRecord {
            id: self.id,
            red_spymaster: self.red_spymaster,
            blue_spymaster: self.blue_spymaster,
            red_team: decode_team(self.red_team.as_deref()),
            blue_team: decode_team(self.blue_team.as_deref()),
            winner: self.winner.as_deref().and_then(Side::parse),
            black_card: self.black_card,
            created_at,
        })
    }
}

pub fn decode_team(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|json| serde_json::from_str::<Vec<String>>(json).ok())
        .unwrap_or_default()
}

pub fn encode_team(team: &[String]) -> String {
    serde_json::Value::from(team.to_vec()).to_string()
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts both the stored layout and RFC 3339
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
