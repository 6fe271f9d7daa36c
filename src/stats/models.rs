use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A decided match reduced to who won and who lost, in each role
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatch {
    pub winning_spymaster: Option<String>,
    pub winning_operatives: Vec<String>,
    pub losing_spymaster: Option<String>,
    pub losing_operatives: Vec<String>,
    /// Every distinct name on either team, red side first
    pub participants: Vec<String>,
}

/// Cumulative and streak statistics for one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub name: String,
    pub wins_as_spymaster: u32,
    pub wins_as_operative: u32,
    pub current_spymaster_streak: u32,
    pub max_spymaster_streak: u32,
    pub current_operative_streak: u32,
    pub max_operative_streak: u32,
    pub current_overall_streak: u32,
    pub max_overall_streak: u32,
}

impl PlayerStat {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn record_spymaster_win(&mut self) {
        self.wins_as_spymaster += 1;
        self.current_spymaster_streak += 1;
        self.max_spymaster_streak = self.max_spymaster_streak.max(self.current_spymaster_streak);
        self.extend_overall_streak();
    }

    pub fn record_operative_win(&mut self) {
        self.wins_as_operative += 1;
        self.current_operative_streak += 1;
        self.max_operative_streak = self.max_operative_streak.max(self.current_operative_streak);
        self.extend_overall_streak();
    }

    /// Breaks the spymaster and overall streaks; the operative streak survives
    pub fn record_spymaster_loss(&mut self) {
        self.current_spymaster_streak = 0;
        self.current_overall_streak = 0;
    }

    /// Breaks the operative and overall streaks; the spymaster streak survives
    pub fn record_operative_loss(&mut self) {
        self.current_operative_streak = 0;
        self.current_overall_streak = 0;
    }

    fn extend_overall_streak(&mut self) {
        self.current_overall_streak += 1;
        self.max_overall_streak = self.max_overall_streak.max(self.current_overall_streak);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinsEntry {
    pub name: String,
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakEntry {
    pub name: String,
    pub streak: u32,
}

/// Leaders for each tracked metric plus the full player table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedStats {
    pub most_wins_as_spymaster: Vec<WinsEntry>,
    pub most_wins_as_operative: Vec<WinsEntry>,
    pub highest_spymaster_streak: Vec<StreakEntry>,
    pub highest_operative_streak: Vec<StreakEntry>,
    pub highest_overall_streak: Vec<StreakEntry>,
    pub all_player_stats: Vec<PlayerStat>,
}

/// Matches won per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTotals {
    pub red: u64,
    pub blue: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpymasterAppearance {
    pub name: String,
    pub times_as_spymaster: u32,
    pub last_spymaster_date: DateTime<Utc>,
    pub days_since_last_spymaster: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerAppearancesResponse {
    pub players: Vec<SpymasterAppearance>,
}
