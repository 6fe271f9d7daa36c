use serde_json::{json, Value};

// ============================================================================
// Match Request Builder
// ============================================================================

/// Builds JSON bodies for `POST /api/spymasters`
pub struct MatchBuilder {
    red_team: Vec<String>,
    blue_team: Vec<String>,
    red_spymaster: Option<String>,
    blue_spymaster: Option<String>,
    winner: Option<String>,
    black_card: Option<String>,
}

#[allow(dead_code)]
impl MatchBuilder {
    pub fn new() -> Self {
        Self {
            red_team: vec![],
            blue_team: vec![],
            red_spymaster: None,
            blue_spymaster: None,
            winner: None,
            black_card: None,
        }
    }

    /// Sets the red roster; the first name also becomes the stored spymaster
    pub fn red(mut self, team: &[&str]) -> Self {
        self.red_team = team.iter().map(|s| s.to_string()).collect();
        self.red_spymaster = team.first().map(|s| s.to_string());
        self
    }

    pub fn blue(mut self, team: &[&str]) -> Self {
        self.blue_team = team.iter().map(|s| s.to_string()).collect();
        self.blue_spymaster = team.first().map(|s| s.to_string());
        self
    }

    pub fn red_spymaster(mut self, name: &str) -> Self {
        self.red_spymaster = Some(name.to_string());
        self
    }

    pub fn blue_spymaster(mut self, name: &str) -> Self {
        self.blue_spymaster = Some(name.to_string());
        self
    }

    pub fn red_wins(mut self) -> Self {
        self.winner = Some("red".to_string());
        self
    }

    pub fn blue_wins(mut self) -> Self {
        self.winner = Some("blue".to_string());
        self
    }

    pub fn black_card(mut self, name: &str) -> Self {
        self.black_card = Some(name.to_string());
        self
    }

    pub fn build(self) -> Value {
        let mut body = json!({
            "redTeam": self.red_team,
            "blueTeam": self.blue_team,
        });
        if let Some(name) = self.red_spymaster {
            body["redSpymaster"] = json!(name);
        }
        if let Some(name) = self.blue_spymaster {
            body["blueSpymaster"] = json!(name);
        }
        if let Some(winner) = self.winner {
            body["winner"] = json!(winner);
        }
        if let Some(name) = self.black_card {
            body["blackCard"] = json!(name);
        }
        body
    }
}
