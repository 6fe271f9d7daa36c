use std::collections::HashMap;

use super::models::{NormalizedMatch, PlayerStat};

/// Player statistics in first-appearance order
///
/// Built fresh for every computation and handed back by value.
#[derive(Debug, Default)]
pub struct PlayerTable {
    players: Vec<PlayerStat>,
    index: HashMap<String, usize>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `name`, creating a zeroed one on first sight
    pub fn entry(&mut self, name: &str) -> &mut PlayerStat {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                self.players.push(PlayerStat::new(name));
                self.index.insert(name.to_string(), self.players.len() - 1);
                self.players.len() - 1
            }
        };
        &mut self.players[position]
    }

    pub fn get(&self, name: &str) -> Option<&PlayerStat> {
        self.index.get(name).map(|&position| &self.players[position])
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerStat] {
        &self.players
    }

    pub fn into_players(self) -> Vec<PlayerStat> {
        self.players
    }

    /// Folds one decided match into the table. Winners are credited before
    /// losers are reset, so a name on both sides ends the match on a loss.
    pub fn apply(&mut self, normalized: &NormalizedMatch) {
        for name in &normalized.participants {
            self.entry(name);
        }

        if let Some(spymaster) = &normalized.winning_spymaster {
            self.entry(spymaster).record_spymaster_win();
        }

        for operative in &normalized.winning_operatives {
            self.entry(operative).record_operative_win();
        }

        if let Some(spymaster) = &normalized.losing_spymaster {
            self.entry(spymaster).record_spymaster_loss();
        }

        for operative in &normalized.losing_operatives {
            self.entry(operative).record_operative_loss();
        }
    }
}

/// Folds decided matches, oldest first, into a new player table
pub fn accumulate<'a, I>(matches: I) -> PlayerTable
where
    I: IntoIterator<Item = &'a NormalizedMatch>,
{
    matches
        .into_iter()
        .fold(PlayerTable::new(), |mut table, normalized| {
            table.apply(normalized);
            table
        })
}
