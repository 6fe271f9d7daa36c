use std::collections::HashSet;

use crate::matches::{MatchRecord, Side};

use super::models::NormalizedMatch;

/// A team split into its spymaster and operatives
struct Roster {
    spymaster: Option<String>,
    operatives: Vec<String>,
}

impl Roster {
    /// The first listed member leads the team, even when the stored
    /// spymaster name says otherwise. With no members listed the stored
    /// name is used and there are no operatives.
    fn from_record(record: &MatchRecord, side: Side) -> Self {
        match record.team(side).split_first() {
            Some((first, rest)) => Self {
                spymaster: non_empty(first),
                operatives: rest.iter().filter_map(|name| non_empty(name)).collect(),
            },
            None => Self {
                spymaster: non_empty(record.spymaster(side)),
                operatives: Vec::new(),
            },
        }
    }

    fn members(&self) -> impl Iterator<Item = &String> {
        self.spymaster.iter().chain(self.operatives.iter())
    }
}

fn non_empty(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_string())
}

/// Reduces a record to winners and losers by role. Undecided matches
/// return `None` and take no part in statistics.
pub fn normalize(record: &MatchRecord) -> Option<NormalizedMatch> {
    let winner = record.winner?;

    let red = Roster::from_record(record, Side::Red);
    let blue = Roster::from_record(record, Side::Blue);

    let mut seen = HashSet::new();
    let participants = red
        .members()
        .chain(blue.members())
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect();

    let (winners, losers) = match winner {
        Side::Red => (red, blue),
        Side::Blue => (blue, red),
    };

    Some(NormalizedMatch {
        winning_spymaster: winners.spymaster,
        winning_operatives: winners.operatives,
        losing_spymaster: losers.spymaster,
        losing_operatives: losers.operatives,
        participants,
    })
}
