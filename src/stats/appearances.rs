use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::matches::{MatchRecord, Side};

use super::models::{SideTotals, SpymasterAppearance};

/// Counts decided matches won by each side
pub fn side_totals(records: &[MatchRecord]) -> SideTotals {
    records
        .iter()
        .fold(SideTotals::default(), |mut totals, record| {
            match record.winner {
                Some(Side::Red) => totals.red += 1,
                Some(Side::Blue) => totals.blue += 1,
                None => {}
            }
            totals
        })
}

/// How often and how recently each name was recorded as a spymaster.
///
/// Uses the stored spymaster fields of every record, decided or not.
/// Most frequent first, ties by name.
pub fn spymaster_appearances(
    records: &[MatchRecord],
    now: DateTime<Utc>,
) -> Vec<SpymasterAppearance> {
    let mut seen: HashMap<&str, (u32, DateTime<Utc>)> = HashMap::new();

    for record in records {
        for side in [Side::Red, Side::Blue] {
            let name = record.spymaster(side);
            if name.is_empty() {
                continue;
            }
            let (count, last) = seen.entry(name).or_insert((0, record.created_at));
            *count += 1;
            *last = (*last).max(record.created_at);
        }
    }

    let mut appearances: Vec<SpymasterAppearance> = seen
        .into_iter()
        .map(|(name, (times, last))| SpymasterAppearance {
            name: name.to_string(),
            times_as_spymaster: times,
            last_spymaster_date: last,
            days_since_last_spymaster: (now - last).num_days().max(0),
        })
        .collect();

    appearances.sort_by(|a, b| {
        b.times_as_spymaster
            .cmp(&a.times_as_spymaster)
            .then_with(|| a.name.cmp(&b.name))
    });
    appearances
}
