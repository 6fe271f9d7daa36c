use super::models::{AdvancedStats, PlayerStat, StreakEntry, WinsEntry};

/// Every player tied at the highest value of `metric`, in table order.
/// Nobody leads a metric that no one has scored in.
fn leaders<F>(players: &[PlayerStat], metric: F) -> Vec<(String, u32)>
where
    F: Fn(&PlayerStat) -> u32,
{
    let best = players.iter().map(&metric).max().unwrap_or(0);
    if best == 0 {
        return Vec::new();
    }

    players
        .iter()
        .filter(|player| metric(*player) == best)
        .map(|player| (player.name.clone(), best))
        .collect()
}

fn wins_leaders<F>(players: &[PlayerStat], metric: F) -> Vec<WinsEntry>
where
    F: Fn(&PlayerStat) -> u32,
{
    leaders(players, metric)
        .into_iter()
        .map(|(name, wins)| WinsEntry { name, wins })
        .collect()
}

fn streak_leaders<F>(players: &[PlayerStat], metric: F) -> Vec<StreakEntry>
where
    F: Fn(&PlayerStat) -> u32,
{
    leaders(players, metric)
        .into_iter()
        .map(|(name, streak)| StreakEntry { name, streak })
        .collect()
}

/// Builds the leaderboards for each metric from a finished player table
pub fn extract(players: Vec<PlayerStat>) -> AdvancedStats {
    AdvancedStats {
        most_wins_as_spymaster: wins_leaders(&players, |p| p.wins_as_spymaster),
        most_wins_as_operative: wins_leaders(&players, |p| p.wins_as_operative),
        highest_spymaster_streak: streak_leaders(&players, |p| p.max_spymaster_streak),
        highest_operative_streak: streak_leaders(&players, |p| p.max_operative_streak),
        highest_overall_streak: streak_leaders(&players, |p| p.max_overall_streak),
        all_player_stats: players,
    }
}
