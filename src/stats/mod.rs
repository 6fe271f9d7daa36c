pub mod accumulator;
pub mod appearances;
mod handlers;
pub mod leaderboard;
pub mod models;
pub mod normalizer;
pub mod service;

pub use accumulator::{accumulate, PlayerTable};
pub use handlers::{get_advanced_stats, get_side_totals, get_spymaster_appearances};
pub use leaderboard::extract;
pub use models::*;
pub use normalizer::normalize;
pub use service::StatsService;
