use chrono::{Duration, TimeZone, Utc};
use sqlx::SqlitePool;

use spymasters::{
    db,
    matches::{NewMatch, Side, SortOrder},
    AppError, MatchRepository, SqliteMatchRepository, StatsService,
};
use std::sync::Arc;

async fn migrated_pool() -> SqlitePool {
    db::connect_and_migrate("sqlite::memory:")
        .await
        .expect("in-memory database should open")
}

fn new_match(minutes: i64, red: &[&str], blue: &[&str], winner: Option<Side>) -> NewMatch {
    NewMatch {
        red_spymaster: red[0].to_string(),
        blue_spymaster: blue[0].to_string(),
        red_team: red.iter().map(|s| s.to_string()).collect(),
        blue_team: blue.iter().map(|s| s.to_string()).collect(),
        winner,
        black_card: Some("assassin-victim".to_string()),
        created_at: Utc.with_ymd_and_hms(2024, 4, 1, 18, 0, 0).unwrap()
            + Duration::minutes(minutes),
    }
}

#[tokio::test]
async fn insert_and_read_back() {
    let repo = SqliteMatchRepository::new(migrated_pool().await);

    let stored = repo
        .insert_match(&new_match(0, &["alice", "bob"], &["carol"], Some(Side::Blue)))
        .await
        .unwrap();

    let records = repo.list_matches(SortOrder::OldestFirst, None).await.unwrap();
    assert_eq!(records, vec![stored]);
    assert_eq!(records[0].red_team, vec!["alice", "bob"]);
    assert_eq!(records[0].winner, Some(Side::Blue));
    assert_eq!(records[0].black_card.as_deref(), Some("assassin-victim"));
}

#[tokio::test]
async fn ordering_uses_creation_time() {
    let repo = SqliteMatchRepository::new(migrated_pool().await);
    repo.insert_match(&new_match(20, &["late"], &["x"], Some(Side::Red)))
        .await
        .unwrap();
    repo.insert_match(&new_match(0, &["early"], &["x"], Some(Side::Red)))
        .await
        .unwrap();
    repo.insert_match(&new_match(10, &["undecided"], &["x"], None))
        .await
        .unwrap();

    let newest = repo
        .list_matches(SortOrder::NewestFirst, Some(2))
        .await
        .unwrap();
    let names: Vec<&str> = newest.iter().map(|r| r.red_spymaster.as_str()).collect();
    assert_eq!(names, vec!["late", "undecided"]);

    let completed = repo.list_completed_matches().await.unwrap();
    let names: Vec<&str> = completed.iter().map(|r| r.red_spymaster.as_str()).collect();
    assert_eq!(names, vec!["early", "late"]);
}

#[tokio::test]
async fn delete_unknown_id_leaves_store_unchanged() {
    let repo = SqliteMatchRepository::new(migrated_pool().await);
    let stored = repo
        .insert_match(&new_match(0, &["alice"], &["carol"], None))
        .await
        .unwrap();

    let result = repo.delete_match(stored.id + 100).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(
        repo.list_matches(SortOrder::OldestFirst, None)
            .await
            .unwrap()
            .len(),
        1
    );

    repo.delete_match(stored.id).await.unwrap();
    assert_eq!(repo.delete_all().await.unwrap(), 0);
}

#[tokio::test]
async fn legacy_and_malformed_rows_degrade_gracefully() {
    let pool = migrated_pool().await;

    // Row written before team columns existed
    sqlx::query(
        "INSERT INTO spymasters (red_spymaster, blue_spymaster, winner, created_at) VALUES ('alice', 'carol', 'red', '2024-01-01 10:00:00')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO spymasters (red_spymaster, blue_spymaster, red_team, blue_team, winner, created_at) VALUES ('bob', 'dave', 'not json', '[\"dave\", \"erin\"]', 'blue', '2024-01-02 10:00:00')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO spymasters (red_spymaster, blue_spymaster, winner, created_at) VALUES ('x', 'y', 'green', '2024-01-03 10:00:00')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let repo = Arc::new(SqliteMatchRepository::new(pool));
    let records = repo.list_matches(SortOrder::OldestFirst, None).await.unwrap();
    assert_eq!(records.len(), 3);
    assert!(records[0].red_team.is_empty());
    assert!(records[1].red_team.is_empty());
    assert_eq!(records[1].blue_team, vec!["dave", "erin"]);
    assert_eq!(records[2].winner, None);

    // Unknown winner values are not treated as decided
    assert_eq!(repo.list_completed_matches().await.unwrap().len(), 2);

    let stats = StatsService::new(repo).advanced_stats().await.unwrap();
    let names: Vec<&str> = stats
        .all_player_stats
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["alice", "carol", "bob", "dave", "erin"]);

    let leaders: Vec<&str> = stats
        .most_wins_as_spymaster
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(leaders, vec!["alice", "dave"]);
}

#[tokio::test]
async fn mixed_timestamp_formats_sort_by_instant() {
    let pool = migrated_pool().await;

    // Older match in RFC 3339, newer one in the CURRENT_TIMESTAMP layout
    sqlx::query(
        "INSERT INTO spymasters (red_spymaster, blue_spymaster, winner, created_at) VALUES ('A', 'C', 'red', '2024-01-01T12:00:00Z')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO spymasters (red_spymaster, blue_spymaster, winner, created_at) VALUES ('A', 'C', 'blue', '2024-01-01 13:00:00')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let repo = Arc::new(SqliteMatchRepository::new(pool));
    let completed = repo.list_completed_matches().await.unwrap();
    let winners: Vec<Option<Side>> = completed.iter().map(|r| r.winner).collect();
    assert_eq!(winners, vec![Some(Side::Red), Some(Side::Blue)]);

    let newest = repo
        .list_matches(SortOrder::NewestFirst, Some(1))
        .await
        .unwrap();
    assert_eq!(newest[0].winner, Some(Side::Blue));

    let stats = StatsService::new(repo).advanced_stats().await.unwrap();
    let streak = |name: &str| {
        stats
            .all_player_stats
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.current_spymaster_streak)
    };
    // A's most recent match was a loss
    assert_eq!(streak("A"), Some(0));
    assert_eq!(streak("C"), Some(1));
}

#[tokio::test]
async fn unreadable_timestamp_row_is_skipped() {
    let pool = migrated_pool().await;

    sqlx::query(
        "INSERT INTO spymasters (red_spymaster, blue_spymaster, winner, created_at) VALUES ('alice', 'carol', 'red', '2024-01-01 10:00:00')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO spymasters (red_spymaster, blue_spymaster, winner, created_at) VALUES ('bob', 'dave', 'blue', 'yesterday')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let repo = Arc::new(SqliteMatchRepository::new(pool));
    let records = repo.list_matches(SortOrder::OldestFirst, None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].red_spymaster, "alice");

    let service = StatsService::new(repo);
    let totals = service.side_totals().await.unwrap();
    assert_eq!((totals.red, totals.blue), (1, 0));

    let stats = service.advanced_stats().await.unwrap();
    let names: Vec<&str> = stats
        .all_player_stats
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["alice", "carol"]);
}
