pub mod migrations;

pub use migrations::run_migrations;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::{info, instrument};

use crate::shared::AppError;

/// Opens a connection pool. In-memory databases are private to a single
/// connection, so they get a pool of one.
#[instrument]
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let in_memory = database_url.contains(":memory:");
    let max_connections = if in_memory { 1 } else { 5 };

    let mut options = SqlitePoolOptions::new().max_connections(max_connections);
    if in_memory {
        // Dropping the only connection would drop the database with it
        options = options.idle_timeout(None).max_lifetime(None);
    }

    let pool = options.connect(database_url).await?;

    info!(max_connections, "Connected to database");
    Ok(pool)
}

/// Connects and applies pending migrations
pub async fn connect_and_migrate(database_url: &str) -> Result<SqlitePool, AppError> {
    let pool = connect(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
