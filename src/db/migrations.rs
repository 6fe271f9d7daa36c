use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use crate::shared::AppError;

/// A single schema change. Every step checks whether it has already been
/// applied, so the whole list can run on every startup.
#[derive(Debug, Clone, Copy)]
pub enum Migration {
    CreateTable {
        table: &'static str,
        definition: &'static str,
    },
    AddColumn {
        table: &'static str,
        column: &'static str,
        definition: &'static str,
    },
    CreateIndex {
        name: &'static str,
        table: &'static str,
        columns: &'static str,
    },
}

/// Schema history, applied in order
pub const MIGRATIONS: &[Migration] = &[
    Migration::CreateTable {
        table: "spymasters",
        definition: "id INTEGER PRIMARY KEY AUTOINCREMENT, \
                     red_spymaster TEXT NOT NULL, \
                     blue_spymaster TEXT NOT NULL, \
                     winner TEXT, \
                     created_at DATETIME DEFAULT CURRENT_TIMESTAMP",
    },
    Migration::AddColumn {
        table: "spymasters",
        column: "red_team",
        definition: "TEXT",
    },
    Migration::AddColumn {
        table: "spymasters",
        column: "blue_team",
        definition: "TEXT",
    },
    Migration::AddColumn {
        table: "spymasters",
        column: "black_card",
        definition: "TEXT",
    },
    Migration::CreateIndex {
        name: "idx_spymasters_created_at",
        table: "spymasters",
        columns: "julianday(created_at), id",
    },
];

impl Migration {
    fn describe(&self) -> String {
        match self {
            Migration::CreateTable { table, .. } => format!("create table {}", table),
            Migration::AddColumn { table, column, .. } => {
                format!("add column {}.{}", table, column)
            }
            Migration::CreateIndex { name, .. } => format!("create index {}", name),
        }
    }

    /// Applies the step if needed, returning whether anything changed
    async fn apply(&self, pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        match self {
            Migration::CreateTable { table, definition } => {
                if table_exists(pool, table).await? {
                    return Ok(false);
                }
                sqlx::query(&format!("CREATE TABLE {} ({})", table, definition))
                    .execute(pool)
                    .await?;
            }
            Migration::AddColumn {
                table,
                column,
                definition,
            } => {
                if column_exists(pool, table, column).await? {
                    return Ok(false);
                }
                sqlx::query(&format!(
                    "ALTER TABLE {} ADD COLUMN {} {}",
                    table, column, definition
                ))
                .execute(pool)
                .await?;
            }
            Migration::CreateIndex {
                name,
                table,
                columns,
            } => {
                if index_exists(pool, name).await? {
                    return Ok(false);
                }
                sqlx::query(&format!("CREATE INDEX {} ON {} ({})", name, table, columns))
                    .execute(pool)
                    .await?;
            }
        }
        Ok(true)
    }
}

async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

async fn index_exists(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?")
            .bind(name)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

pub async fn column_exists(
    pool: &SqlitePool,
    table: &str,
    column: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// Brings the schema up to date. Returns the number of steps that changed it.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize, AppError> {
    let mut applied = 0;

    for migration in MIGRATIONS {
        let changed = migration.apply(pool).await.map_err(|e| {
            warn!(error = %e, migration = %migration.describe(), "Migration failed");
            AppError::from(e)
        })?;

        if changed {
            debug!(migration = %migration.describe(), "Migration applied");
            applied += 1;
        }
    }

    info!(applied, total = MIGRATIONS.len(), "Schema is up to date");
    Ok(applied)
}
