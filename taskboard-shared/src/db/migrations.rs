/// Schema migrations
///
/// The SQL files under `migrations/` at the workspace root are embedded at
/// compile time. They create `users`, `categories` and `tasks`, and the
/// read functions the task queries call (`get_all_tasks`,
/// `get_completed_tasks`, `get_incomplete_tasks`, `get_tasks_in_category`,
/// `get_task_by_id`).
///
/// The server runs them at startup when `DATABASE_RUN_MIGRATIONS` is true:
/// [`ensure_database_exists`], then [`run_migrations`], then
/// [`get_migration_status`] for the log line.

use sqlx::migrate::{MigrateDatabase, Migrator};
use sqlx::postgres::PgPool;
use sqlx::Postgres;
use tracing::{info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Applied versus embedded migrations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migrations recorded as successfully applied
    pub applied: usize,

    /// Embedded migrations not yet applied
    pub pending: usize,

    /// Highest applied version, if any
    pub latest_version: Option<i64>,
}

impl MigrationStatus {
    /// True when every embedded migration has been applied
    pub fn is_current(&self) -> bool {
        self.pending == 0
    }
}

/// Applies every pending migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(embedded = MIGRATOR.iter().count(), "Applying database migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        warn!("Migration failed: {}", e);
        e
    })
}

/// Compares the embedded migrations with the `_sqlx_migrations` table
///
/// Before the first run the table does not exist and everything is pending.
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let tracked: bool =
        sqlx::query_scalar("SELECT to_regclass('public._sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let applied_versions: Vec<i64> = if tracked {
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
            .fetch_all(pool)
            .await?
    } else {
        Vec::new()
    };

    let pending = MIGRATOR
        .iter()
        .filter(|migration| !applied_versions.contains(&migration.version))
        .count();

    Ok(MigrationStatus {
        applied: applied_versions.len(),
        pending,
        latest_version: applied_versions.last().copied(),
    })
}

/// Creates the database named by `database_url` when it is missing
///
/// Needs a role allowed to `CREATE DATABASE`; an existing database is left
/// alone.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        return Ok(());
    }

    info!("Creating missing database");
    Postgres::create_database(database_url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_migrations_are_ordered() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
        assert_eq!(versions.len(), 4);
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_status_is_current() {
        let status = MigrationStatus {
            applied: 4,
            pending: 0,
            latest_version: Some(20240101000004),
        };
        assert!(status.is_current());

        let status = MigrationStatus {
            pending: 1,
            ..status
        };
        assert!(!status.is_current());
    }
}
