//! Database connection management.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::DbResult;

/// File name of the database inside the configured data directory.
pub const DB_FILE_NAME: &str = "siteauth.db";

/// Handle to the site authentication database.
///
/// Holds the sites table, the identity-provider configurations
/// ("social apps") and the join between the two.
#[derive(Debug, Clone)]
pub struct SiteAuthDb {
    pool: SqlitePool,
}

impl SiteAuthDb {
    /// Open or create a database at the given path.
    ///
    /// This will:
    /// 1. Create the parent directory and database file if they don't exist
    /// 2. Configure SQLite (WAL mode, foreign keys)
    /// 3. Run any pending migrations
    pub async fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
            std::fs::create_dir_all(parent)?;
        }

        info!("Opening siteauth database: {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .pragma("synchronous", "NORMAL") // Safe with WAL
            .pragma("foreign_keys", "ON")
            .busy_timeout(Duration::from_secs(30));

        // One-shot admin tool, a single writer is all we ever need.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        debug!("Database connection established");

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Open the database file inside a data directory.
    pub async fn open_in_dir(dir: impl AsRef<Path>) -> DbResult<Self> {
        Self::open(dir.as_ref().join(DB_FILE_NAME)).await
    }

    /// Open an in-memory database (for testing).
    pub async fn open_in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .journal_mode(SqliteJournalMode::Wal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(1) // In-memory must be single connection to share state
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Run database migrations.
    async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
        debug!("Running siteauth database migrations");
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Check if the database is healthy.
    pub async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = SiteAuthDb::open_in_memory().await.unwrap();
        db.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_open_creates_file_and_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");

        let db = SiteAuthDb::open_in_dir(&data_dir).await.unwrap();
        db.health_check().await.unwrap();
        db.close().await;

        assert!(data_dir.join(DB_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_reopen_keeps_seeded_site() {
        let dir = tempfile::tempdir().unwrap();

        let db = SiteAuthDb::open_in_dir(dir.path()).await.unwrap();
        db.close().await;

        // Migrations must be idempotent across opens.
        let db = SiteAuthDb::open_in_dir(dir.path()).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sites")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }
}
