//! SQLite connection setup for the track table

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Open (or create) the track database at `db_path`
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    // WAL lets list/search readers proceed while an add holds the write lock;
    // both settings apply to every pooled connection
    let options = SqliteConnectOptions::from_str(&db_url)
        .context("Invalid database path")?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to open track database")?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    init_tables(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database
///
/// Every pooled connection to `sqlite::memory:` would get its own empty
/// database, so the pool is capped at one connection.
pub async fn init_memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("Failed to open in-memory database")?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the tracks table if it doesn't exist
///
/// `title` is the primary key: at most one track per title.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tracks (
            title TEXT PRIMARY KEY,
            encoded_track TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create tracks table")?;

    tracing::info!("Database tables initialized (tracks)");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_file_created_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("tracks.db");

        let pool = init_database_pool(&db_path).await.expect("init should succeed");
        assert!(db_path.exists(), "Database file was not created");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracks")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("tracks.db");

        let pool = init_database_pool(&db_path).await.unwrap();
        sqlx::query("INSERT INTO tracks (title, encoded_track) VALUES ('X', 'AA==')")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let pool = init_database_pool(&db_path).await.unwrap();
        let encoded: String =
            sqlx::query_scalar("SELECT encoded_track FROM tracks WHERE title = 'X'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(encoded, "AA==");
    }

    #[tokio::test]
    async fn test_file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database_pool(&dir.path().join("tracks.db")).await.unwrap();

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_title_is_unique() {
        let pool = init_memory_pool().await.unwrap();

        sqlx::query("INSERT INTO tracks (title, encoded_track) VALUES ('X', 'AA==')")
            .execute(&pool)
            .await
            .unwrap();
        let second = sqlx::query("INSERT INTO tracks (title, encoded_track) VALUES ('X', 'BB==')")
            .execute(&pool)
            .await;

        assert!(second.is_err(), "Second insert of the same title should fail");
    }
}
