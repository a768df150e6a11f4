//! Track store: the persistence contract behind the `/db` endpoints
//!
//! Every operation returns a closed [`StoreError`] kind, so the HTTP layer
//! maps outcomes by pattern matching instead of catching arbitrary faults.

use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::Mutex;
use trk_common::{NewTrack, Track};

/// Store failure kinds
#[derive(Debug, Error)]
pub enum StoreError {
    /// A track with this title already exists
    #[error("Track already exists: {0}")]
    Duplicate(String),

    /// The storage engine could not complete the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value-by-title track persistence
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Persist a new track; returns the stored title
    ///
    /// Fails with [`StoreError::Duplicate`] if the title is taken. The
    /// existing record is never overwritten.
    async fn insert(&self, track: &NewTrack) -> StoreResult<String>;

    /// Delete by title; returns rows affected (0 or 1)
    async fn remove_by_title(&self, title: &str) -> StoreResult<u64>;

    /// Exact-match lookup
    async fn find_by_title(&self, title: &str) -> StoreResult<Option<Track>>;

    /// All tracks, empty when none exist
    async fn list_all(&self) -> StoreResult<Vec<Track>>;

    /// Delete every track
    async fn reset(&self) -> StoreResult<()>;
}

/// SQLite-backed [`TrackStore`]
///
/// Writes are serialized through `write_lock`, so the existence check and
/// the insert of one add are never interleaved with another write.
pub struct SqliteTrackStore {
    pool: SqlitePool,
    write_lock: Mutex<()>,
}

impl SqliteTrackStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Mutex::new(()),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Map an insert failure, treating a primary-key violation as a duplicate
fn insert_error(err: sqlx::Error, title: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Duplicate(title.to_string())
        }
        _ => StoreError::from(err),
    }
}

#[async_trait]
impl TrackStore for SqliteTrackStore {
    async fn insert(&self, track: &NewTrack) -> StoreResult<String> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT 1 FROM tracks WHERE title = ?")
            .bind(&track.title)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            return Err(StoreError::Duplicate(track.title.clone()));
        }

        sqlx::query("INSERT INTO tracks (title, encoded_track) VALUES (?, ?)")
            .bind(&track.title)
            .bind(&track.encoded_track)
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(e, &track.title))?;

        tx.commit().await?;

        Ok(track.title.clone())
    }

    async fn remove_by_title(&self, title: &str) -> StoreResult<u64> {
        let _guard = self.write_lock.lock().await;

        let result = sqlx::query("DELETE FROM tracks WHERE title = ?")
            .bind(title)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_by_title(&self, title: &str) -> StoreResult<Option<Track>> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT title, encoded_track FROM tracks WHERE title = ?",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(title, encoded_track)| Track {
            title,
            encoded_track,
        }))
    }

    async fn list_all(&self) -> StoreResult<Vec<Track>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT title, encoded_track FROM tracks ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(title, encoded_track)| Track {
                title,
                encoded_track,
            })
            .collect())
    }

    async fn reset(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        sqlx::query("DELETE FROM tracks").execute(&self.pool).await?;

        Ok(())
    }
}
