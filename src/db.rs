use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use tracing::{debug, info};

use crate::{
    error::StoreError,
    models::song::{Song, SongRow},
};

/// Durable CRUD over song records. Handlers only ever see this trait.
#[async_trait]
pub trait SongStore: Send + Sync {
    async fn insert(&self, title: &str, lyrics: &str) -> Result<Song, StoreError>;
    async fn get(&self, id: i64) -> Result<Song, StoreError>;
    /// All songs in insertion order.
    async fn list(&self) -> Result<Vec<Song>, StoreError>;
    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        lyrics: Option<&str>,
    ) -> Result<Song, StoreError>;
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        debug!("DATABASE_URL={}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// A private in-memory database. The pool is pinned to one connection that never
    /// expires, since every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("Title must not be empty".to_string()));
    }
    Ok(())
}

fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}

#[async_trait]
impl SongStore for Database {
    async fn insert(&self, title: &str, lyrics: &str) -> Result<Song, StoreError> {
        validate_title(title)?;
        let now = now_micros();

        let row = sqlx::query_as::<_, SongRow>(
            "INSERT INTO songs (title, lyrics, created_at, updated_at) VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(title)
        .bind(lyrics)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Song, StoreError> {
        sqlx::query_as::<_, SongRow>("SELECT * FROM songs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Song::from)
            .ok_or(StoreError::NotFound { id })
    }

    async fn list(&self) -> Result<Vec<Song>, StoreError> {
        let rows = sqlx::query_as::<_, SongRow>("SELECT * FROM songs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Song::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        lyrics: Option<&str>,
    ) -> Result<Song, StoreError> {
        if let Some(title) = title {
            if let Err(invalid) = validate_title(title) {
                // A missing row has no resulting title to reject
                self.get(id).await?;
                return Err(invalid);
            }
        }

        // updated_at must move forward even when two writes land in the same microsecond
        sqlx::query_as::<_, SongRow>(
            "UPDATE songs
             SET title = COALESCE(?, title),
                 lyrics = COALESCE(?, lyrics),
                 updated_at = MAX(?, updated_at + 1)
             WHERE id = ?
             RETURNING *",
        )
        .bind(title)
        .bind(lyrics)
        .bind(now_micros())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Song::from)
        .ok_or(StoreError::NotFound { id })
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids_and_get_round_trips() {
        let db = test_db().await;

        let first = db.insert("Yesterday", "").await.unwrap();
        let second = db.insert("Yesterday", "again").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(db.get(first.id).await.unwrap(), first);
        assert_eq!(db.get(second.id).await.unwrap(), second);
    }

    #[tokio::test]
    async fn empty_title_is_rejected_without_writing() {
        let db = test_db().await;

        assert!(matches!(db.insert("", "words").await, Err(StoreError::Validation(_))));
        assert!(matches!(db.insert("   ", "").await, Err(StoreError::Validation(_))));
        assert!(db.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let db = test_db().await;

        let b = db.insert("Blackbird", "").await.unwrap();
        let a = db.insert("Across the Universe", "").await.unwrap();

        let ids: Vec<i64> = db.list().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn update_replaces_only_supplied_fields() {
        let db = test_db().await;
        let song = db.insert("Let It Be", "When I find myself").await.unwrap();

        let retitled = db.update(song.id, Some("Let It Be (Naked)"), None).await.unwrap();
        assert_eq!(retitled.title, "Let It Be (Naked)");
        assert_eq!(retitled.lyrics, "When I find myself");
        assert_eq!(retitled.created_at, song.created_at);
        assert!(retitled.updated_at > song.updated_at);

        let rewritten = db.update(song.id, None, Some("")).await.unwrap();
        assert_eq!(rewritten.title, "Let It Be (Naked)");
        assert_eq!(rewritten.lyrics, "");
        assert!(rewritten.updated_at > retitled.updated_at);

        let touched = db.update(song.id, None, None).await.unwrap();
        assert!(touched.updated_at > rewritten.updated_at);
    }

    #[tokio::test]
    async fn update_rejects_empty_title_and_missing_rows() {
        let db = test_db().await;
        let song = db.insert("Something", "").await.unwrap();

        assert!(matches!(
            db.update(song.id, Some(""), Some("x")).await,
            Err(StoreError::Validation(_))
        ));
        assert_eq!(db.get(song.id).await.unwrap(), song);

        assert!(matches!(
            db.update(999, None, Some("x")).await,
            Err(StoreError::NotFound { id: 999 })
        ));
        assert!(matches!(
            db.update(999, Some(""), None).await,
            Err(StoreError::NotFound { id: 999 })
        ));
    }

    #[tokio::test]
    async fn delete_fails_on_repeat_and_ids_are_not_reused() {
        let db = test_db().await;
        let song = db.insert("Michelle", "").await.unwrap();

        db.delete(song.id).await.unwrap();
        assert!(matches!(db.get(song.id).await, Err(StoreError::NotFound { .. })));
        assert!(matches!(db.delete(song.id).await, Err(StoreError::NotFound { .. })));

        let next = db.insert("Girl", "").await.unwrap();
        assert!(next.id > song.id);
    }
}
