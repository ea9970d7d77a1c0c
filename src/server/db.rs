//! Mirror-side persistence: one row per sync key.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// A stored snapshot row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SnapshotRow {
    pub sync_key: String,
    pub payload: String,
    pub last_updated: String,
}

/// Initialize the mirror database and its schema.
pub async fn init_mirror_db(path: impl AsRef<Path>) -> Result<SqlitePool, sqlx::Error> {
    let path: PathBuf = path.as_ref().to_path_buf();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", path.display());
    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sync_snapshots (
            sync_key TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            last_updated TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

/// Repository over the `sync_snapshots` table.
#[derive(Debug, Clone)]
pub struct MirrorRepository {
    pool: SqlitePool,
}

impl MirrorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetches the snapshot row for a sync key, if one exists.
    pub async fn fetch(&self, sync_key: &str) -> Result<Option<SnapshotRow>, sqlx::Error> {
        sqlx::query_as("SELECT sync_key, payload, last_updated FROM sync_snapshots WHERE sync_key = ?")
            .bind(sync_key)
            .fetch_optional(&self.pool)
            .await
    }

    /// Creates or fully replaces the row for a sync key.
    ///
    /// Returns the stored `last_updated` timestamp.
    pub async fn upsert(&self, sync_key: &str, payload: &str) -> Result<String, sqlx::Error> {
        let last_updated = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO sync_snapshots (sync_key, payload, last_updated) VALUES (?, ?, ?)
            ON CONFLICT (sync_key) DO UPDATE
                SET payload = excluded.payload, last_updated = excluded.last_updated
            "#,
        )
        .bind(sync_key)
        .bind(payload)
        .bind(&last_updated)
        .execute(&self.pool)
        .await?;

        Ok(last_updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup() -> (MirrorRepository, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let pool = init_mirror_db(temp_dir.path().join("mirror.db")).await.unwrap();
        (MirrorRepository::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_fetch_unknown_key_is_none() {
        let (repo, _temp) = setup().await;
        assert!(repo.fetch("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_payload() {
        let (repo, _temp) = setup().await;

        repo.upsert("k1", r#"{"tasks":[]}"#).await.unwrap();
        repo.upsert("k1", r#"{"tasks":[{"id":"t1"}]}"#).await.unwrap();

        let row = repo.fetch("k1").await.unwrap().unwrap();
        assert_eq!(row.payload, r#"{"tasks":[{"id":"t1"}]}"#);
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let (repo, _temp) = setup().await;

        repo.upsert("alpha", r#"{"a":1}"#).await.unwrap();
        repo.upsert("beta", r#"{"b":2}"#).await.unwrap();

        assert_eq!(repo.fetch("alpha").await.unwrap().unwrap().payload, r#"{"a":1}"#);
        assert_eq!(repo.fetch("beta").await.unwrap().unwrap().payload, r#"{"b":2}"#);
    }
}
