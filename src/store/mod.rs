//! Collection-scoped document storage over SQLite.
//!
//! All collections share a single `documents` table keyed on
//! `(collection, id)`; document bodies are stored as JSON text. The store
//! imposes no schema on bodies beyond requiring a string `id` field —
//! typed access lives in the service layer.

mod collection;

pub use collection::Collection;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Errors from the local document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to create data directory '{path}': {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("document in '{collection}' has no string `id` field")]
    MissingId { collection: Collection },

    #[error("document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Handle to the local document store.
///
/// Cloning is cheap; all clones share one connection pool. Opening is
/// idempotent: the database file and schema are created on first open and
/// reused afterwards, and existing data is never dropped by reopening.
#[derive(Debug, Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Opens (or creates) the store at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::DataDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", path.display());
        let options = SqliteConnectOptions::from_str(&db_url)
            .map_err(StoreError::Database)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Returns all documents in a collection, in insertion order.
    pub async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = ? ORDER BY rowid")
                .bind(collection.as_str())
                .fetch_all(&self.pool)
                .await?;

        let mut docs = Vec::with_capacity(rows.len());
        for (body,) in rows {
            docs.push(serde_json::from_str(&body)?);
        }
        Ok(docs)
    }

    /// Inserts or fully replaces the document sharing its `id`.
    pub async fn put(&self, collection: Collection, doc: &Value) -> Result<(), StoreError> {
        let id = document_id(collection, doc)?;
        let body = serde_json::to_string(doc)?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)
            ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(&body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Applies multiple puts as one transaction: all visible or none.
    pub async fn put_bulk(&self, collection: Collection, docs: &[Value]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for doc in docs {
            let id = document_id(collection, doc)?;
            let body = serde_json::to_string(doc)?;

            sqlx::query(
                r#"
                INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)
                ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body
                "#,
            )
            .bind(collection.as_str())
            .bind(id)
            .bind(&body)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Removes one document by id. Missing ids are a no-op.
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Removes every document in one collection.
    pub async fn clear(&self, collection: Collection) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = ?")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Replaces a collection's contents wholesale in one transaction.
    ///
    /// Used by snapshot import so a mid-batch failure cannot leave the
    /// collection half cleared, half restored.
    pub(crate) async fn replace_all(
        &self,
        collection: Collection,
        docs: &[Value],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM documents WHERE collection = ?")
            .bind(collection.as_str())
            .execute(&mut *tx)
            .await?;

        for doc in docs {
            let id = document_id(collection, doc)?;
            let body = serde_json::to_string(doc)?;

            sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
                .bind(collection.as_str())
                .bind(id)
                .bind(&body)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Extracts the identifier field a document is keyed on.
fn document_id(collection: Collection, doc: &Value) -> Result<String, StoreError> {
    doc.get("id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(StoreError::MissingId { collection })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    async fn setup() -> (LocalStore, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::open(temp_dir.path().join("opsdesk.db"))
            .await
            .unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("opsdesk.db");

        let store = LocalStore::open(&path).await.unwrap();
        store
            .put(Collection::Tasks, &json!({"id": "t1", "title": "first"}))
            .await
            .unwrap();
        drop(store);

        // Reopening must not destroy existing data.
        let store = LocalStore::open(&path).await.unwrap();
        let tasks = store.get_all(Collection::Tasks).await.unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_get_all_empty_collection() {
        let (store, _temp) = setup().await;
        let docs = store.get_all(Collection::Meetings).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_put_overwrites_same_id() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Users, &json!({"id": "u1", "name": "A"}))
            .await
            .unwrap();
        store
            .put(Collection::Users, &json!({"id": "u1", "name": "B"}))
            .await
            .unwrap();

        let users = store.get_all(Collection::Users).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["name"], "B");
    }

    #[tokio::test]
    async fn test_put_requires_string_id() {
        let (store, _temp) = setup().await;

        let err = store
            .put(Collection::Tasks, &json!({"title": "no id"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingId { .. }));

        let err = store
            .put(Collection::Tasks, &json!({"id": 7, "title": "numeric id"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingId { .. }));
    }

    #[tokio::test]
    async fn test_put_bulk_all_or_nothing() {
        let (store, _temp) = setup().await;

        // Third document has no id, so the whole batch must roll back.
        let docs = vec![
            json!({"id": "i1", "name": "bolts"}),
            json!({"id": "i2", "name": "nuts"}),
            json!({"name": "washers"}),
        ];
        let err = store.put_bulk(Collection::Inventory, &docs).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingId { .. }));
        assert!(store.get_all(Collection::Inventory).await.unwrap().is_empty());

        // A clean batch lands in full.
        let docs = vec![
            json!({"id": "i1", "name": "bolts"}),
            json!({"id": "i2", "name": "nuts"}),
        ];
        store.put_bulk(Collection::Inventory, &docs).await.unwrap();
        assert_eq!(store.get_all(Collection::Inventory).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Tasks, &json!({"id": "t1", "title": "keep"}))
            .await
            .unwrap();
        store.delete(Collection::Tasks, "nonexistent").await.unwrap();

        let tasks = store.get_all(Collection::Tasks).await.unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Tasks, &json!({"id": "t1", "title": "a"}))
            .await
            .unwrap();
        store
            .put(Collection::Tasks, &json!({"id": "t2", "title": "b"}))
            .await
            .unwrap();
        store.delete(Collection::Tasks, "t1").await.unwrap();

        let tasks = store.get_all(Collection::Tasks).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["id"], "t2");
    }

    #[tokio::test]
    async fn test_clear_scoped_to_collection() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Tasks, &json!({"id": "t1"}))
            .await
            .unwrap();
        store
            .put(Collection::Users, &json!({"id": "u1"}))
            .await
            .unwrap();

        store.clear(Collection::Tasks).await.unwrap();

        assert!(store.get_all(Collection::Tasks).await.unwrap().is_empty());
        assert_eq!(store.get_all(Collection::Users).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_all_swaps_contents() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Payroll, &json!({"id": "p1", "amount": 100}))
            .await
            .unwrap();

        let incoming = vec![
            json!({"id": "p2", "amount": 200}),
            json!({"id": "p3", "amount": 300}),
        ];
        store.replace_all(Collection::Payroll, &incoming).await.unwrap();

        let docs = store.get_all(Collection::Payroll).await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["p2", "p3"]);
    }

    #[tokio::test]
    async fn test_replace_all_rolls_back_on_bad_document() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Payroll, &json!({"id": "p1", "amount": 100}))
            .await
            .unwrap();

        let incoming = vec![json!({"id": "p2"}), json!({"amount": 300})];
        let err = store
            .replace_all(Collection::Payroll, &incoming)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingId { .. }));

        // The original document survives the failed replacement.
        let docs = store.get_all(Collection::Payroll).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["id"], "p1");
    }
}
