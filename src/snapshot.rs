//! Whole-store snapshot encoding and decoding.
//!
//! A snapshot is a single JSON object whose top-level keys are exactly the
//! known collection names, each holding that collection's full document
//! list. The same shape serves as the export file format and as the
//! payload pushed to the remote mirror.

use serde_json::{Map, Value};

use crate::store::{Collection, LocalStore, StoreError};

/// Assembles the full-store snapshot as a JSON value.
///
/// Every known collection appears as a key, empty ones included, so the
/// result is self-describing: applying it reproduces the store exactly.
pub async fn snapshot_value(store: &LocalStore) -> Result<Value, StoreError> {
    let mut snapshot = Map::new();

    for collection in Collection::ALL {
        let docs = store.get_all(collection).await?;
        snapshot.insert(collection.as_str().to_string(), Value::Array(docs));
    }

    Ok(Value::Object(snapshot))
}

/// Serializes the entire store to one JSON document.
pub async fn export_snapshot(store: &LocalStore) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&snapshot_value(store).await?)?)
}

/// Restores collections from a snapshot string.
///
/// Fails closed: if the input is not valid JSON, not a JSON object, or
/// maps a known collection to anything but an array, this returns
/// `Ok(false)` without touching the store. On success every collection
/// present in the payload is replaced wholesale; collections absent from
/// the payload keep their current contents. Unknown top-level keys are
/// ignored.
pub async fn import_snapshot(store: &LocalStore, input: &str) -> Result<bool, StoreError> {
    let parsed: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("snapshot import rejected: {}", e);
            return Ok(false);
        }
    };

    apply_snapshot(store, &parsed).await
}

/// Restores collections from an already-parsed snapshot value.
///
/// Same fail-closed contract as [`import_snapshot`], minus the parse step.
pub async fn apply_snapshot(store: &LocalStore, parsed: &Value) -> Result<bool, StoreError> {
    let Some(object) = parsed.as_object() else {
        tracing::warn!("snapshot import rejected: top level is not an object");
        return Ok(false);
    };

    // Validate the full payload before the first write.
    let mut replacements: Vec<(Collection, &Vec<Value>)> = Vec::new();
    for (name, value) in object {
        let Some(collection) = Collection::parse(name) else {
            continue;
        };
        let Some(docs) = value.as_array() else {
            tracing::warn!("snapshot import rejected: '{}' is not an array", name);
            return Ok(false);
        };
        replacements.push((collection, docs));
    }

    for (collection, docs) in replacements {
        store.replace_all(collection, docs).await?;
    }

    Ok(true)
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
    async fn test_export_empty_store_lists_every_collection() {
        let (store, _temp) = setup().await;

        let exported = export_snapshot(&store).await.unwrap();
        let parsed: Value = serde_json::from_str(&exported).unwrap();
        let object = parsed.as_object().unwrap();

        assert_eq!(object.len(), Collection::ALL.len());
        for collection in Collection::ALL {
            assert_eq!(object[collection.as_str()], json!([]));
        }
    }

    #[tokio::test]
    async fn test_round_trip_preserves_store() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Tasks, &json!({"id": "t1", "title": "ship it"}))
            .await
            .unwrap();
        store
            .put(Collection::Users, &json!({"id": "u1", "name": "Ada"}))
            .await
            .unwrap();

        let exported = export_snapshot(&store).await.unwrap();
        assert!(import_snapshot(&store, &exported).await.unwrap());

        let tasks = store.get_all(Collection::Tasks).await.unwrap();
        let users = store.get_all(Collection::Users).await.unwrap();
        assert_eq!(tasks, vec![json!({"id": "t1", "title": "ship it"})]);
        assert_eq!(users, vec![json!({"id": "u1", "name": "Ada"})]);
    }

    #[tokio::test]
    async fn test_import_rejects_invalid_json_without_mutation() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Tasks, &json!({"id": "t1", "title": "keep"}))
            .await
            .unwrap();
        let before = store.get_all(Collection::Tasks).await.unwrap();

        assert!(!import_snapshot(&store, "not json at all").await.unwrap());
        assert!(!import_snapshot(&store, "{\"tasks\": [").await.unwrap());

        assert_eq!(store.get_all(Collection::Tasks).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_import_rejects_non_object_top_level() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Tasks, &json!({"id": "t1"}))
            .await
            .unwrap();

        assert!(!import_snapshot(&store, "[1, 2, 3]").await.unwrap());
        assert!(!import_snapshot(&store, "\"snapshot\"").await.unwrap());
        assert!(!import_snapshot(&store, "42").await.unwrap());
        assert!(!import_snapshot(&store, "null").await.unwrap());

        assert_eq!(store.get_all(Collection::Tasks).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_rejects_non_array_collection_before_any_write() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Tasks, &json!({"id": "t1"}))
            .await
            .unwrap();
        store
            .put(Collection::Users, &json!({"id": "u1"}))
            .await
            .unwrap();

        // `users` is malformed, so even the well-formed `tasks` entry must
        // not be applied.
        let payload = r#"{"tasks": [{"id": "t9"}], "users": {"id": "u9"}}"#;
        assert!(!import_snapshot(&store, payload).await.unwrap());

        assert_eq!(store.get_all(Collection::Tasks).await.unwrap()[0]["id"], "t1");
        assert_eq!(store.get_all(Collection::Users).await.unwrap()[0]["id"], "u1");
    }

    #[tokio::test]
    async fn test_import_empty_arrays_clear_collections() {
        let (store, _temp) = setup().await;

        for n in 1..=3 {
            store
                .put(Collection::Tasks, &json!({"id": format!("t{n}")}))
                .await
                .unwrap();
        }

        let (empty_store, _temp2) = setup().await;
        let empty = export_snapshot(&empty_store).await.unwrap();

        assert!(import_snapshot(&store, &empty).await.unwrap());
        assert!(store.get_all(Collection::Tasks).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_leaves_absent_collections_untouched() {
        let (store, _temp) = setup().await;

        store
            .put(Collection::Users, &json!({"id": "u1", "name": "Ada"}))
            .await
            .unwrap();

        let payload = r#"{"tasks": [{"id": "t1", "title": "new"}]}"#;
        assert!(import_snapshot(&store, payload).await.unwrap());

        assert_eq!(store.get_all(Collection::Tasks).await.unwrap().len(), 1);
        assert_eq!(store.get_all(Collection::Users).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_ignores_unknown_collections() {
        let (store, _temp) = setup().await;

        let payload = r#"{"widgets": [{"id": "w1"}], "tasks": [{"id": "t1"}]}"#;
        assert!(import_snapshot(&store, payload).await.unwrap());

        assert_eq!(store.get_all(Collection::Tasks).await.unwrap().len(), 1);
        // Unknown collections are never created implicitly, so a fresh
        // export still lists exactly the known registry.
        let exported = export_snapshot(&store).await.unwrap();
        let parsed: Value = serde_json::from_str(&exported).unwrap();
        assert!(parsed.get("widgets").is_none());
    }
}
