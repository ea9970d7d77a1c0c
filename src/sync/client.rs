//! HTTP mirror client for snapshot replication.
//!
//! The remote mirror is a key-addressed slot holding one full snapshot per
//! sync key. Replication is whole-snapshot and last-writer-wins: every
//! local mutation pushes the complete store up, and adopting a key pulls
//! whatever is already stored under it. There is no conflict detection
//! across writers sharing a key; that simplification is part of the
//! contract, not an oversight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::snapshot::{apply_snapshot, snapshot_value};
use crate::store::LocalStore;
use crate::sync::error::SyncError;
use crate::sync::state::SyncState;

/// What a successful pull did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// The remote slot was empty; the local snapshot was pushed up to
    /// register the key.
    Registered,
    /// The remote slot had data; local collections were replaced with it.
    Hydrated,
}

/// Body of a GET response from the mirror.
#[derive(Debug, Deserialize)]
struct PullResponse {
    #[allow(dead_code)]
    message: String,
    data: Option<Value>,
    #[allow(dead_code)]
    timestamp: Option<String>,
}

/// Mirror client bound to one local store and one sync state.
///
/// Cloning shares the store pool and the sync state, which is what the
/// detached push task relies on.
#[derive(Debug, Clone)]
pub struct MirrorClient {
    endpoint: String,
    http: reqwest::Client,
    store: LocalStore,
    state: Arc<Mutex<SyncState>>,
}

impl MirrorClient {
    /// Creates a mirror client for the given endpoint.
    ///
    /// The sync state is passed in explicitly; the client persists every
    /// mutation of it back to disk.
    pub fn new(
        endpoint: impl Into<String>,
        store: LocalStore,
        state: Arc<Mutex<SyncState>>,
    ) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint.into()),
            http: reqwest::Client::new(),
            store,
            state,
        }
    }

    /// Returns the currently configured sync key, if any.
    pub async fn sync_key(&self) -> Option<String> {
        self.state.lock().await.sync_key.clone()
    }

    /// Returns the last successful sync time, if any.
    pub async fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.last_synced
    }

    /// Uploads the full local snapshot to the mirror slot.
    ///
    /// A missing sync key makes this a no-op: local-only mode is not an
    /// error. On success the last-synced timestamp is updated and
    /// persisted.
    pub async fn push(&self) -> Result<(), SyncError> {
        let Some(key) = self.sync_key().await else {
            return Ok(());
        };

        let body = snapshot_value(&self.store).await?;

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SyncError::Status {
                status: response.status(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let mut state = self.state.lock().await;
        state.last_synced = Some(Utc::now());
        state.save()?;

        tracing::debug!(key = %key, "pushed snapshot to mirror");
        Ok(())
    }

    /// Triggers a push as a detached background task.
    ///
    /// The caller returns immediately; transport failures are logged and
    /// the console degrades to local-only until the next attempt. No
    /// timeout or retry is applied.
    pub fn spawn_push(&self) {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(e) = client.push().await {
                tracing::warn!("background push failed: {}", e);
            }
        });
    }

    /// Downloads the mirror slot and reconciles it with the local store.
    ///
    /// An empty slot means this key has never been pushed: the local
    /// snapshot is authoritative and gets registered. A populated slot
    /// replaces local collections wholesale. Transport failures leave the
    /// local store untouched and the caller must not assume consistency.
    pub async fn pull(&self) -> Result<PullOutcome, SyncError> {
        let Some(key) = self.sync_key().await else {
            return Err(SyncError::NoSyncKey);
        };

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("key", key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SyncError::Status {
                status: response.status(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let pull: PullResponse = response
            .json()
            .await
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))?;

        match pull.data {
            None | Some(Value::Null) => {
                self.push().await?;
                tracing::info!(key = %key, "registered new sync key with local snapshot");
                Ok(PullOutcome::Registered)
            }
            Some(data) => {
                if !apply_snapshot(&self.store, &data).await? {
                    return Err(SyncError::MalformedResponse(
                        "remote payload is not a valid snapshot".to_string(),
                    ));
                }

                let mut state = self.state.lock().await;
                state.last_synced = Some(Utc::now());
                state.save()?;

                tracing::info!(key = %key, "hydrated local store from mirror");
                Ok(PullOutcome::Hydrated)
            }
        }
    }

    /// Adopts a sync key: persist it, then immediately try to pull.
    ///
    /// Remote wins on first contact, local wins thereafter. If the pull
    /// fails in transport the key stays set and the console runs
    /// local-only until the next successful sync.
    pub async fn set_sync_key(&self, key: impl Into<String>) -> Result<PullOutcome, SyncError> {
        {
            let mut state = self.state.lock().await;
            state.sync_key = Some(key.into());
            state.save()?;
        }
        self.pull().await
    }

    /// Drops the sync key and returns to local-only mode.
    pub async fn clear_sync_key(&self) -> Result<(), SyncError> {
        let mut state = self.state.lock().await;
        state.sync_key = None;
        state.last_synced = None;
        state.save()?;
        Ok(())
    }
}

/// Prefixes a scheme when the configured endpoint has none.
fn normalize_endpoint(endpoint: String) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint
    } else {
        format!("http://{}", endpoint)
    }
}
