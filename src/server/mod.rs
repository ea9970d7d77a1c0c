//! Remote mirror server: a key-addressed snapshot slot over HTTP.
//!
//! Wire contract:
//! - `GET /api/sync?key=<syncKey>` → `200 { message, data, timestamp? }`,
//!   `data` is `null` when the key has never been pushed.
//! - `POST /api/sync?key=<syncKey>` with a bare snapshot body → upsert,
//!   `200 { message, timestamp }`.
//! - Missing key on either verb → `400`. Other methods on the route →
//!   `405`. Persistence failure → `500 { error, details }`.

mod db;

pub use db::{init_mirror_db, MirrorRepository, SnapshotRow};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::trace::TraceLayer;

/// Query string for both verbs.
#[derive(Debug, Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

impl KeyQuery {
    fn require(&self) -> Result<&str, ServerError> {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ServerError::MissingKey),
        }
    }
}

/// Errors surfaced to mirror clients.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("sync key is required")]
    MissingKey,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored payload is not valid JSON: {0}")]
    CorruptPayload(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::MissingKey => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: self.to_string(),
                    details: None,
                },
            ),
            ServerError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "failed to persist sync data".to_string(),
                    details: Some(e.to_string()),
                },
            ),
            ServerError::CorruptPayload(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "stored sync payload is corrupt".to_string(),
                    details: Some(e.to_string()),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct PullBody {
    message: &'static str,
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

#[derive(Serialize)]
struct PushBody {
    message: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    version: &'static str,
}

/// Builds the mirror router over an initialized pool.
pub fn app(pool: sqlx::SqlitePool) -> Router {
    let repo = MirrorRepository::new(pool);

    Router::new()
        .route("/api/sync", get(pull_snapshot).post(push_snapshot))
        .route("/health", get(health))
        .with_state(repo)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/sync?key=` — returns the stored snapshot, or `data: null`
/// for a key that has never been pushed.
async fn pull_snapshot(
    State(repo): State<MirrorRepository>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<PullBody>, ServerError> {
    let key = query.require()?;

    match repo.fetch(key).await? {
        Some(row) => {
            let data: Value = serde_json::from_str(&row.payload)?;
            Ok(Json(PullBody {
                message: "Sync data found",
                data: Some(data),
                timestamp: Some(row.last_updated),
            }))
        }
        None => {
            tracing::debug!(key = %key, "no snapshot stored for key");
            Ok(Json(PullBody {
                message: "No sync data found for this key",
                data: None,
                timestamp: None,
            }))
        }
    }
}

/// `POST /api/sync?key=` — creates or fully replaces the slot.
async fn push_snapshot(
    State(repo): State<MirrorRepository>,
    Query(query): Query<KeyQuery>,
    Json(snapshot): Json<Value>,
) -> Result<Json<PushBody>, ServerError> {
    let key = query.require()?;

    let payload = serde_json::to_string(&snapshot)?;
    let timestamp = repo.upsert(key, &payload).await?;

    tracing::info!(key = %key, bytes = payload.len(), "stored snapshot");
    Ok(Json(PushBody {
        message: "Sync data saved",
        timestamp,
    }))
}
