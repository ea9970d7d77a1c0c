//! Sync error types.

use crate::store::StoreError;
use crate::sync::state::StateError;

/// Errors that can occur during mirror client operations.
///
/// Transport-class failures are swallowed and logged at the fire-and-forget
/// push boundary; they only surface to callers that sync explicitly.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No sync key is configured; the console is in local-only mode.
    #[error("no sync key set; configure one with `opsdesk sync set-key`")]
    NoSyncKey,

    /// The mirror endpoint was unreachable or the request failed in flight.
    #[error("mirror transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The mirror answered with a non-success status.
    #[error("mirror returned status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The mirror answered 2xx but the body was not a usable snapshot.
    #[error("malformed mirror response: {0}")]
    MalformedResponse(String),

    /// Local storage failed while exporting or importing a snapshot.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The sync state file could not be updated.
    #[error(transparent)]
    State(#[from] StateError),
}
