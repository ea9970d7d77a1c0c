//! Persisted sync relationship state.
//!
//! The sync key and last-synchronized timestamp describe the mirror
//! relationship rather than business data, so they live in a small JSON
//! file beside the database instead of inside the document store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors reading or writing the sync state file.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read sync state '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write sync state '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse sync state '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// On-disk representation of the sync state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateFile {
    sync_key: Option<String>,
    last_synced: Option<DateTime<Utc>>,
}

/// Process-wide sync configuration with explicit load/save.
///
/// No sync key means the console runs in local-only mode. State is loaded
/// once at startup and saved on every mutation; it is never an ambient
/// global — callers pass it into the mirror client explicitly.
#[derive(Debug)]
pub struct SyncState {
    path: PathBuf,
    pub sync_key: Option<String>,
    pub last_synced: Option<DateTime<Utc>>,
}

impl SyncState {
    /// Loads sync state from the given path. A missing file is an empty,
    /// local-only state, not an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref().to_path_buf();

        let file = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str::<StateFile>(&contents).map_err(|e| StateError::Parse {
                    path: path.clone(),
                    source: e,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StateFile::default(),
            Err(e) => return Err(StateError::Read { path, source: e }),
        };

        Ok(Self {
            path,
            sync_key: file.sync_key,
            last_synced: file.last_synced,
        })
    }

    /// Writes the current state back to disk.
    pub fn save(&self) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StateError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        }

        let file = StateFile {
            sync_key: self.sync_key.clone(),
            last_synced: self.last_synced,
        };
        let contents = serde_json::to_string_pretty(&file).map_err(|e| StateError::Parse {
            path: self.path.clone(),
            source: e,
        })?;

        std::fs::write(&self.path, contents).map_err(|e| StateError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
