//! OpsDesk Core Library
//!
//! Local-first data layer for a small-team operations console: a
//! collection-scoped document store, whole-store snapshot codec, and a
//! best-effort remote mirror client, plus the mirror server itself.

pub mod commands;
pub mod config;
pub mod models;
pub mod server;
pub mod service;
pub mod snapshot;
pub mod store;
pub mod sync;

pub use config::{Config, ConfigError};
pub use service::DeskService;
pub use snapshot::{export_snapshot, import_snapshot};
pub use store::{Collection, LocalStore, StoreError};
pub use sync::{MirrorClient, PullOutcome, SyncError, SyncState};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
