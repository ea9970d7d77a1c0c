//! Best-effort snapshot replication against a remote mirror.
//!
//! The mirror holds one full-store snapshot per sync key. The client here
//! pushes snapshots after local mutations (fire-and-forget) and pulls the
//! remote slot when a key is adopted or a manual sync is requested. The
//! merge rule is deliberately crude: remote wins on first contact, local
//! wins thereafter, last writer wins globally at snapshot granularity.

mod client;
mod error;
mod state;

pub use client::{MirrorClient, PullOutcome};
pub use error::SyncError;
pub use state::{StateError, SyncState};
