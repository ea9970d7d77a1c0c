//! Sync CLI commands for managing the remote mirror relationship.

use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::sync::{MirrorClient, PullOutcome, SyncError};

/// Sync with the remote mirror
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    pub command: SyncSubcommand,
}

#[derive(Subcommand)]
pub enum SyncSubcommand {
    /// Show sync key and last-synchronized time
    Status,

    /// Adopt a sync key and hydrate from whatever it already holds
    SetKey {
        /// The key; omit to generate a fresh one
        key: Option<String>,
    },

    /// Drop the sync key and return to local-only mode
    ClearKey,

    /// Push the local snapshot to the mirror now
    Push,

    /// Pull the mirror snapshot down now
    Pull,
}

impl SyncCommand {
    pub async fn run(&self, mirror: &MirrorClient) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SyncSubcommand::Status => {
                match mirror.sync_key().await {
                    Some(key) => {
                        println!("Sync key:    {}", key);
                        match mirror.last_synced().await {
                            Some(at) => println!("Last synced: {}", at.to_rfc3339()),
                            None => println!("Last synced: never"),
                        }
                    }
                    None => {
                        println!("Status: local-only (no sync key)");
                        println!();
                        println!("Adopt a key with:");
                        println!();
                        println!("  opsdesk sync set-key [KEY]");
                    }
                }
                Ok(())
            }
            SyncSubcommand::SetKey { key } => {
                let key = key.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
                println!("Adopting sync key {}...", key);

                match mirror.set_sync_key(&key).await {
                    Ok(PullOutcome::Registered) => {
                        println!("Key registered; the mirror now holds this console's data.");
                    }
                    Ok(PullOutcome::Hydrated) => {
                        println!("Hydrated local data from the mirror.");
                    }
                    Err(SyncError::Transport(e)) => {
                        // The key stays set; sync resumes when the mirror
                        // is reachable again.
                        println!("Key saved, but the mirror is unreachable: {}", e);
                    }
                    Err(e) => return Err(e.into()),
                }
                Ok(())
            }
            SyncSubcommand::ClearKey => {
                mirror.clear_sync_key().await?;
                println!("Sync key cleared; running local-only.");
                Ok(())
            }
            SyncSubcommand::Push => {
                mirror.push().await?;
                println!("Pushed snapshot to mirror.");
                Ok(())
            }
            SyncSubcommand::Pull => {
                match mirror.pull().await? {
                    PullOutcome::Registered => {
                        println!("Mirror slot was empty; registered local snapshot.")
                    }
                    PullOutcome::Hydrated => println!("Hydrated local data from the mirror."),
                }
                Ok(())
            }
        }
    }
}
