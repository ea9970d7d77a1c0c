use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::snapshot::{export_snapshot, import_snapshot};
use crate::store::LocalStore;

/// Export or import full-store snapshots
#[derive(Args)]
pub struct SnapshotCommand {
    #[command(subcommand)]
    pub command: SnapshotSubcommand,
}

#[derive(Subcommand)]
pub enum SnapshotSubcommand {
    /// Write the full store to a snapshot file
    Export {
        /// Output file
        path: PathBuf,
    },

    /// Restore collections from a snapshot file
    Import {
        /// Input file
        path: PathBuf,
    },
}

impl SnapshotCommand {
    pub async fn run(&self, store: &LocalStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SnapshotSubcommand::Export { path } => {
                let snapshot = export_snapshot(store).await?;
                std::fs::write(path, &snapshot)?;
                println!("Exported {} bytes to {}", snapshot.len(), path.display());
            }
            SnapshotSubcommand::Import { path } => {
                let contents = std::fs::read_to_string(path)?;
                if import_snapshot(store, &contents).await? {
                    println!("Imported snapshot from {}", path.display());
                } else {
                    // Fail closed: nothing was changed.
                    eprintln!("Invalid snapshot schema; store left untouched.");
                    std::process::exit(1);
                }
            }
        }
        Ok(())
    }
}
