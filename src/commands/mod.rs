mod complaint;
mod config_cmd;
mod snapshot_cmd;
mod sync_cmd;
mod task;
mod user;

pub use complaint::ComplaintCommand;
pub use config_cmd::ConfigCommand;
pub use snapshot_cmd::SnapshotCommand;
pub use sync_cmd::SyncCommand;
pub use task::TaskCommand;
pub use user::UserCommand;

use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
