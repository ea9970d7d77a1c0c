use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use opsdesk::commands::{
    ComplaintCommand, ConfigCommand, SnapshotCommand, SyncCommand, TaskCommand, UserCommand,
};
use opsdesk::config::Config;
use opsdesk::service::DeskService;
use opsdesk::store::LocalStore;
use opsdesk::sync::{MirrorClient, SyncState};

#[derive(Parser)]
#[command(name = "opsdesk")]
#[command(version)]
#[command(about = "Local-first operations console with snapshot sync", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tasks
    Task(TaskCommand),

    /// Manage user accounts
    User(UserCommand),

    /// Manage complaints
    Complaint(ComplaintCommand),

    /// Sync with the remote mirror
    Sync(SyncCommand),

    /// Export or import full-store snapshots
    Snapshot(SnapshotCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "opsdesk=warn".into()))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Task(cmd)) => {
            let service = open_service(&config).await?;
            cmd.run(&service).await?;
        }
        Some(Commands::User(cmd)) => {
            let service = open_service(&config).await?;
            cmd.run(&service).await?;
        }
        Some(Commands::Complaint(cmd)) => {
            let service = open_service(&config).await?;
            cmd.run(&service).await?;
        }
        Some(Commands::Sync(cmd)) => {
            let service = open_service(&config).await?;
            cmd.run(service.mirror()).await?;
        }
        Some(Commands::Snapshot(cmd)) => {
            let service = open_service(&config).await?;
            cmd.run(service.store()).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

async fn open_service(config: &Config) -> Result<DeskService, Box<dyn std::error::Error>> {
    let store = LocalStore::open(&config.database_path).await?;
    let state = SyncState::load(&config.sync_state_path)?;
    let mirror = MirrorClient::new(
        config.mirror_url.clone(),
        store.clone(),
        Arc::new(Mutex::new(state)),
    );
    Ok(DeskService::new(store, mirror))
}
