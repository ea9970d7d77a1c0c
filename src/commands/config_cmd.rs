use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::config::Config;

/// Manage configuration
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");
                        println!("database_path:   {}", config.database_path.display());
                        println!("sync_state_path: {}", config.sync_state_path.display());
                        println!("mirror_url:      {}", config.mirror_url);
                    }
                }
                Ok(())
            }
        }
    }
}
