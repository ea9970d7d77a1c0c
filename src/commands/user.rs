use clap::{Args, Subcommand, ValueEnum};

use super::OutputFormat;
use crate::models::{Role, User};
use crate::service::DeskService;

#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    Operator,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Operator => Role::Operator,
        }
    }
}

/// Manage user accounts
#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand)]
pub enum UserSubcommand {
    /// List all users (seeds the default accounts on first use)
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a user
    Add {
        /// Display name
        name: String,

        /// Account role
        #[arg(long, value_enum, default_value = "operator")]
        role: RoleArg,
    },

    /// Remove a user
    Remove {
        /// User id
        id: String,
    },
}

impl UserCommand {
    pub async fn run(&self, service: &DeskService) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UserSubcommand::List { format } => {
                let users = service.get_users().await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&users)?);
                    }
                    OutputFormat::Text => {
                        for user in users {
                            let flag = if user.active { "" } else { " (inactive)" };
                            println!("{} — {} ({}){}", user.name, user.role, user.id, flag);
                        }
                    }
                }
            }
            UserSubcommand::Add { name, role } => {
                let user = User::new(name, (*role).into());
                service.save_user(&user).await?;
                println!("Added {} ({})", user.name, user.id);
            }
            UserSubcommand::Remove { id } => {
                service.delete_user(id).await?;
                println!("Removed user {}", id);
            }
        }
        Ok(())
    }
}
