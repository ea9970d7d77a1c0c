use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::models::Complaint;
use crate::service::DeskService;

/// Manage complaints
#[derive(Args)]
pub struct ComplaintCommand {
    #[command(subcommand)]
    pub command: ComplaintSubcommand,
}

#[derive(Subcommand)]
pub enum ComplaintSubcommand {
    /// File a complaint
    Add {
        /// Short subject line
        subject: String,

        /// Detailed description
        #[arg(long, default_value = "")]
        body: String,

        /// Who raised it
        #[arg(long, default_value = "anonymous")]
        raised_by: String,
    },

    /// List complaints
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Only show unresolved complaints
        #[arg(long)]
        open: bool,
    },

    /// Mark a complaint resolved
    Resolve {
        /// Complaint id
        id: String,
    },
}

impl ComplaintCommand {
    pub async fn run(&self, service: &DeskService) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ComplaintSubcommand::Add {
                subject,
                body,
                raised_by,
            } => {
                let complaint = Complaint::new(subject, body, raised_by);
                service.save_complaint(&complaint).await?;
                println!("Filed complaint {} ({})", complaint.subject, complaint.id);
            }
            ComplaintSubcommand::List { format, open } => {
                let mut complaints = service.get_complaints().await?;
                if *open {
                    complaints.retain(|c| !c.resolved);
                }
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&complaints)?);
                    }
                    OutputFormat::Text => {
                        if complaints.is_empty() {
                            println!("No complaints.");
                        }
                        for complaint in complaints {
                            let status = if complaint.resolved {
                                "resolved"
                            } else {
                                "open"
                            };
                            println!(
                                "[{}] {} — {} ({})",
                                status, complaint.subject, complaint.raised_by, complaint.id
                            );
                        }
                    }
                }
            }
            ComplaintSubcommand::Resolve { id } => {
                if service.resolve_complaint(id).await? {
                    println!("Resolved complaint {}", id);
                } else {
                    println!("No complaint with id {}", id);
                }
            }
        }
        Ok(())
    }
}
