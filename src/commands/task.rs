use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::models::{Task, TaskStatus};
use crate::service::DeskService;

/// Manage tasks
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Create a new task
    Add {
        /// Task title
        title: String,

        /// Who the task is assigned to
        #[arg(long, default_value = "unassigned")]
        assignee: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// List all tasks
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Mark a task done
    Done {
        /// Task id
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },
}

impl TaskCommand {
    pub async fn run(&self, service: &DeskService) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            TaskSubcommand::Add {
                title,
                assignee,
                due,
            } => {
                let mut task = Task::new(title, assignee);
                if let Some(due) = due {
                    task = task.with_due_date(*due);
                }
                service.save_task(&task).await?;
                println!("Created task {} ({})", task.title, task.id);
            }
            TaskSubcommand::List { format } => {
                let tasks = service.get_tasks().await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&tasks)?);
                    }
                    OutputFormat::Text => {
                        if tasks.is_empty() {
                            println!("No tasks.");
                        }
                        for task in tasks {
                            let due = task
                                .due_date
                                .map(|d| format!(" due {}", d))
                                .unwrap_or_default();
                            println!(
                                "[{}] {} — {} ({}){}",
                                task.status, task.title, task.assignee, task.id, due
                            );
                        }
                    }
                }
            }
            TaskSubcommand::Done { id } => {
                let tasks = service.get_tasks().await?;
                match tasks.into_iter().find(|t| t.id == *id) {
                    Some(mut task) => {
                        task.status = TaskStatus::Done;
                        service.save_task(&task).await?;
                        println!("Marked done: {}", task.title);
                    }
                    None => println!("No task with id {}", id),
                }
            }
            TaskSubcommand::Delete { id } => {
                service.delete_task(id).await?;
                println!("Deleted task {}", id);
            }
        }
        Ok(())
    }
}
