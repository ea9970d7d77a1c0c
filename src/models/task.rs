use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub assignee: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            assignee: assignee.into(),
            status: TaskStatus::Open,
            due_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::InProgress => write!(f, "in progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new_defaults() {
        let task = Task::new("Restock shelves", "ada");
        assert_eq!(task.status, TaskStatus::Open);
        assert!(task.due_date.is_none());
        assert!(!task.id.is_empty());
    }

    #[test]
    fn test_task_serde_status_names() {
        let task = Task::new("Count inventory", "ada");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["status"], "open");

        let mut task = task;
        task.status = TaskStatus::InProgress;
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["status"], "in_progress");
    }
}
