use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub attendees: Vec<String>,
}

impl Meeting {
    pub fn new(title: impl Into<String>, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            scheduled_at,
            attendees: Vec::new(),
        }
    }

    pub fn with_attendees(mut self, attendees: Vec<String>) -> Self {
        self.attendees = attendees;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: sender.into(),
            body: body.into(),
            sent_at: Utc::now(),
        }
    }
}

/// A reusable text template (announcements, onboarding letters, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteTemplate {
    pub id: String,
    pub name: String,
    pub body: String,
}

impl NoteTemplate {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_with_attendees() {
        let meeting = Meeting::new("Standup", Utc::now())
            .with_attendees(vec!["ada".to_string(), "grace".to_string()]);
        assert_eq!(meeting.attendees.len(), 2);
    }
}
