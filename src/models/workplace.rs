use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub location: String,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: i64, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            location: String::new(),
        }
    }
}

/// Progress record for a new hire working through onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingRecord {
    pub id: String,
    pub name: String,
    pub stage: String,
    pub started_on: NaiveDate,
}

impl OnboardingRecord {
    pub fn new(name: impl Into<String>, stage: impl Into<String>, started_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            stage: stage.into(),
            started_on,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn new(user_id: impl Into<String>, date: NaiveDate, check_in: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            date,
            check_in,
            check_out: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub raised_by: String,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Complaint {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        raised_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject: subject.into(),
            body: body.into(),
            raised_by: raised_by.into(),
            resolved: false,
            resolved_at: None,
        }
    }

    /// Marks the complaint resolved, stamping the resolution time.
    pub fn resolve(&mut self) {
        self.resolved = true;
        self.resolved_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complaint_resolve() {
        let mut complaint = Complaint::new("Broken AC", "Unit 2 blows warm air", "ada");
        assert!(!complaint.resolved);

        complaint.resolve();
        assert!(complaint.resolved);
        assert!(complaint.resolved_at.is_some());
    }

    #[test]
    fn test_attendance_open_shift() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let record = AttendanceRecord::new("user-operator", date, Utc::now());
        assert!(record.check_out.is_none());
    }
}
