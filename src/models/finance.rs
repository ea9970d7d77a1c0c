use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub incurred_on: NaiveDate,
    pub recorded_by: String,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        incurred_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            amount,
            category: category.into(),
            incurred_on,
            recorded_by: String::new(),
        }
    }

    pub fn with_recorded_by(mut self, recorded_by: impl Into<String>) -> Self {
        self.recorded_by = recorded_by.into();
        self
    }
}

/// One payslip line for one user and pay period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipEntry {
    pub id: String,
    pub user_id: String,
    /// Pay period, e.g. "2026-08".
    pub period: String,
    pub amount: f64,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}

impl PayslipEntry {
    pub fn new(user_id: impl Into<String>, period: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            period: period.into(),
            amount,
            paid: false,
            paid_at: None,
        }
    }

    /// Marks the entry paid, stamping the payment time.
    pub fn mark_paid(&mut self) {
        self.paid = true;
        self.paid_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payslip_mark_paid() {
        let mut entry = PayslipEntry::new("user-operator", "2026-08", 2400.0);
        assert!(!entry.paid);
        assert!(entry.paid_at.is_none());

        entry.mark_paid();
        assert!(entry.paid);
        assert!(entry.paid_at.is_some());
    }

    #[test]
    fn test_expense_builder() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let expense = Expense::new("Printer toner", 89.5, "office", date).with_recorded_by("ada");
        assert_eq!(expense.recorded_by, "ada");
        assert_eq!(expense.category, "office");
    }
}
