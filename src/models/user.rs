use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            role,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// The administrative root account seeded into an empty store.
    pub fn seed_root() -> Self {
        Self {
            id: "user-root".to_string(),
            name: "Root Admin".to_string(),
            role: Role::Admin,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// The default operator account seeded into an empty store.
    pub fn seed_operator() -> Self {
        Self {
            id: "user-operator".to_string(),
            name: "Operator".to_string(),
            role: Role::Operator,
            active: true,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Operator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Operator => write!(f, "operator"),
        }
    }
}

/// A pending request to reset an account password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub id: String,
    pub user_id: String,
    pub requested_at: DateTime<Utc>,
    pub processed: bool,
}

impl PasswordRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            requested_at: Utc::now(),
            processed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_accounts() {
        let root = User::seed_root();
        let operator = User::seed_operator();
        assert_eq!(root.role, Role::Admin);
        assert_eq!(operator.role, Role::Operator);
        assert_ne!(root.id, operator.id);
    }

    #[test]
    fn test_password_request_starts_unprocessed() {
        let request = PasswordRequest::new("user-operator");
        assert!(!request.processed);
        assert_eq!(request.user_id, "user-operator");
    }
}
