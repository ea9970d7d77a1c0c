use std::fmt;

/// The fixed set of collections the console persists.
///
/// Collections are known at initialization and never created implicitly;
/// anything outside this registry is rejected at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tasks,
    Users,
    Expenses,
    Inventory,
    Payroll,
    Onboarding,
    Complaints,
    Attendance,
    Meetings,
    PasswordRequests,
    Chats,
    Templates,
    Metadata,
}

impl Collection {
    /// Every known collection, in snapshot order.
    pub const ALL: [Collection; 13] = [
        Collection::Tasks,
        Collection::Users,
        Collection::Expenses,
        Collection::Inventory,
        Collection::Payroll,
        Collection::Onboarding,
        Collection::Complaints,
        Collection::Attendance,
        Collection::Meetings,
        Collection::PasswordRequests,
        Collection::Chats,
        Collection::Templates,
        Collection::Metadata,
    ];

    /// Returns the collection name as it appears in snapshots and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Tasks => "tasks",
            Collection::Users => "users",
            Collection::Expenses => "expenses",
            Collection::Inventory => "inventory",
            Collection::Payroll => "payroll",
            Collection::Onboarding => "onboarding",
            Collection::Complaints => "complaints",
            Collection::Attendance => "attendance",
            Collection::Meetings => "meetings",
            Collection::PasswordRequests => "password_requests",
            Collection::Chats => "chats",
            Collection::Templates => "templates",
            Collection::Metadata => "metadata",
        }
    }

    /// Parse from a collection name.
    pub fn parse(s: &str) -> Option<Self> {
        Collection::ALL.iter().find(|c| c.as_str() == s).copied()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_all() {
        for collection in Collection::ALL {
            assert_eq!(Collection::parse(collection.as_str()), Some(collection));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Collection::parse("widgets"), None);
        assert_eq!(Collection::parse(""), None);
        assert_eq!(Collection::parse("Tasks"), None);
    }

    #[test]
    fn test_all_names_unique() {
        let mut names: Vec<&str> = Collection::ALL.iter().map(|c| c.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Collection::ALL.len());
    }
}
