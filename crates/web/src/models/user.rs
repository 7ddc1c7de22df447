//! Users and their role profiles.

use chrono::{DateTime, Utc};

use pizzeria_core::{CustomerId, Email, EmployeeId, ManagerId, Phone, Role, UserId};

/// A login account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Which role profiles a user holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Profiles {
    pub customer: Option<CustomerId>,
    pub employee: Option<EmployeeId>,
    pub manager: Option<ManagerId>,
}

impl Profiles {
    /// Roles the user holds, unordered.
    #[must_use]
    pub fn held(&self) -> Vec<Role> {
        let mut roles = Vec::with_capacity(3);
        if self.customer.is_some() {
            roles.push(Role::Customer);
        }
        if self.employee.is_some() {
            roles.push(Role::Employee);
        }
        if self.manager.is_some() {
            roles.push(Role::Manager);
        }
        roles
    }

    /// The role the dashboard dispatches on (employee, then manager, then customer).
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::resolve(&self.held())
    }
}

/// A customer profile.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: UserId,
    pub name: String,
    pub email: Email,
    pub address: String,
    pub phone: Phone,
}

/// An employee profile.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: EmployeeId,
    pub user_id: UserId,
    pub name: String,
    pub phone: Phone,
}

/// A manager profile.
#[derive(Debug, Clone)]
pub struct Manager {
    pub id: ManagerId,
    pub user_id: UserId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_profiles_has_no_role() {
        assert_eq!(Profiles::default().role(), None);
    }

    #[test]
    fn test_employee_profile_wins() {
        let profiles = Profiles {
            customer: Some(CustomerId::new(1)),
            employee: Some(EmployeeId::new(2)),
            manager: Some(ManagerId::new(3)),
        };
        assert_eq!(profiles.role(), Some(Role::Employee));
    }

    #[test]
    fn test_manager_beats_customer() {
        let profiles = Profiles {
            customer: Some(CustomerId::new(1)),
            employee: None,
            manager: Some(ManagerId::new(3)),
        };
        assert_eq!(profiles.role(), Some(Role::Manager));
    }

    #[test]
    fn test_customer_only() {
        let profiles = Profiles {
            customer: Some(CustomerId::new(1)),
            ..Profiles::default()
        };
        assert_eq!(profiles.role(), Some(Role::Customer));
        assert_eq!(profiles.held(), vec![Role::Customer]);
    }
}
