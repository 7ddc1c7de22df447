//! User roles.
//!
//! A user's role is not stored on the user row; it is implied by which of the
//! `customers`, `employees` or `managers` tables holds a profile for them.

use serde::{Deserialize, Serialize};

/// The role a logged-in user acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses the menu, fills a cart and checks out.
    Customer,
    /// Fulfills orders and sees their own shifts.
    Employee,
    /// Schedules shifts and manages employees.
    Manager,
}

impl Role {
    /// Order in which profiles are checked when a user has more than one.
    pub const PRECEDENCE: [Self; 3] = [Self::Employee, Self::Manager, Self::Customer];

    /// Page a user of this role lands on after login.
    #[must_use]
    pub const fn landing_path(self) -> &'static str {
        match self {
            Self::Customer => "/menu",
            Self::Employee => "/employee/orders",
            Self::Manager => "/manager/shifts",
        }
    }

    /// Whether this role may see and complete orders.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Employee | Self::Manager)
    }

    /// Pick the effective role from the set of profiles a user holds.
    ///
    /// Employee wins over manager, which wins over customer.
    #[must_use]
    pub fn resolve(held: &[Self]) -> Option<Self> {
        Self::PRECEDENCE.into_iter().find(|r| held.contains(r))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Employee => write!(f, "employee"),
            Self::Manager => write!(f, "manager"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "employee" => Ok(Self::Employee),
            "manager" => Ok(Self::Manager),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            Role::resolve(&[Role::Customer, Role::Manager, Role::Employee]),
            Some(Role::Employee)
        );
        assert_eq!(
            Role::resolve(&[Role::Customer, Role::Manager]),
            Some(Role::Manager)
        );
        assert_eq!(Role::resolve(&[Role::Customer]), Some(Role::Customer));
        assert_eq!(Role::resolve(&[]), None);
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Employee.landing_path(), "/employee/orders");
        assert_eq!(Role::Manager.landing_path(), "/manager/shifts");
        assert_eq!(Role::Customer.landing_path(), "/menu");
    }

    #[test]
    fn test_display_from_str() {
        for role in Role::PRECEDENCE {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("chef".parse::<Role>().is_err());
    }

    #[test]
    fn test_staff() {
        assert!(Role::Employee.is_staff());
        assert!(Role::Manager.is_staff());
        assert!(!Role::Customer.is_staff());
    }
}
