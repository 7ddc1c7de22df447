//! Staff account commands.
//!
//! Employees and managers can't sign up on the site; they are created here.
//!
//! ```bash
//! pizzeria staff create -r employee -u luigi -p 'long-password' -n "Luigi" --phone "555 0100"
//! pizzeria staff list
//! ```

use clap::ValueEnum;

use pizzeria_web::db::{EmployeeRepository, ManagerRepository};
use pizzeria_web::services::auth::{AuthService, NewStaff, StaffKind};

use super::{CliError, connect};

/// Staff roles that can be created from the CLI. Customers sign up on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StaffRole {
    Employee,
    Manager,
}

/// Validate the command-line fields into a staff account.
fn new_staff(
    role: StaffRole,
    username: &str,
    name: &str,
    phone: Option<&str>,
) -> Result<NewStaff, CliError> {
    let staff = match role {
        StaffRole::Employee => {
            let phone = phone
                .ok_or_else(|| CliError::Invalid("employees need a --phone number".to_owned()))?;
            NewStaff::employee(username, name, phone)
        }
        StaffRole::Manager => NewStaff::manager(username, name),
    };
    staff.map_err(|e| CliError::Invalid(e.to_string()))
}

/// Shifts are assigned by employee name, so a second employee with the same
/// name could never be scheduled.
fn ensure_name_free(staff: &NewStaff, name_taken: bool) -> Result<(), CliError> {
    if name_taken && matches!(staff.kind, StaffKind::Employee { .. }) {
        return Err(CliError::Invalid(format!(
            "an employee named {:?} already exists; pick a distinct name so shifts can be assigned",
            staff.name
        )));
    }
    Ok(())
}

/// Create an employee or manager account.
///
/// # Errors
///
/// Returns an error for invalid input, a taken username or employee name,
/// or database failures.
pub async fn create(
    role: StaffRole,
    username: &str,
    password: &str,
    name: &str,
    phone: Option<&str>,
) -> Result<(), CliError> {
    let staff = new_staff(role, username, name, phone)?;
    let pool = connect().await?;

    let name_taken = EmployeeRepository::new(&pool)
        .find_by_name(&staff.name)
        .await?
        .is_some();
    ensure_name_free(&staff, name_taken)?;

    let user = AuthService::new(&pool).create_staff(&staff, password).await?;

    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        role = ?role,
        "Staff account created"
    );
    Ok(())
}

/// Print all employees and managers.
///
/// # Errors
///
/// Returns an error if the database can't be queried.
pub async fn list() -> Result<(), CliError> {
    let pool = connect().await?;
    let employees = EmployeeRepository::new(&pool).list().await?;
    let managers = ManagerRepository::new(&pool).list().await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Managers ({})", managers.len());
        for manager in &managers {
            println!("  {:>4}  {}", manager.id, manager.name);
        }
        println!("Employees ({})", employees.len());
        for employee in &employees {
            println!("  {:>4}  {:<30}  {}", employee.id, employee.name, employee.phone);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_requires_phone() {
        let err = new_staff(StaffRole::Employee, "luigi", "Luigi", None).unwrap_err();
        assert!(err.to_string().contains("--phone"));
    }

    #[test]
    fn test_manager_ignores_phone() {
        let staff = new_staff(StaffRole::Manager, "maria", "Maria Rossi", Some("555 0100"));
        assert!(staff.is_ok());
    }

    #[test]
    fn test_duplicate_employee_name_refused() {
        let staff = new_staff(StaffRole::Employee, "luigi2", "Luigi", Some("555 0100")).unwrap();
        let err = ensure_name_free(&staff, true).unwrap_err();
        assert!(err.to_string().contains("\"Luigi\" already exists"));
        assert!(ensure_name_free(&staff, false).is_ok());
    }

    #[test]
    fn test_managers_may_share_names() {
        let staff = new_staff(StaffRole::Manager, "maria2", "Maria", None).unwrap();
        assert!(ensure_name_free(&staff, true).is_ok());
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        assert!(new_staff(StaffRole::Employee, "luigi", "Luigi", Some("abc")).is_err());
        assert!(new_staff(StaffRole::Manager, "has space", "Maria", None).is_err());
        assert!(new_staff(StaffRole::Manager, "maria", "  ", None).is_err());
    }
}
