//! Manager handlers: shift scheduling and employee management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    body::Bytes,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;

use pizzeria_core::{EmployeeId, Role, ShiftWindow, ShiftWindowError};

use super::{Page, forms};
use crate::db::{EmployeeRepository, RepositoryError, ShiftRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flashes, RequireManager, flash};
use crate::models::{Employee, Flash, Shift};
use crate::state::AppState;

const SHIFTS_PATH: &str = "/manager/shifts";
const NEW_SHIFT_PATH: &str = "/manager/shifts/new";
const EMPLOYEES_PATH: &str = "/manager/employees";

/// Add shift form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShiftForm {
    pub employee_name: String,
    pub shift_date: String,
    pub start_time: String,
    pub end_time: String,
}

impl ShiftForm {
    /// Check presence and parse the window; the employee is looked up later.
    fn validate(&self) -> Result<(&str, ShiftWindow), &'static str> {
        let name = self.employee_name.trim();
        if [
            name,
            self.shift_date.as_str(),
            self.start_time.as_str(),
            self.end_time.as_str(),
        ]
        .iter()
        .any(|f| f.trim().is_empty())
        {
            return Err("Missing data");
        }

        let window = ShiftWindow::parse(&self.shift_date, &self.start_time, &self.end_time)
            .map_err(|e| match e {
                ShiftWindowError::Date(_) | ShiftWindowError::Time(_) => "Invalid date or time",
                ShiftWindowError::Empty => "Shift cannot start and end at the same time",
            })?;

        Ok((name, window))
    }
}

fn employee_not_found(name: &str) -> String {
    format!("Employee with name \"{name}\" not found")
}

/// All shifts template.
#[derive(Template, WebTemplate)]
#[template(path = "manager/shifts.html")]
pub struct ShiftsTemplate {
    pub page: Page,
    pub shifts: Vec<Shift>,
}

/// Add shift form template.
#[derive(Template, WebTemplate)]
#[template(path = "manager/add_shift.html")]
pub struct AddShiftTemplate {
    pub page: Page,
    pub employees: Vec<Employee>,
}

/// Current employees template.
#[derive(Template, WebTemplate)]
#[template(path = "manager/employees.html")]
pub struct EmployeesTemplate {
    pub page: Page,
    pub employees: Vec<Employee>,
}

/// `GET /manager/shifts`.
pub async fn shifts(
    State(state): State<AppState>,
    RequireManager(ctx): RequireManager,
    Flashes(flashes): Flashes,
) -> Result<ShiftsTemplate, AppError> {
    let shifts = ShiftRepository::new(state.pool()).list_all().await?;

    Ok(ShiftsTemplate {
        page: Page::for_user(ctx.user, Some(Role::Manager), flashes),
        shifts,
    })
}

/// `GET /manager/shifts/new`. Employee names are offered as suggestions.
pub async fn new_shift(
    State(state): State<AppState>,
    RequireManager(ctx): RequireManager,
    Flashes(flashes): Flashes,
) -> Result<AddShiftTemplate, AppError> {
    let employees = EmployeeRepository::new(state.pool()).list().await?;

    Ok(AddShiftTemplate {
        page: Page::for_user(ctx.user, Some(Role::Manager), flashes),
        employees,
    })
}

/// `POST /manager/shifts`: assign a shift to an employee by name.
pub async fn create_shift(
    State(state): State<AppState>,
    session: Session,
    RequireManager(ctx): RequireManager,
    Form(form): Form<ShiftForm>,
) -> Result<Redirect, AppError> {
    let (name, window) = match form.validate() {
        Ok(valid) => valid,
        Err(message) => {
            flash(&session, Flash::error(message)).await;
            return Ok(Redirect::to(NEW_SHIFT_PATH));
        }
    };

    let Some(employee) = EmployeeRepository::new(state.pool())
        .find_by_name(name)
        .await?
    else {
        flash(&session, Flash::error(employee_not_found(name))).await;
        return Ok(Redirect::to(NEW_SHIFT_PATH));
    };

    let shift_id = match ShiftRepository::new(state.pool())
        .create(employee.id, &window)
        .await
    {
        Ok(id) => id,
        // Deleted between the lookup and the insert.
        Err(RepositoryError::NotFound) => {
            flash(&session, Flash::error(employee_not_found(name))).await;
            return Ok(Redirect::to(NEW_SHIFT_PATH));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        manager_id = %ctx.manager_id,
        %shift_id,
        employee_id = %employee.id,
        date = %window.date,
        "shift assigned"
    );
    flash(&session, Flash::success("Shift assigned successfully")).await;
    Ok(Redirect::to(SHIFTS_PATH))
}

/// `GET /manager/employees`.
pub async fn employees(
    State(state): State<AppState>,
    RequireManager(ctx): RequireManager,
    Flashes(flashes): Flashes,
) -> Result<EmployeesTemplate, AppError> {
    let employees = EmployeeRepository::new(state.pool()).list().await?;

    Ok(EmployeesTemplate {
        page: Page::for_user(ctx.user, Some(Role::Manager), flashes),
        employees,
    })
}

/// `POST /manager/employees/delete`: remove ticked employees and their accounts.
pub async fn delete_employees(
    State(state): State<AppState>,
    session: Session,
    RequireManager(ctx): RequireManager,
    body: Bytes,
) -> Result<Redirect, AppError> {
    let ids: Vec<EmployeeId> = forms::parse_ids(&body, "selected_employees");
    if ids.is_empty() {
        flash(&session, Flash::info("No employees selected")).await;
        return Ok(Redirect::to(EMPLOYEES_PATH));
    }

    let deleted = EmployeeRepository::new(state.pool())
        .delete_with_accounts(&ids)
        .await?;

    tracing::info!(
        manager_id = %ctx.manager_id,
        requested = ids.len(),
        deleted,
        "employees deleted"
    );
    flash(&session, Flash::success("Selected employees deleted successfully")).await;
    Ok(Redirect::to(EMPLOYEES_PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, date: &str, start: &str, end: &str) -> ShiftForm {
        ShiftForm {
            employee_name: name.to_owned(),
            shift_date: date.to_owned(),
            start_time: start.to_owned(),
            end_time: end.to_owned(),
        }
    }

    #[test]
    fn test_valid_form() {
        let f = form(" Mario ", "2024-03-01", "09:00", "17:00");
        let (name, window) = f.validate().unwrap();
        assert_eq!(name, "Mario");
        assert_eq!(window.duration_minutes(), 8 * 60);
    }

    #[test]
    fn test_missing_data() {
        assert_eq!(
            form("", "2024-03-01", "09:00", "17:00").validate().unwrap_err(),
            "Missing data"
        );
        assert_eq!(
            form("Mario", "2024-03-01", "  ", "17:00").validate().unwrap_err(),
            "Missing data"
        );
    }

    #[test]
    fn test_invalid_date_or_time() {
        assert_eq!(
            form("Mario", "01/03/2024", "09:00", "17:00").validate().unwrap_err(),
            "Invalid date or time"
        );
        assert_eq!(
            form("Mario", "2024-03-01", "9am", "17:00").validate().unwrap_err(),
            "Invalid date or time"
        );
    }

    #[test]
    fn test_zero_length_shift() {
        assert_eq!(
            form("Mario", "2024-03-01", "17:00", "17:00").validate().unwrap_err(),
            "Shift cannot start and end at the same time"
        );
    }

    #[test]
    fn test_closing_shift_past_midnight() {
        let (_, window) = form("Mario", "2024-03-01", "18:00", "01:00").validate().unwrap();
        assert!(window.is_overnight());
        assert_eq!(window.duration_minutes(), 7 * 60);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            employee_not_found("Luigi"),
            "Employee with name \"Luigi\" not found"
        );
    }
}
