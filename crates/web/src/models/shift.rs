//! Shift domain types.

use pizzeria_core::{EmployeeId, ShiftId, ShiftWindow};

/// Label shown for shifts whose employee has been deleted.
pub const UNASSIGNED: &str = "Not assigned";

/// A scheduled shift.
#[derive(Debug, Clone)]
pub struct Shift {
    pub id: ShiftId,
    pub window: ShiftWindow,
    pub employee_id: Option<EmployeeId>,
    pub employee_name: Option<String>,
}

impl Shift {
    /// `YYYY-MM-DD`.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.window.date.format("%Y-%m-%d").to_string()
    }

    /// Start time as `HH:MM` (employee view).
    #[must_use]
    pub fn start_short(&self) -> String {
        self.window.start.format("%H:%M").to_string()
    }

    /// End time as `HH:MM` (employee view).
    #[must_use]
    pub fn end_short(&self) -> String {
        self.window.end.format("%H:%M").to_string()
    }

    /// Start time as `HH:MM:SS` (manager view).
    #[must_use]
    pub fn start_long(&self) -> String {
        self.window.start.format("%H:%M:%S").to_string()
    }

    /// End time as `HH:MM:SS` (manager view).
    #[must_use]
    pub fn end_long(&self) -> String {
        self.window.end.format("%H:%M:%S").to_string()
    }

    /// Employee name, or "Not assigned".
    #[must_use]
    pub fn employee_label(&self) -> &str {
        self.employee_name.as_deref().unwrap_or(UNASSIGNED)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shift(employee_name: Option<&str>) -> Shift {
        Shift {
            id: ShiftId::new(1),
            window: ShiftWindow::parse("2024-05-04", "11:00", "19:30").unwrap(),
            employee_id: employee_name.map(|_| EmployeeId::new(3)),
            employee_name: employee_name.map(str::to_owned),
        }
    }

    #[test]
    fn test_labels() {
        let s = shift(Some("Luigi"));
        assert_eq!(s.date_label(), "2024-05-04");
        assert_eq!(s.start_short(), "11:00");
        assert_eq!(s.end_short(), "19:30");
        assert_eq!(s.start_long(), "11:00:00");
        assert_eq!(s.end_long(), "19:30:00");
        assert_eq!(s.employee_label(), "Luigi");
    }

    #[test]
    fn test_unassigned_label() {
        assert_eq!(shift(None).employee_label(), "Not assigned");
    }
}
