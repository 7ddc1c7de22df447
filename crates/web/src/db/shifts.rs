//! Shift repository.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use pizzeria_core::{EmployeeId, ShiftId, ShiftWindow};

use super::RepositoryError;
use crate::models::Shift;

#[derive(Debug, sqlx::FromRow)]
struct ShiftRow {
    id: i32,
    shift_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    employee_id: Option<i32>,
    employee_name: Option<String>,
}

impl TryFrom<ShiftRow> for Shift {
    type Error = RepositoryError;

    fn try_from(row: ShiftRow) -> Result<Self, Self::Error> {
        let window = ShiftWindow::new(row.shift_date, row.start_time, row.end_time)
            .map_err(|e| RepositoryError::DataCorruption(format!("shift {}: {e}", row.id)))?;

        Ok(Self {
            id: ShiftId::new(row.id),
            window,
            employee_id: row.employee_id.map(EmployeeId::new),
            employee_name: row.employee_name,
        })
    }
}

/// Repository for employee shifts.
pub struct ShiftRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShiftRepository<'a> {
    /// Create a new shift repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every shift, assigned or not, in schedule order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Shift>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShiftRow>(
            r"
            SELECT s.id, s.shift_date, s.start_time, s.end_time,
                   s.employee_id, e.name AS employee_name
            FROM shifts s
            LEFT JOIN employees e ON e.id = s.employee_id
            ORDER BY s.shift_date ASC, s.start_time ASC, s.id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Shifts assigned to one employee, in schedule order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_employee(
        &self,
        employee: EmployeeId,
    ) -> Result<Vec<Shift>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShiftRow>(
            r"
            SELECT s.id, s.shift_date, s.start_time, s.end_time,
                   s.employee_id, e.name AS employee_name
            FROM shifts s
            JOIN employees e ON e.id = s.employee_id
            WHERE s.employee_id = $1
            ORDER BY s.shift_date ASC, s.start_time ASC, s.id ASC
            ",
        )
        .bind(employee)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Schedule a shift for an employee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the employee no longer exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        employee: EmployeeId,
        window: &ShiftWindow,
    ) -> Result<ShiftId, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO shifts (shift_date, start_time, end_time, employee_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(window.date)
        .bind(window.start)
        .bind(window.end)
        .bind(employee)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "duplicate shift"))?;

        Ok(ShiftId::new(id))
    }
}
