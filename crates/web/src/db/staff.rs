//! Employee and manager repositories.

use sqlx::PgPool;

use pizzeria_core::{EmployeeId, ManagerId, Phone, UserId};

use super::RepositoryError;
use crate::models::{Employee, Manager};

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    user_id: i32,
    name: String,
    phone: String,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepositoryError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let phone = Phone::parse(&row.phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;

        Ok(Self {
            id: EmployeeId::new(row.id),
            user_id: UserId::new(row.user_id),
            name: row.name,
            phone,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ManagerRow {
    id: i32,
    user_id: i32,
    name: String,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Self {
            id: ManagerId::new(row.id),
            user_id: UserId::new(row.user_id),
            name: row.name,
        }
    }
}

/// Repository for employees.
pub struct EmployeeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all employees by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, user_id, name, phone FROM employees ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get the employee profile for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, user_id, name, phone FROM employees WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Find an employee by exact name. With duplicates, the oldest wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r"
            SELECT id, user_id, name, phone
            FROM employees
            WHERE name = $1
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Delete employees and their login accounts.
    ///
    /// Removing the user cascades to the employee row; their shifts become
    /// unassigned. Unknown IDs are ignored. Returns how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a statement fails.
    pub async fn delete_with_accounts(&self, ids: &[EmployeeId]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<i32> = ids.iter().map(EmployeeId::as_i32).collect();

        let mut tx = self.pool.begin().await?;

        let user_ids: Vec<(i32,)> =
            sqlx::query_as("SELECT user_id FROM employees WHERE id = ANY($1) FOR UPDATE")
                .bind(&ids)
                .fetch_all(&mut *tx)
                .await?;
        let user_ids: Vec<i32> = user_ids.into_iter().map(|(id,)| id).collect();

        let result = sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(&user_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }
}

/// Repository for managers.
pub struct ManagerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ManagerRepository<'a> {
    /// Create a new manager repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all managers by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Manager>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, ManagerRow>("SELECT id, user_id, name FROM managers ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(Manager::from).collect())
    }
}
