//! User repository: login accounts and role profiles.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pizzeria_core::{CustomerId, Email, EmployeeId, ManagerId, Phone, UserId};

use super::RepositoryError;
use crate::models::{Customer, Profiles, User};
use crate::services::auth::{NewCustomer, NewStaff, StaffKind};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialsRow {
    id: i32,
    username: String,
    created_at: DateTime<Utc>,
    password_hash: String,
}

#[derive(Debug, sqlx::FromRow)]
struct ProfilesRow {
    customer_id: Option<i32>,
    employee_id: Option<i32>,
    manager_id: Option<i32>,
}

impl From<ProfilesRow> for Profiles {
    fn from(row: ProfilesRow) -> Self {
        Self {
            customer: row.customer_id.map(CustomerId::new),
            employee: row.employee_id.map(EmployeeId::new),
            manager: row.manager_id.map(ManagerId::new),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    user_id: i32,
    name: String,
    email: String,
    address: String,
    phone: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let phone = Phone::parse(&row.phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            user_id: UserId::new(row.user_id),
            name: row.name,
            email,
            address: row.address,
            phone,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user accounts and their role profiles.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user and their password hash by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r"
            SELECT id, username, created_at, password_hash
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            let user = User {
                id: UserId::new(r.id),
                username: r.username,
                created_at: r.created_at,
            };
            (user, r.password_hash)
        }))
    }

    /// Check whether a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Look up which role profiles a user holds.
    ///
    /// Returns `None` if the user no longer exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn profiles(&self, user_id: UserId) -> Result<Option<Profiles>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfilesRow>(
            r"
            SELECT c.id AS customer_id, e.id AS employee_id, m.id AS manager_id
            FROM users u
            LEFT JOIN customers c ON c.user_id = u.id
            LEFT JOIN employees e ON e.user_id = u.id
            LEFT JOIN managers m ON m.user_id = u.id
            WHERE u.id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Profiles::from))
    }

    /// Get the customer profile for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored contact details are invalid.
    pub async fn get_customer(&self, user_id: UserId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, user_id, name, email, address, phone
            FROM customers
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a user and their customer profile in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_customer_account(
        &self,
        customer: &NewCustomer,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, created_at
            ",
        )
        .bind(&customer.username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_write(e, "username already exists"))?;

        sqlx::query(
            r"
            INSERT INTO customers (user_id, name, email, address, phone)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(&customer.phone)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user.into())
    }

    /// Create a user and an employee or manager profile in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_staff_account(
        &self,
        staff: &NewStaff,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, created_at
            ",
        )
        .bind(&staff.username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_write(e, "username already exists"))?;

        match &staff.kind {
            StaffKind::Employee { phone } => {
                sqlx::query("INSERT INTO employees (user_id, name, phone) VALUES ($1, $2, $3)")
                    .bind(user.id)
                    .bind(&staff.name)
                    .bind(phone)
                    .execute(&mut *tx)
                    .await?;
            }
            StaffKind::Manager => {
                sqlx::query("INSERT INTO managers (user_id, name) VALUES ($1, $2)")
                    .bind(user.id)
                    .bind(&staff.name)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(user.into())
    }
}
