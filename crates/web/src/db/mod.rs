//! Database operations for the pizzeria `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Login accounts (username + Argon2 hash)
//! - `customers`, `employees`, `managers` - Role profiles, one per user at most
//! - `pizzas` - The menu
//! - `cart_items` - Cart lines; `order_id IS NULL` means still in the open cart
//! - `orders` - Checked-out carts awaiting fulfillment
//! - `shifts` - Employee shifts
//! - `tower_sessions.session` - Session storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p pizzeria-cli -- migrate
//! ```

pub mod cart;
pub mod menu;
pub mod orders;
pub mod shifts;
pub mod staff;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use menu::PizzaRepository;
pub use orders::OrderRepository;
pub use shifts::ShiftRepository;
pub use staff::{EmployeeRepository, ManagerRepository};
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Classify an insert error: unique violations become `Conflict`,
    /// foreign key violations become `NotFound`.
    fn from_write(e: sqlx::Error, conflict: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return Self::Conflict(conflict.to_owned());
            }
            if db_err.is_foreign_key_violation() {
                return Self::NotFound;
            }
        }
        Self::Database(e)
    }
}

/// Convert a database `INTEGER` quantity into an unsigned count.
fn quantity_from_db(quantity: i32) -> Result<u32, RepositoryError> {
    u32::try_from(quantity)
        .map_err(|_| RepositoryError::DataCorruption(format!("negative quantity {quantity}")))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_from_db() {
        assert_eq!(quantity_from_db(3).ok(), Some(3));
        assert!(matches!(
            quantity_from_db(-1),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = RepositoryError::from_write(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
