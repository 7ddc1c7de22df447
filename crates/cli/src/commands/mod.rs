//! CLI subcommands.

pub mod menu;
pub mod migrate;
pub mod staff;

use sqlx::PgPool;
use thiserror::Error;

use pizzeria_web::config::{ConfigError, get_database_url};
use pizzeria_web::db::{self, RepositoryError};
use pizzeria_web::services::auth::AuthError;

/// Environment variable holding the database connection string.
pub const DATABASE_URL_VAR: &str = "PIZZERIA_DATABASE_URL";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid environment configuration.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Account creation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Bad command-line input.
    #[error("{0}")]
    Invalid(String),
}

/// Load `.env` and connect to the pizzeria database.
async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = get_database_url(DATABASE_URL_VAR)?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_keep_their_cause() {
        let err = CliError::from(AuthError::Repository(RepositoryError::DataCorruption(
            "employee 7 has a bad phone".to_owned(),
        )));
        let message = err.to_string();
        assert!(message.contains("employee 7 has a bad phone"), "{message}");
        assert!(!message.contains("Something went wrong"));

        assert_eq!(
            CliError::from(AuthError::UserAlreadyExists).to_string(),
            "user already exists"
        );
    }
}
