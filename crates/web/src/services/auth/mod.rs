//! Authentication service.
//!
//! Customer signup, username/password login and staff account creation.
//! Passwords are hashed with Argon2id on the blocking thread pool.

mod error;
mod validation;

pub use error::{AuthError, SignupError};
pub use validation::{
    MIN_PASSWORD_LENGTH, NewCustomer, NewStaff, SignupInput, StaffKind, validate_password,
};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new customer: a user account plus customer profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if any field is missing or invalid.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn register_customer(&self, input: &SignupInput<'_>) -> Result<User, AuthError> {
        let customer = NewCustomer::validate(input)?;

        // Reject taken usernames before paying for a hash.
        if self.users.username_exists(&customer.username).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password_blocking(input.password.to_owned()).await?;

        let user = self
            .users
            .create_customer_account(&customer, &password_hash)
            .await
            .map_err(map_conflict)?;

        tracing::info!(user_id = %user.id, username = %user.username, "customer registered");
        Ok(user)
    }

    /// Create an employee or manager account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn create_staff(&self, staff: &NewStaff, password: &str) -> Result<User, AuthError> {
        validate_password(password)?;
        let password_hash = hash_password_blocking(password.to_owned()).await?;

        let user = self
            .users
            .create_staff_account(staff, &password_hash)
            .await
            .map_err(map_conflict)?;

        tracing::info!(user_id = %user.id, username = %user.username, "staff account created");
        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = self
            .users
            .get_credentials(username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = password.to_owned();
        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|_| AuthError::PasswordHash)??;

        Ok(user)
    }
}

fn map_conflict(e: RepositoryError) -> AuthError {
    match e {
        RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
        other => AuthError::Repository(other),
    }
}

async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| AuthError::PasswordHash)?
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the hash is malformed or does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
