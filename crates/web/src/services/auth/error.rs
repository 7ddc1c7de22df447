//! Authentication error types.

use thiserror::Error;

use pizzeria_core::{EmailError, PhoneError};

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong username or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Submitted account details failed validation.
    #[error("invalid account details: {0}")]
    Validation(#[from] SignupError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether this is a server-side failure rather than bad user input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Repository(_) | Self::PasswordHash)
    }

    /// Message safe to show on the signup or login page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Incorrect username or password".to_owned(),
            Self::UserAlreadyExists => "Username already taken".to_owned(),
            Self::Validation(err) => err.to_string(),
            Self::Repository(_) | Self::PasswordHash => {
                "Something went wrong, please try again".to_owned()
            }
        }
    }
}

/// Validation failures for signup and staff account details.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignupError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Username may not contain spaces")]
    UsernameWhitespace,

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Incorrect username or password"
        );
        assert_eq!(
            AuthError::UserAlreadyExists.user_message(),
            "Username already taken"
        );
        assert_eq!(
            AuthError::Validation(SignupError::MissingFields).user_message(),
            "Please fill in all fields"
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AuthError::Repository(RepositoryError::DataCorruption("bad row".into()));
        assert!(err.is_internal());
        assert!(!err.user_message().contains("bad row"));
        assert!(!AuthError::InvalidCredentials.is_internal());
    }
}
