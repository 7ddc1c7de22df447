//! Validation of account details before anything touches the database.
//!
//! Field limits mirror the column sizes in the `accounts` migration.

use pizzeria_core::{Email, Phone};

use super::error::SignupError;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const MAX_USERNAME_LENGTH: usize = 30;
pub const MAX_NAME_LENGTH: usize = 30;
pub const MAX_ADDRESS_LENGTH: usize = 50;

/// Raw signup form fields.
#[derive(Debug, Clone, Copy)]
pub struct SignupInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// A validated customer signup.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub username: String,
    pub name: String,
    pub email: Email,
    pub address: String,
    pub phone: Phone,
}

impl NewCustomer {
    /// Validate signup fields.
    ///
    /// Every field is required. Text fields are trimmed; the password is not.
    ///
    /// # Errors
    ///
    /// Returns the first [`SignupError`] found, checking for missing fields first.
    pub fn validate(input: &SignupInput<'_>) -> Result<Self, SignupError> {
        let fields = [
            input.name,
            input.email,
            input.address,
            input.phone,
            input.username,
            input.password,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(SignupError::MissingFields);
        }

        let username = validate_username(input.username)?;
        let name = check_length("Name", input.name.trim(), MAX_NAME_LENGTH)?;
        let address = check_length("Address", input.address.trim(), MAX_ADDRESS_LENGTH)?;
        let email = Email::parse(input.email)?;
        let phone = Phone::parse(input.phone)?;
        validate_password(input.password)?;

        Ok(Self {
            username,
            name,
            email,
            address,
            phone,
        })
    }
}

/// The profile a staff account gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffKind {
    Employee { phone: Phone },
    Manager,
}

/// A validated employee or manager account.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub username: String,
    pub name: String,
    pub kind: StaffKind,
}

impl NewStaff {
    /// Validate an employee account.
    ///
    /// # Errors
    ///
    /// Returns a [`SignupError`] for missing, oversized or malformed fields.
    pub fn employee(username: &str, name: &str, phone: &str) -> Result<Self, SignupError> {
        let phone = Phone::parse(phone)?;
        Self::build(username, name, StaffKind::Employee { phone })
    }

    /// Validate a manager account.
    ///
    /// # Errors
    ///
    /// Returns a [`SignupError`] for missing or oversized fields.
    pub fn manager(username: &str, name: &str) -> Result<Self, SignupError> {
        Self::build(username, name, StaffKind::Manager)
    }

    fn build(username: &str, name: &str, kind: StaffKind) -> Result<Self, SignupError> {
        if username.trim().is_empty() || name.trim().is_empty() {
            return Err(SignupError::MissingFields);
        }
        Ok(Self {
            username: validate_username(username)?,
            name: check_length("Name", name.trim(), MAX_NAME_LENGTH)?,
            kind,
        })
    }
}

/// Validate password meets requirements.
///
/// # Errors
///
/// Returns `SignupError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), SignupError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SignupError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<String, SignupError> {
    let username = username.trim();
    if username.chars().any(char::is_whitespace) {
        return Err(SignupError::UsernameWhitespace);
    }
    check_length("Username", username, MAX_USERNAME_LENGTH)
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<String, SignupError> {
    if value.chars().count() > max {
        return Err(SignupError::TooLong { field, max });
    }
    Ok(value.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> SignupInput<'static> {
        SignupInput {
            name: "Mario Rossi",
            email: "mario@example.com",
            address: "1 Via Roma",
            phone: "555-010-2030",
            username: "mario",
            password: "margherita",
        }
    }

    #[test]
    fn test_valid_signup_is_normalized() {
        let mut raw = input();
        raw.name = "  Mario Rossi ";
        let customer = NewCustomer::validate(&raw).unwrap();
        assert_eq!(customer.name, "Mario Rossi");
        assert_eq!(customer.phone.as_str(), "5550102030");
        assert_eq!(customer.username, "mario");
    }

    #[test]
    fn test_any_blank_field_is_missing() {
        for blank in 0..6 {
            let mut raw = input();
            match blank {
                0 => raw.name = "",
                1 => raw.email = " ",
                2 => raw.address = "",
                3 => raw.phone = "",
                4 => raw.username = "",
                _ => raw.password = "",
            }
            assert_eq!(
                NewCustomer::validate(&raw).unwrap_err(),
                SignupError::MissingFields
            );
        }
    }

    #[test]
    fn test_short_password() {
        let mut raw = input();
        raw.password = "pizza";
        assert_eq!(
            NewCustomer::validate(&raw).unwrap_err(),
            SignupError::WeakPassword { min: 8 }
        );
    }

    #[test]
    fn test_field_lengths() {
        let long_address = "x".repeat(51);
        let mut raw = input();
        raw.address = &long_address;
        assert_eq!(
            NewCustomer::validate(&raw).unwrap_err(),
            SignupError::TooLong {
                field: "Address",
                max: 50
            }
        );

        let long_username = "u".repeat(31);
        let mut raw = input();
        raw.username = &long_username;
        assert!(matches!(
            NewCustomer::validate(&raw).unwrap_err(),
            SignupError::TooLong {
                field: "Username",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_email_and_phone() {
        let mut raw = input();
        raw.email = "mario.example.com";
        assert!(matches!(
            NewCustomer::validate(&raw).unwrap_err(),
            SignupError::InvalidEmail(_)
        ));

        let mut raw = input();
        raw.phone = "call me";
        assert!(matches!(
            NewCustomer::validate(&raw).unwrap_err(),
            SignupError::InvalidPhone(_)
        ));
    }

    #[test]
    fn test_username_with_spaces() {
        let mut raw = input();
        raw.username = "mario rossi";
        assert_eq!(
            NewCustomer::validate(&raw).unwrap_err(),
            SignupError::UsernameWhitespace
        );
    }

    #[test]
    fn test_staff_accounts() {
        let employee = NewStaff::employee("luigi", "Luigi", "5550001111").unwrap();
        assert!(matches!(employee.kind, StaffKind::Employee { .. }));

        let manager = NewStaff::manager("peach", "Peach").unwrap();
        assert_eq!(manager.kind, StaffKind::Manager);

        assert_eq!(
            NewStaff::manager("", "Peach").unwrap_err(),
            SignupError::MissingFields
        );
        assert!(NewStaff::employee("toad", "Toad", "nope").is_err());
    }
}
