//! Phone numbers for customers and employees.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("phone number cannot be empty")]
    Empty,
    #[error("phone number may only contain digits, spaces, dashes, dots and parentheses")]
    InvalidCharacter,
    #[error("phone number must have between {min} and {max} digits")]
    DigitCount { min: usize, max: usize },
}

/// A phone number normalized to digits with an optional leading `+`.
///
/// Formatting characters (spaces, dashes, dots, parentheses) are stripped, so
/// `(555) 010-2030` is stored as `5550102030`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub const MIN_DIGITS: usize = 7;
    pub const MAX_DIGITS: usize = 15;

    /// Parse and normalize a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError`] if the input is empty, contains letters or other
    /// symbols, or has a digit count outside 7..=15.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let (plus, rest) = s
            .strip_prefix('+')
            .map_or((false, s), |rest| (true, rest));

        let mut digits = String::with_capacity(rest.len() + 1);
        if plus {
            digits.push('+');
        }
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(PhoneError::InvalidCharacter),
            }
        }

        let count = digits.chars().filter(char::is_ascii_digit).count();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&count) {
            return Err(PhoneError::DigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(digits))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_formatting() {
        assert_eq!(Phone::parse("(555) 010-2030").unwrap().as_str(), "5550102030");
        assert_eq!(Phone::parse("555.010.2030").unwrap().as_str(), "5550102030");
    }

    #[test]
    fn test_keeps_leading_plus() {
        assert_eq!(
            Phone::parse("+39 06 1234 5678").unwrap().as_str(),
            "+390612345678"
        );
    }

    #[test]
    fn test_rejects_letters_and_inner_plus() {
        assert_eq!(Phone::parse("555-PIZZA"), Err(PhoneError::InvalidCharacter));
        assert_eq!(Phone::parse("555+0102030"), Err(PhoneError::InvalidCharacter));
    }

    #[test]
    fn test_digit_count_bounds() {
        assert!(Phone::parse("123456").is_err());
        assert!(Phone::parse("1234567").is_ok());
        assert!(Phone::parse("123456789012345").is_ok());
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::DigitCount { .. })
        ));
    }

    #[test]
    fn test_empty() {
        assert_eq!(Phone::parse("  "), Err(PhoneError::Empty));
    }
}
