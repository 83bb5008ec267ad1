//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone cannot be empty")]
    Empty,
    /// The input is not exactly nine ASCII digits.
    #[error("phone must be exactly 9 digits")]
    InvalidFormat,
}

/// A phone number: exactly nine ASCII digits, no separators.
///
/// ## Examples
///
/// ```
/// use rolodex_core::Phone;
///
/// assert!(Phone::parse("123456789").is_ok());
/// assert!(Phone::parse("12345678").is_err());   // too short
/// assert!(Phone::parse("1234567890").is_err()); // too long
/// assert!(Phone::parse("12345678a").is_err());  // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Required number of digits.
    pub const DIGITS: usize = 9;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not exactly nine
    /// ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if s.len() != Self::DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Phone::parse("123456789").is_ok());
        assert!(Phone::parse("000000000").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            Phone::parse("12345678"),
            Err(PhoneError::InvalidFormat)
        ));
        assert!(matches!(
            Phone::parse("1234567890"),
            Err(PhoneError::InvalidFormat)
        ));
    }

    #[test]
    fn test_parse_non_digits() {
        assert!(matches!(
            Phone::parse("12345678a"),
            Err(PhoneError::InvalidFormat)
        ));
        assert!(matches!(
            Phone::parse("123 45678"),
            Err(PhoneError::InvalidFormat)
        ));
        // Unicode digits are rejected; only ASCII counts
        assert!(Phone::parse("１２３４５６７８９").is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("987654321").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"987654321\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
