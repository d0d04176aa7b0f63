//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input is not exactly the required number of digits.
    #[error("phone number must be exactly {expected} digits, got {actual}")]
    WrongLength {
        /// Required digit count.
        expected: usize,
        /// Digit count of the input.
        actual: usize,
    },
    /// The input contains a non-digit character.
    #[error("phone number must contain only digits")]
    NonDigit,
}

/// A 10-digit phone number.
///
/// Phone numbers are the bare identity key for both customers and shop
/// owners: profiles are keyed by phone, orders reference both parties by
/// phone, and the number is immutable once a profile exists. This is an
/// identifier, not a verified credential - there is no OTP or carrier
/// validation anywhere in the system.
///
/// ## Constraints
///
/// - Exactly 10 ASCII digits, no separators or country prefix
///
/// ## Examples
///
/// ```
/// use portion_perfect_core::Phone;
///
/// assert!(Phone::parse("9876543210").is_ok());
///
/// assert!(Phone::parse("").is_err());            // empty
/// assert!(Phone::parse("98765").is_err());       // too short
/// assert!(Phone::parse("98765 43210").is_err()); // separator
/// assert!(Phone::parse("+919876543210").is_err()); // country prefix
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a valid phone number.
    pub const DIGITS: usize = 10;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly 10 characters long
    /// - Contains anything other than ASCII digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if s.len() != Self::DIGITS {
            return Err(PhoneError::WrongLength {
                expected: Self::DIGITS,
                actual: s.len(),
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
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
