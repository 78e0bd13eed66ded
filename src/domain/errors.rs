//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided identifier is zero or negative.
    NonPositiveIdentifier(i64),

    /// The provided email address is empty or malformed.
    InvalidEmail(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveIdentifier(value) => {
                write!(f, "The identifier must be a positive integer, got: {}", value)
            }
            Self::InvalidEmail(email) => {
                write!(f, "Invalid email address: {:?}", email)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
