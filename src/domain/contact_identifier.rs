//! ContactIdentifier value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The numeric `ID` Mailjet assigns to a contact.
///
/// Always strictly positive; zero and negative values are rejected at
/// construction.
///
/// # Example
///
/// ```
/// use mailjet_adapter::domain::ContactIdentifier;
///
/// let id = ContactIdentifier::new(42).unwrap();
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// assert!(ContactIdentifier::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactIdentifier(u64);

impl ContactIdentifier {
    /// Create a new ContactIdentifier.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonPositiveIdentifier` if `value <= 0`.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NonPositiveIdentifier(value));
        }
        Ok(Self(value as u64))
    }

    /// Get the raw identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for ContactIdentifier {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for ContactIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for ContactIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        ContactIdentifier::new(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContactIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
