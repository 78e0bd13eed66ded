//! ContactEmail value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

// Local part is a dot-atom or a quoted string. Domain is either dot-separated
// hostname labels (the last one at least two characters, so punycode TLDs
// pass) or a bracketed address literal checked in `is_valid_literal`.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*"#,
        r#"|"(?:[\x20\x21\x23-\x5B\x5D-\x7E]|\\[\x20-\x7E])*")"#,
        r#"@(?:(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9]"#,
        r#"|\[(?P<literal>[^\[\]\\]+)\])$"#,
    ))
    .expect("Failed to compile email regex")
});

/// Maximum length of an address (RFC 5321 path limit).
const MAX_EMAIL_LENGTH: usize = 254;

/// The email address of a Mailjet contact.
///
/// Mailjet accepts an email in place of the numeric ID when looking up a
/// contact, so the address is validated before it is used as a path segment.
///
/// # Example
///
/// ```
/// use mailjet_adapter::domain::ContactEmail;
///
/// let email = ContactEmail::new("jane.doe@example.com").unwrap();
/// assert_eq!(email.as_str(), "jane.doe@example.com");
/// assert!(ContactEmail::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Create a new ContactEmail, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the address is empty,
    /// longer than 254 characters, or not a valid `local@domain` address. The
    /// local part may be quoted and the domain may be an address literal.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
            return false;
        }

        match EMAIL_REGEX.captures(email) {
            Some(captures) => captures
                .name("literal")
                .map_or(true, |literal| Self::is_valid_literal(literal.as_str())),
            None => false,
        }
    }

    /// `[192.0.2.1]` or `[IPv6:2001:db8::1]`.
    fn is_valid_literal(literal: &str) -> bool {
        match literal.strip_prefix("IPv6:") {
            Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
            None => literal.parse::<Ipv4Addr>().is_ok(),
        }
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for ContactEmail {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContactEmail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ContactEmail::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
