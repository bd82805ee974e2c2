//! Validated email address used as the waitlist key.

use super::WaitlistDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted address, in characters; matches the storage column.
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Email address that passed the basic shape check.
///
/// The check mirrors `^[^\s@]+@[^\s@]+\.[^\s@]+$`: a non-empty local part, a
/// single `@`, and a domain with a dot that is neither its first nor its
/// last character. Addresses longer than [`MAX_EMAIL_LENGTH`] characters are
/// rejected. The address is kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`WaitlistDomainError::InvalidEmail`] when the value contains
    /// whitespace, does not contain exactly one `@`, has an empty local part,
    /// has no interior dot in its domain, or is too long to store.
    pub fn new(value: impl Into<String>) -> Result<Self, WaitlistDomainError> {
        let raw = value.into();
        if raw.chars().count() > MAX_EMAIL_LENGTH || !is_basic_email(&raw) {
            return Err(WaitlistDomainError::InvalidEmail(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_basic_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
