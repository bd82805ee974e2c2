//! Error types for waitlist validation.

use thiserror::Error;

/// Errors returned while validating waitlist input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WaitlistDomainError {
    /// The email address is missing or does not look like an address.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}

/// Error returned while parsing a stored waitlist role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown waitlist role: {0}")]
pub struct ParseWaitlistRoleError(pub String);
