//! Waitlist entry aggregate.

use super::{EmailAddress, WaitlistRole};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One signup on the waitlist, unique by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    email: EmailAddress,
    role: WaitlistRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWaitlistEntryData {
    /// Unique email address.
    pub email: EmailAddress,
    /// Declared role.
    pub role: WaitlistRole,
    /// First signup timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest signup timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Creates a new entry stamped with the current time.
    #[must_use]
    pub fn new(email: EmailAddress, role: WaitlistRole, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            email,
            role,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWaitlistEntryData) -> Self {
        Self {
            email: data.email,
            role: data.role,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the declared role.
    #[must_use]
    pub const fn role(&self) -> WaitlistRole {
        self.role
    }

    /// Returns the first signup timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest signup timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a repeat signup: the role is overwritten and the creation
    /// time kept.
    #[must_use]
    pub fn merged_with(&self, newer: &Self) -> Self {
        Self {
            email: self.email.clone(),
            role: newer.role,
            created_at: self.created_at,
            updated_at: newer.updated_at,
        }
    }
}
