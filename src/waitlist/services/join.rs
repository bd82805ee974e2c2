//! Service layer for joining the waitlist.

use crate::waitlist::{
    domain::{EmailAddress, WaitlistDomainError, WaitlistEntry, WaitlistRole},
    ports::{WaitlistRepository, WaitlistRepositoryError},
};
use mockable::Clock;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Signup payload as submitted by a visitor.
///
/// Both fields are optional on the wire; validation happens in
/// [`WaitlistService::join`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JoinWaitlistRequest {
    /// Submitted email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Submitted role; unrecognized values fall back to `user`.
    ///
    /// A role that is not a JSON string is read as absent rather than
    /// failing the whole body.
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<String>,
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(role)) => Some(role),
        _ => None,
    })
}

impl JoinWaitlistRequest {
    /// Creates a request for `email` without a role.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            role: None,
        }
    }

    /// Sets the submitted role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Service-level errors for waitlist signups.
#[derive(Debug, Error)]
pub enum WaitlistError {
    /// The submission was rejected before anything was written.
    #[error(transparent)]
    Validation(#[from] WaitlistDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WaitlistRepositoryError),
}

/// Waitlist signup service.
#[derive(Clone)]
pub struct WaitlistService<R, C>
where
    R: WaitlistRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> WaitlistService<R, C>
where
    R: WaitlistRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new waitlist service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Adds the submitter to the waitlist, or updates their role when the
    /// email is already present.
    ///
    /// # Errors
    ///
    /// Returns [`WaitlistError::Validation`] when the email is missing or
    /// malformed, and [`WaitlistError::Repository`] when the upsert fails.
    pub async fn join(&self, request: JoinWaitlistRequest) -> Result<WaitlistEntry, WaitlistError> {
        let email = EmailAddress::new(request.email.unwrap_or_default())?;
        let role = WaitlistRole::coerce(request.role.as_deref());
        if request.role.as_deref().is_some_and(|raw| raw != role.as_str()) {
            debug!(submitted = request.role.as_deref(), "unrecognized waitlist role, using default");
        }

        let entry = WaitlistEntry::new(email, role, &*self.clock);
        let stored = self.repository.upsert(&entry).await?;
        info!(role = %stored.role(), "waitlist signup recorded");
        Ok(stored)
    }
}
