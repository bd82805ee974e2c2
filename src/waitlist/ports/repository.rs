//! Repository port for waitlist entries.

use crate::waitlist::domain::{EmailAddress, WaitlistEntry};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for waitlist repository operations.
pub type WaitlistRepositoryResult<T> = Result<T, WaitlistRepositoryError>;

/// Waitlist persistence contract.
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Inserts the entry, or overwrites the role and latest signup time of
    /// the entry already stored under the same email.
    ///
    /// Returns the entry as stored after the write.
    async fn upsert(&self, entry: &WaitlistEntry) -> WaitlistRepositoryResult<WaitlistEntry>;

    /// Finds the entry stored under `email`.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> WaitlistRepositoryResult<Option<WaitlistEntry>>;

    /// Returns the number of stored entries.
    async fn count(&self) -> WaitlistRepositoryResult<u64>;
}

/// Errors returned by waitlist repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WaitlistRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WaitlistRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
