//! In-memory waitlist repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::waitlist::{
    domain::{EmailAddress, WaitlistEntry},
    ports::{WaitlistRepository, WaitlistRepositoryError, WaitlistRepositoryResult},
};

/// Thread-safe in-memory waitlist keyed by email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWaitlistRepository {
    entries: Arc<RwLock<HashMap<EmailAddress, WaitlistEntry>>>,
}

impl InMemoryWaitlistRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> WaitlistRepositoryError {
    WaitlistRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl WaitlistRepository for InMemoryWaitlistRepository {
    async fn upsert(&self, entry: &WaitlistEntry) -> WaitlistRepositoryResult<WaitlistEntry> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let stored = entries.get(entry.email()).map_or_else(
            || entry.clone(),
            |existing| existing.merged_with(entry),
        );
        entries.insert(entry.email().clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> WaitlistRepositoryResult<Option<WaitlistEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(email).cloned())
    }

    async fn count(&self) -> WaitlistRepositoryResult<u64> {
        let entries = self.entries.read().map_err(poisoned)?;
        u64::try_from(entries.len()).map_err(WaitlistRepositoryError::persistence)
    }
}
