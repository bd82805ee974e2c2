//! `PostgreSQL` repository implementation for waitlist entries.

use super::{models::WaitlistRow, schema::waitlist_entries};
use crate::database::PgPool;
use crate::waitlist::{
    domain::{EmailAddress, PersistedWaitlistEntryData, WaitlistEntry, WaitlistRole},
    ports::{WaitlistRepository, WaitlistRepositoryError, WaitlistRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;

/// `PostgreSQL`-backed waitlist repository.
#[derive(Debug, Clone)]
pub struct PostgresWaitlistRepository {
    pool: PgPool,
}

impl PostgresWaitlistRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WaitlistRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WaitlistRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WaitlistRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WaitlistRepositoryError::persistence)?
    }
}

#[async_trait]
impl WaitlistRepository for PostgresWaitlistRepository {
    async fn upsert(&self, entry: &WaitlistEntry) -> WaitlistRepositoryResult<WaitlistEntry> {
        let new_row = WaitlistRow {
            email: entry.email().as_str().to_owned(),
            role: entry.role().as_str().to_owned(),
            created_at: entry.created_at(),
            updated_at: entry.updated_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(waitlist_entries::table)
                .values(&new_row)
                .on_conflict(waitlist_entries::email)
                .do_update()
                .set((
                    waitlist_entries::role.eq(excluded(waitlist_entries::role)),
                    waitlist_entries::updated_at.eq(excluded(waitlist_entries::updated_at)),
                ))
                .returning(WaitlistRow::as_returning())
                .get_result::<WaitlistRow>(connection)
                .map_err(WaitlistRepositoryError::persistence)?;
            row_to_entry(row)
        })
        .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> WaitlistRepositoryResult<Option<WaitlistEntry>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = waitlist_entries::table
                .filter(waitlist_entries::email.eq(lookup))
                .select(WaitlistRow::as_select())
                .first::<WaitlistRow>(connection)
                .optional()
                .map_err(WaitlistRepositoryError::persistence)?;
            row.map(row_to_entry).transpose()
        })
        .await
    }

    async fn count(&self) -> WaitlistRepositoryResult<u64> {
        self.run_blocking(|connection| {
            let total: i64 = waitlist_entries::table
                .count()
                .get_result(connection)
                .map_err(WaitlistRepositoryError::persistence)?;
            u64::try_from(total).map_err(WaitlistRepositoryError::persistence)
        })
        .await
    }
}

fn row_to_entry(row: WaitlistRow) -> WaitlistRepositoryResult<WaitlistEntry> {
    let email = EmailAddress::new(row.email).map_err(WaitlistRepositoryError::persistence)?;
    let role =
        WaitlistRole::try_from(row.role.as_str()).map_err(WaitlistRepositoryError::persistence)?;
    Ok(WaitlistEntry::from_persisted(PersistedWaitlistEntryData {
        email,
        role,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
