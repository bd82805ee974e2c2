//! `PostgreSQL` connection pooling.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// Pool shared by the task and waitlist adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Opens a connection pool against `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when no initial connection can be established.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}
