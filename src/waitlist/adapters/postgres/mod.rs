//! `PostgreSQL` adapters for waitlist persistence.

mod models;
mod repository;
mod schema;

pub use crate::database::PgPool;
pub use repository::PostgresWaitlistRepository;
