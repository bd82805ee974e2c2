//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use crate::database::PgPool;
pub use repository::PostgresTaskRepository;
