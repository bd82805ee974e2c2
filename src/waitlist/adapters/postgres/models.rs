//! Diesel row models for waitlist persistence.

use super::schema::waitlist_entries;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape shared by inserts and `RETURNING` reads.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = waitlist_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WaitlistRow {
    /// Signup email address.
    pub email: String,
    /// Declared marketplace role.
    pub role: String,
    /// First signup timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest signup timestamp.
    pub updated_at: DateTime<Utc>,
}
