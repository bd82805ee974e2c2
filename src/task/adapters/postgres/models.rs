//! Diesel row models for task persistence.

use super::schema::{task_results, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Lifecycle status as stored.
    pub status: String,
    /// Escrow funding transaction signature.
    pub escrow_tx_id: Option<String>,
    /// Escrow lock transaction signature.
    pub lock_tx_id: Option<String>,
    /// Escrow release transaction signature.
    pub approve_tx_id: Option<String>,
    /// Accepted bid identifier.
    pub accepted_bid_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Lifecycle status.
    pub status: String,
    /// Escrow funding transaction signature.
    pub escrow_tx_id: Option<String>,
    /// Escrow lock transaction signature.
    pub lock_tx_id: Option<String>,
    /// Escrow release transaction signature.
    pub approve_tx_id: Option<String>,
    /// Accepted bid identifier.
    pub accepted_bid_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset written when an existing task is updated.
///
/// `None` clears the column rather than leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Lifecycle status.
    pub status: String,
    /// Escrow funding transaction signature.
    pub escrow_tx_id: Option<String>,
    /// Escrow lock transaction signature.
    pub lock_tx_id: Option<String>,
    /// Escrow release transaction signature.
    pub approve_tx_id: Option<String>,
    /// Accepted bid identifier.
    pub accepted_bid_id: Option<uuid::Uuid>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task results.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_results)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskResultRow {
    /// Result identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Delivered content.
    pub content: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

/// Insert model for task results.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_results)]
pub struct NewTaskResultRow {
    /// Result identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Delivered content.
    pub content: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}
