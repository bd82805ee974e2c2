//! Repository port for tasks and their delivered results.

use crate::task::domain::{LegacyStatusMapping, Task, TaskId, TaskResult, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Number of rows moved from one legacy status string to its canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRewrite {
    /// Retired status string that was matched.
    pub legacy: &'static str,
    /// Canonical replacement written to matching rows.
    pub canonical: TaskStatus,
    /// Number of rows updated.
    pub affected: u64,
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, references,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Stores a result delivered for an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the owning task does
    /// not exist.
    async fn store_result(&self, result: &TaskResult) -> TaskRepositoryResult<()>;

    /// Persists a task that received a result and stores that result as a
    /// single unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist;
    /// nothing is written in that case, and no other failure leaves the
    /// result stored.
    async fn record_submission(&self, task: &Task, result: &TaskResult)
    -> TaskRepositoryResult<()>;

    /// Returns all results owned by the task, oldest first.
    async fn results_for_task(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskResult>>;

    /// Persists a reset task and deletes every result it owns as a single
    /// unit of work.
    ///
    /// Returns the number of deleted results.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist;
    /// nothing is written in that case.
    async fn apply_reset(&self, task: &Task) -> TaskRepositoryResult<u64>;

    /// Rewrites every stored legacy status to its canonical value.
    ///
    /// All entries of the mapping are applied atomically; the returned
    /// rewrites follow [`LegacyStatusMapping::legacy_entries`] order.
    async fn normalize_statuses(
        &self,
        mapping: LegacyStatusMapping,
    ) -> TaskRepositoryResult<Vec<StatusRewrite>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
