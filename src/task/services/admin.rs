//! Operator-facing maintenance operations on stored tasks.

use crate::task::{
    domain::{LegacyStatusMapping, Task, TaskId},
    ports::{StatusRewrite, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors returned by administrative task operations.
#[derive(Debug, Error)]
pub enum TaskAdminError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Outcome of a successful task reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResetOutcome {
    /// The task after reset, now in `working`.
    pub task: Task,
    /// Number of results that were deleted.
    pub removed_results: u64,
}

/// Per-mapping counts produced by a status normalization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNormalizationReport {
    rewrites: Vec<StatusRewrite>,
}

impl StatusNormalizationReport {
    /// Returns one entry per legacy mapping, including zero counts.
    #[must_use]
    pub fn rewrites(&self) -> &[StatusRewrite] {
        &self.rewrites
    }

    /// Returns the total number of rewritten rows.
    #[must_use]
    pub fn total_affected(&self) -> u64 {
        self.rewrites.iter().map(|rewrite| rewrite.affected).sum()
    }
}

/// Maintenance service for stuck tasks and retired status values.
#[derive(Clone)]
pub struct TaskAdminService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    mapping: LegacyStatusMapping,
}

impl<R, C> TaskAdminService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new administrative service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            mapping: LegacyStatusMapping,
        }
    }

    /// Forces a task back to `working` and deletes every result it owns.
    ///
    /// The override ignores the lifecycle guard, cannot be undone and leaves
    /// no audit record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAdminError::NotFound`] when the task does not exist, in
    /// which case nothing is written, or [`TaskAdminError::Repository`] when
    /// persistence fails.
    pub async fn reset_task(&self, id: TaskId) -> Result<TaskResetOutcome, TaskAdminError> {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            warn!(task_id = %id, "reset requested for unknown task");
            return Err(TaskAdminError::NotFound(id));
        };

        let previous = task.status();
        task.force_reset(&*self.clock);
        let removed_results = self.repository.apply_reset(&task).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskAdminError::NotFound(missing),
            other => TaskAdminError::Repository(other),
        })?;

        info!(
            task_id = %id,
            %previous,
            removed_results,
            "task reset to working"
        );
        Ok(TaskResetOutcome {
            task,
            removed_results,
        })
    }

    /// Rewrites every legacy status value to its canonical replacement.
    ///
    /// Zero matches are reported, not treated as errors. The whole mapping
    /// is applied in one unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAdminError::Repository`] when persistence fails; no
    /// mapping is applied in that case.
    pub async fn normalize_statuses(&self) -> Result<StatusNormalizationReport, TaskAdminError> {
        let rewrites = self.repository.normalize_statuses(self.mapping).await?;
        for rewrite in &rewrites {
            info!(
                from = rewrite.legacy,
                to = %rewrite.canonical,
                affected = rewrite.affected,
                "normalized task status"
            );
        }
        Ok(StatusNormalizationReport { rewrites })
    }
}
