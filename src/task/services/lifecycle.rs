//! Service layer for creating tasks and moving them through their lifecycle.

use crate::task::{
    domain::{ParseTaskStatusError, Task, TaskDomainError, TaskId, TaskResult, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status string is not canonical.
    #[error(transparent)]
    InvalidState(#[from] ParseTaskStatusError),
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores a new task in the `open` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is blank or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(&self, title: impl Into<String>) -> TaskLifecycleResult<Task> {
        let task = Task::new(title, &*self.clock)?;
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Moves a task to the status named by `target`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidState`] for a non-canonical status
    /// string, [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// [`TaskLifecycleError::Domain`] when the lifecycle forbids the move.
    pub async fn transition_task(&self, id: TaskId, target: &str) -> TaskLifecycleResult<Task> {
        let target_status = TaskStatus::try_from(target)?;
        let mut task = self.load(id).await?;
        let from = task.status();
        task.transition_to(target_status, &*self.clock)?;
        self.repository.update(&task).await?;
        debug!(task_id = %id, %from, to = %target_status, "task transitioned");
        Ok(task)
    }

    /// Records delivered work for a task that is being worked on and moves
    /// it to `review`.
    ///
    /// The result and the status change are written together, so a stored
    /// result always belongs to a task that left `working`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task and
    /// [`TaskLifecycleError::Domain`] when the content is blank or the task
    /// is not in `working`.
    pub async fn submit_result(
        &self,
        id: TaskId,
        content: impl Into<String>,
    ) -> TaskLifecycleResult<(Task, TaskResult)> {
        let mut task = self.load(id).await?;
        let result = TaskResult::new(id, content, &*self.clock)?;
        task.transition_to(TaskStatus::Review, &*self.clock)?;
        self.repository.record_submission(&task, &result).await?;
        info!(task_id = %id, result_id = %result.id().into_inner(), "result submitted");
        Ok((task, result))
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }
}
