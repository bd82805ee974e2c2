//! Work product delivered against a task.

use super::{ResultId, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Work product an agent delivered for a task.
///
/// A result always belongs to exactly one task and is discarded when that
/// task is administratively reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    id: ResultId,
    task_id: TaskId,
    content: String,
    submitted_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedResultData {
    /// Persisted result identifier.
    pub id: ResultId,
    /// Owning task.
    pub task_id: TaskId,
    /// Delivered content.
    pub content: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

impl TaskResult {
    /// Creates a new result for `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyResultContent`] when `content` is
    /// blank.
    pub fn new(
        task_id: TaskId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let body = content.into();
        if body.trim().is_empty() {
            return Err(TaskDomainError::EmptyResultContent);
        }
        Ok(Self {
            id: ResultId::new(),
            task_id,
            content: body,
            submitted_at: clock.utc(),
        })
    }

    /// Reconstructs a result from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedResultData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            content: data.content,
            submitted_at: data.submitted_at,
        }
    }

    /// Returns the result identifier.
    #[must_use]
    pub const fn id(&self) -> ResultId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the delivered content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}
