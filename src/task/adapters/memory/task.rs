//! In-memory repository for tasks and their results.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{LegacyStatusMapping, PersistedTaskData, Task, TaskId, TaskResult, TaskStatus},
    ports::{StatusRewrite, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Statuses are kept as raw strings, the way the database column holds
/// them, so rows written before the canonical status set existed can be
/// represented and normalized.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    results: Vec<TaskResult>,
}

#[derive(Debug, Clone)]
struct StoredTask {
    task: Task,
    status: String,
}

impl StoredTask {
    fn from_task(task: &Task) -> Self {
        Self {
            task: task.clone(),
            status: task.status().as_str().to_owned(),
        }
    }

    fn to_task(&self) -> TaskRepositoryResult<Task> {
        let status =
            TaskStatus::try_from(self.status.as_str()).map_err(TaskRepositoryError::persistence)?;
        let task = &self.task;
        Ok(Task::from_persisted(PersistedTaskData {
            id: task.id(),
            title: task.title().to_owned(),
            status,
            escrow_tx_id: task.escrow_tx_id().cloned(),
            lock_tx_id: task.lock_tx_id().cloned(),
            approve_tx_id: task.approve_tx_id().cloned(),
            accepted_bid_id: task.accepted_bid_id(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }))
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the raw status string stored for a task.
    ///
    /// Used to seed rows that predate the canonical status set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub fn overwrite_stored_status(&self, id: TaskId, raw: &str) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let stored = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        raw.clone_into(&mut stored.status);
        Ok(())
    }

    /// Returns the raw status strings currently stored, in no particular
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the state lock is
    /// poisoned.
    pub fn stored_statuses(&self) -> TaskRepositoryResult<Vec<String>> {
        let state = self.read_state()?;
        Ok(state
            .tasks
            .values()
            .map(|stored| stored.status.clone())
            .collect())
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), StoredTask::from_task(task));
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = StoredTask::from_task(task);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        state.tasks.get(&id).map(StoredTask::to_task).transpose()
    }

    async fn store_result(&self, result: &TaskResult) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&result.task_id()) {
            return Err(TaskRepositoryError::NotFound(result.task_id()));
        }
        state.results.push(result.clone());
        Ok(())
    }

    async fn record_submission(
        &self,
        task: &Task,
        result: &TaskResult,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = StoredTask::from_task(task);
        state.results.push(result.clone());
        Ok(())
    }

    async fn results_for_task(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskResult>> {
        let state = self.read_state()?;
        Ok(state
            .results
            .iter()
            .filter(|result| result.task_id() == id)
            .cloned()
            .collect())
    }

    async fn apply_reset(&self, task: &Task) -> TaskRepositoryResult<u64> {
        let mut state = self.write_state()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = StoredTask::from_task(task);

        let before = state.results.len();
        state.results.retain(|result| result.task_id() != task.id());
        let removed = before - state.results.len();
        u64::try_from(removed).map_err(TaskRepositoryError::persistence)
    }

    async fn normalize_statuses(
        &self,
        mapping: LegacyStatusMapping,
    ) -> TaskRepositoryResult<Vec<StatusRewrite>> {
        let mut state = self.write_state()?;
        let mut rewrites = Vec::with_capacity(mapping.legacy_entries().len());
        for &(legacy, canonical) in mapping.legacy_entries() {
            let mut affected: u64 = 0;
            for stored in state.tasks.values_mut().filter(|s| s.status == legacy) {
                canonical.as_str().clone_into(&mut stored.status);
                affected += 1;
            }
            rewrites.push(StatusRewrite {
                legacy,
                canonical,
                affected,
            });
        }
        Ok(rewrites)
    }
}
