//! `PostgreSQL` repository implementation for tasks and results.

use super::{
    models::{NewTaskResultRow, NewTaskRow, TaskChangeset, TaskResultRow, TaskRow},
    schema::{task_results, tasks},
};
use crate::database::PgPool;
use crate::task::{
    domain::{
        BidId, LegacyStatusMapping, PersistedResultData, PersistedTaskData, ResultId, Task,
        TaskId, TaskResult, TaskStatus, TransactionSignature,
    },
    ports::{StatusRewrite, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| update_task_row(connection, task_id, &changeset))
            .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn store_result(&self, result: &TaskResult) -> TaskRepositoryResult<()> {
        let task_id = result.task_id();
        let new_row = to_new_result_row(result);

        self.run_blocking(move |connection| {
            diesel::insert_into(task_results::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn record_submission(
        &self,
        task: &Task,
        result: &TaskResult,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);
        let new_result = to_new_result_row(result);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                update_task_row(tx, task_id, &changeset)?;
                diesel::insert_into(task_results::table)
                    .values(&new_result)
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn results_for_task(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskResult>> {
        self.run_blocking(move |connection| {
            let rows = task_results::table
                .filter(task_results::task_id.eq(id.into_inner()))
                .order(task_results::submitted_at.asc())
                .select(TaskResultRow::as_select())
                .load::<TaskResultRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_result).collect())
        })
        .await
    }

    async fn apply_reset(&self, task: &Task) -> TaskRepositoryResult<u64> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let removed = connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                update_task_row(tx, task_id, &changeset)?;
                let deleted = diesel::delete(
                    task_results::table.filter(task_results::task_id.eq(task_id.into_inner())),
                )
                .execute(tx)?;
                Ok(deleted)
            })?;
            u64::try_from(removed).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn normalize_statuses(
        &self,
        mapping: LegacyStatusMapping,
    ) -> TaskRepositoryResult<Vec<StatusRewrite>> {
        self.run_blocking(move |connection| {
            let counts = connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let mut counts = Vec::with_capacity(mapping.legacy_entries().len());
                for &(legacy, canonical) in mapping.legacy_entries() {
                    let updated = diesel::update(tasks::table.filter(tasks::status.eq(legacy)))
                        .set(tasks::status.eq(canonical.as_str()))
                        .execute(tx)?;
                    counts.push((legacy, canonical, updated));
                }
                Ok(counts)
            })?;

            counts
                .into_iter()
                .map(|(legacy, canonical, updated)| {
                    let affected =
                        u64::try_from(updated).map_err(TaskRepositoryError::persistence)?;
                    Ok(StatusRewrite {
                        legacy,
                        canonical,
                        affected,
                    })
                })
                .collect()
        })
        .await
    }
}

fn update_task_row(
    connection: &mut PgConnection,
    task_id: TaskId,
    changeset: &TaskChangeset,
) -> TaskRepositoryResult<()> {
    let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
        .set(changeset)
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    if updated == 0 {
        return Err(TaskRepositoryError::NotFound(task_id));
    }
    Ok(())
}

fn to_new_result_row(result: &TaskResult) -> NewTaskResultRow {
    NewTaskResultRow {
        id: result.id().into_inner(),
        task_id: result.task_id().into_inner(),
        content: result.content().to_owned(),
        submitted_at: result.submitted_at(),
    }
}

fn signature_column(signature: Option<&TransactionSignature>) -> Option<String> {
    signature.map(|value| value.as_str().to_owned())
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        status: task.status().as_str().to_owned(),
        escrow_tx_id: signature_column(task.escrow_tx_id()),
        lock_tx_id: signature_column(task.lock_tx_id()),
        approve_tx_id: signature_column(task.approve_tx_id()),
        accepted_bid_id: task.accepted_bid_id().map(BidId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        status: task.status().as_str().to_owned(),
        escrow_tx_id: signature_column(task.escrow_tx_id()),
        lock_tx_id: signature_column(task.lock_tx_id()),
        approve_tx_id: signature_column(task.approve_tx_id()),
        accepted_bid_id: task.accepted_bid_id().map(BidId::into_inner),
        updated_at: task.updated_at(),
    }
}

fn parse_signature(value: Option<String>) -> TaskRepositoryResult<Option<TransactionSignature>> {
    value
        .map(TransactionSignature::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        status: persisted_status,
        escrow_tx_id,
        lock_tx_id,
        approve_tx_id,
        accepted_bid_id,
        created_at,
        updated_at,
    } = row;

    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        status,
        escrow_tx_id: parse_signature(escrow_tx_id)?,
        lock_tx_id: parse_signature(lock_tx_id)?,
        approve_tx_id: parse_signature(approve_tx_id)?,
        accepted_bid_id: accepted_bid_id.map(BidId::from_uuid),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn row_to_result(row: TaskResultRow) -> TaskResult {
    TaskResult::from_persisted(PersistedResultData {
        id: ResultId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        content: row.content,
        submitted_at: row.submitted_at,
    })
}
