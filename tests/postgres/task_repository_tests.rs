//! `PostgreSQL` tests for the task repository.

use super::helpers::{test_database, test_runtime};
use ibwt::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{BidId, Task, TaskId, TaskResult, TaskStatus, TransactionSignature},
    ports::{TaskRepository, TaskRepositoryError},
    services::{TaskAdminError, TaskAdminService},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use std::sync::Arc;
use uuid::Uuid;

const SIGNATURE: &str =
    "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW";

fn task_in(status_path: &[TaskStatus]) -> Task {
    let clock = DefaultClock;
    let mut task = Task::new("Benchmark embedding models", &clock).expect("valid title");
    for status in status_path {
        task.transition_to(*status, &clock)
            .expect("transition should be allowed");
    }
    task
}

fn result_for(task: &Task, content: &str) -> TaskResult {
    TaskResult::new(task.id(), content, &DefaultClock).expect("valid content")
}

#[rstest]
fn store_and_find_round_trips_references(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_round_trip");
    let repo = PostgresTaskRepository::new(db.pool());
    let rt = test_runtime();

    let mut task = task_in(&[]);
    let bid = BidId::from_uuid(Uuid::new_v4());
    task.record_escrow(
        TransactionSignature::new(SIGNATURE).expect("valid signature"),
        &DefaultClock,
    )
    .expect("escrow not yet recorded");
    task.accept_bid(bid, &DefaultClock)
        .expect("bid not yet accepted");
    rt.block_on(repo.store(&task)).expect("store should succeed");

    let found = rt
        .block_on(repo.find_by_id(task.id()))
        .expect("lookup should succeed")
        .expect("task should exist");

    assert_eq!(found.id(), task.id());
    assert_eq!(found.status(), TaskStatus::Open);
    assert_eq!(found.title(), task.title());
    assert_eq!(
        found.escrow_tx_id().map(TransactionSignature::as_str),
        Some(SIGNATURE)
    );
    assert_eq!(found.accepted_bid_id(), Some(bid));
    assert!(found.lock_tx_id().is_none());
    assert!(found.approve_tx_id().is_none());
}

#[rstest]
fn storing_a_task_twice_is_a_duplicate(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_duplicate");
    let repo = PostgresTaskRepository::new(db.pool());
    let rt = test_runtime();
    let task = task_in(&[]);

    rt.block_on(repo.store(&task)).expect("first store should succeed");
    let second = rt.block_on(repo.store(&task));

    assert!(matches!(second, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
}

#[rstest]
fn update_of_unknown_task_is_not_found(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_update_missing");
    let repo = PostgresTaskRepository::new(db.pool());
    let rt = test_runtime();
    let task = task_in(&[TaskStatus::Working]);

    let outcome = rt.block_on(repo.update(&task));

    assert!(matches!(outcome, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

#[rstest]
fn result_for_unknown_task_is_not_found(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_result_orphan");
    let repo = PostgresTaskRepository::new(db.pool());
    let rt = test_runtime();
    let task = task_in(&[]);

    let outcome = rt.block_on(repo.store_result(&result_for(&task, "orphaned")));

    assert!(matches!(outcome, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

#[rstest]
fn record_submission_writes_status_and_result(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_submission");
    let repo = PostgresTaskRepository::new(db.pool());
    let rt = test_runtime();
    let mut task = task_in(&[TaskStatus::Working]);
    rt.block_on(repo.store(&task)).expect("store should succeed");

    task.transition_to(TaskStatus::Review, &DefaultClock)
        .expect("working to review is allowed");
    let result = result_for(&task, "All endpoints documented.");
    rt.block_on(repo.record_submission(&task, &result))
        .expect("submission should succeed");

    let stored = rt
        .block_on(repo.find_by_id(task.id()))
        .expect("lookup should succeed")
        .expect("task should exist");
    let results = rt
        .block_on(repo.results_for_task(task.id()))
        .expect("results lookup should succeed");
    assert_eq!(stored.status(), TaskStatus::Review);
    assert_eq!(results.len(), 1);
    assert_eq!(results.first().map(TaskResult::id), Some(result.id()));
}

#[rstest]
fn failed_submission_rolls_back_status_change(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_submission_rollback");
    let repo = PostgresTaskRepository::new(db.pool());
    let rt = test_runtime();
    let mut task = task_in(&[TaskStatus::Working]);
    rt.block_on(repo.store(&task)).expect("store should succeed");
    db.execute(
        "ALTER TABLE task_results ADD CONSTRAINT reject_marker CHECK (content <> 'rejected')",
    );

    task.transition_to(TaskStatus::Review, &DefaultClock)
        .expect("working to review is allowed");
    let outcome = rt.block_on(repo.record_submission(&task, &result_for(&task, "rejected")));

    assert!(matches!(outcome, Err(TaskRepositoryError::Persistence(_))));
    assert_eq!(db.raw_statuses(), vec!["working".to_owned()]);
    let results = rt
        .block_on(repo.results_for_task(task.id()))
        .expect("results lookup should succeed");
    assert!(results.is_empty());
}

#[rstest]
fn reset_clears_only_the_target_tasks_results(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_reset");
    let repository = Arc::new(PostgresTaskRepository::new(db.pool()));
    let service = TaskAdminService::new(repository.clone(), Arc::new(DefaultClock));
    let rt = test_runtime();

    let target = task_in(&[TaskStatus::Working, TaskStatus::Review]);
    let bystander = task_in(&[TaskStatus::Working, TaskStatus::Review]);
    for task in [&target, &bystander] {
        rt.block_on(repository.store(task)).expect("store should succeed");
    }
    for content in ["draft one", "draft two"] {
        rt.block_on(repository.store_result(&result_for(&target, content)))
            .expect("store result should succeed");
    }
    rt.block_on(repository.store_result(&result_for(&bystander, "keep me")))
        .expect("store result should succeed");

    let outcome = rt
        .block_on(service.reset_task(target.id()))
        .expect("reset should succeed");

    assert_eq!(outcome.removed_results, 2);
    let stored = rt
        .block_on(repository.find_by_id(target.id()))
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::Working);
    let target_results = rt
        .block_on(repository.results_for_task(target.id()))
        .expect("results lookup should succeed");
    let bystander_results = rt
        .block_on(repository.results_for_task(bystander.id()))
        .expect("results lookup should succeed");
    assert!(target_results.is_empty());
    assert_eq!(bystander_results.len(), 1);
}

#[rstest]
fn reset_of_unknown_task_is_not_found(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_reset_missing");
    let repository = Arc::new(PostgresTaskRepository::new(db.pool()));
    let service = TaskAdminService::new(repository.clone(), Arc::new(DefaultClock));
    let rt = test_runtime();
    let missing = TaskId::new();

    let outcome = rt.block_on(service.reset_task(missing));
    let direct = rt.block_on(repository.apply_reset(&task_in(&[])));

    assert!(matches!(outcome, Err(TaskAdminError::NotFound(id)) if id == missing));
    assert!(matches!(direct, Err(TaskRepositoryError::NotFound(_))));
}

#[rstest]
fn normalize_rewrites_legacy_rows_once(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_normalize");
    let repository = Arc::new(PostgresTaskRepository::new(db.pool()));
    let service = TaskAdminService::new(repository.clone(), Arc::new(DefaultClock));
    let rt = test_runtime();

    for raw in ["in_progress", "in_progress", "pending_review", "completed", "In_Progress"] {
        let task = task_in(&[]);
        rt.block_on(repository.store(&task)).expect("store should succeed");
        db.set_raw_status(task.id().into_inner(), raw);
    }

    let first = rt
        .block_on(service.normalize_statuses())
        .expect("normalization should succeed");
    let second = rt
        .block_on(service.normalize_statuses())
        .expect("normalization should succeed");

    let counts: Vec<(&str, TaskStatus, u64)> = first
        .rewrites()
        .iter()
        .map(|rewrite| (rewrite.legacy, rewrite.canonical, rewrite.affected))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("in_progress", TaskStatus::Working, 2),
            ("pending_review", TaskStatus::Review, 1),
            ("completed", TaskStatus::Done, 1),
        ]
    );
    assert_eq!(second.total_affected(), 0);
    assert_eq!(
        db.raw_statuses(),
        vec!["In_Progress", "done", "review", "working", "working"]
    );
}

#[rstest]
fn normalize_applies_nothing_when_any_rewrite_fails(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "task_normalize_rollback");
    let repository = Arc::new(PostgresTaskRepository::new(db.pool()));
    let service = TaskAdminService::new(repository.clone(), Arc::new(DefaultClock));
    let rt = test_runtime();

    for raw in ["in_progress", "completed"] {
        let task = task_in(&[]);
        rt.block_on(repository.store(&task)).expect("store should succeed");
        db.set_raw_status(task.id().into_inner(), raw);
    }
    db.execute("ALTER TABLE tasks ADD CONSTRAINT reject_done CHECK (status <> 'done')");

    let outcome = rt.block_on(service.normalize_statuses());

    assert!(matches!(
        outcome,
        Err(TaskAdminError::Repository(TaskRepositoryError::Persistence(_)))
    ));
    assert_eq!(db.raw_statuses(), vec!["completed", "in_progress"]);
}
