//! Status migration followed by task reset against the in-memory store.

use super::helpers::{TaskServices, services, task_in_review};
use ibwt::task::{domain::TaskStatus, ports::TaskRepository};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_rows_become_resettable_after_migration(
    services: TaskServices,
) -> Result<(), eyre::Report> {
    let stuck = task_in_review(&services, "Summarise audit logs").await?;
    let finished = services.lifecycle.create_task("Label images").await?;
    services
        .repository
        .overwrite_stored_status(stuck.id(), "pending_review")?;
    services
        .repository
        .overwrite_stored_status(finished.id(), "completed")?;

    eyre::ensure!(
        services.admin.reset_task(stuck.id()).await.is_err(),
        "legacy rows must not be readable before migration"
    );

    let report = services.admin.normalize_statuses().await?;
    eyre::ensure!(report.total_affected() == 2);

    let outcome = services.admin.reset_task(stuck.id()).await?;
    eyre::ensure!(outcome.task.status() == TaskStatus::Working);
    eyre::ensure!(outcome.removed_results == 1);

    let finished_now = services
        .repository
        .find_by_id(finished.id())
        .await?
        .ok_or_else(|| eyre::eyre!("finished task disappeared"))?;
    eyre::ensure!(finished_now.status() == TaskStatus::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_migration_run_changes_nothing(services: TaskServices) -> Result<(), eyre::Report> {
    let task = services.lifecycle.create_task("Translate docs").await?;
    services
        .repository
        .overwrite_stored_status(task.id(), "in_progress")?;

    let first = services.admin.normalize_statuses().await?;
    let second = services.admin.normalize_statuses().await?;

    eyre::ensure!(first.total_affected() == 1);
    eyre::ensure!(second.total_affected() == 0);
    eyre::ensure!(second.rewrites().len() == 3);
    let statuses = services.repository.stored_statuses()?;
    eyre::ensure!(statuses == vec!["working".to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_task_can_be_resubmitted(services: TaskServices) -> Result<(), eyre::Report> {
    let task = task_in_review(&services, "Scrape pricing pages").await?;

    services.admin.reset_task(task.id()).await?;
    let (reviewed, result) = services
        .lifecycle
        .submit_result(task.id(), "second attempt")
        .await?;

    eyre::ensure!(reviewed.status() == TaskStatus::Review);
    let results = services.repository.results_for_task(task.id()).await?;
    eyre::ensure!(results.len() == 1);
    eyre::ensure!(results.first().map(|stored| stored.id()) == Some(result.id()));
    Ok(())
}
