//! Escrow and bid references written by external collaborators.

use super::helpers::{TaskServices, services, task_in_review};
use ibwt::task::{
    domain::{BidId, TaskDomainError, TransactionSignature},
    ports::TaskRepository,
};
use mockable::DefaultClock;
use rstest::rstest;
use uuid::Uuid;

const ESCROW_SIGNATURE: &str =
    "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn references_survive_reset(services: TaskServices) -> Result<(), eyre::Report> {
    let mut task = task_in_review(&services, "Audit smart contract").await?;
    let bid = BidId::from_uuid(Uuid::new_v4());
    task.record_escrow(TransactionSignature::new(ESCROW_SIGNATURE)?, &DefaultClock)?;
    task.accept_bid(bid, &DefaultClock)?;
    services.repository.update(&task).await?;

    let outcome = services.admin.reset_task(task.id()).await?;

    eyre::ensure!(outcome.task.accepted_bid_id() == Some(bid));
    let stored = services
        .repository
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task missing after reset"))?;
    eyre::ensure!(stored.escrow_tx_id().map(TransactionSignature::as_str) == Some(ESCROW_SIGNATURE));
    eyre::ensure!(stored.accepted_bid_id() == Some(bid));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_bid_cannot_be_replaced(services: TaskServices) -> Result<(), eyre::Report> {
    let mut task = services.lifecycle.create_task("Rank search results").await?;
    task.accept_bid(BidId::from_uuid(Uuid::new_v4()), &DefaultClock)?;
    services.repository.update(&task).await?;

    let mut reloaded = services
        .repository
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    let second = reloaded.accept_bid(BidId::from_uuid(Uuid::new_v4()), &DefaultClock);

    eyre::ensure!(matches!(
        second,
        Err(TaskDomainError::ReferenceAlreadySet { .. })
    ));
    Ok(())
}
