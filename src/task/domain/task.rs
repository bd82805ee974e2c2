//! Task aggregate root.

use super::{BidId, TaskDomainError, TaskId, TaskStatus, TransactionSignature};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted task title, in characters; matches the storage column.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Write-once references populated by the escrow and bidding collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskReference {
    /// Transaction that funded the escrow account.
    EscrowTransaction,
    /// Bid chosen by the poster.
    AcceptedBid,
    /// Transaction that locked escrow to the winning agent.
    LockTransaction,
    /// Transaction that released escrow after approval.
    ApproveTransaction,
}

impl TaskReference {
    /// Returns a human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EscrowTransaction => "escrow transaction",
            Self::AcceptedBid => "accepted bid",
            Self::LockTransaction => "lock transaction",
            Self::ApproveTransaction => "approve transaction",
        }
    }
}

impl fmt::Display for TaskReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    escrow_tx_id: Option<TransactionSignature>,
    lock_tx_id: Option<TransactionSignature>,
    approve_tx_id: Option<TransactionSignature>,
    accepted_bid_id: Option<BidId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Escrow funding transaction, if recorded.
    pub escrow_tx_id: Option<TransactionSignature>,
    /// Escrow lock transaction, if recorded.
    pub lock_tx_id: Option<TransactionSignature>,
    /// Escrow release transaction, if recorded.
    pub approve_tx_id: Option<TransactionSignature>,
    /// Accepted bid, if any.
    pub accepted_bid_id: Option<BidId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Open`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank and
    /// [`TaskDomainError::TitleTooLong`] when it exceeds
    /// [`MAX_TITLE_LENGTH`] characters after trimming.
    pub fn new(title: impl Into<String>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let length = trimmed.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: length,
            });
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: trimmed.to_owned(),
            status: TaskStatus::Open,
            escrow_tx_id: None,
            lock_tx_id: None,
            approve_tx_id: None,
            accepted_bid_id: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            status: data.status,
            escrow_tx_id: data.escrow_tx_id,
            lock_tx_id: data.lock_tx_id,
            approve_tx_id: data.approve_tx_id,
            accepted_bid_id: data.accepted_bid_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the escrow funding transaction, if recorded.
    #[must_use]
    pub const fn escrow_tx_id(&self) -> Option<&TransactionSignature> {
        self.escrow_tx_id.as_ref()
    }

    /// Returns the escrow lock transaction, if recorded.
    #[must_use]
    pub const fn lock_tx_id(&self) -> Option<&TransactionSignature> {
        self.lock_tx_id.as_ref()
    }

    /// Returns the escrow release transaction, if recorded.
    #[must_use]
    pub const fn approve_tx_id(&self) -> Option<&TransactionSignature> {
        self.approve_tx_id.as_ref()
    }

    /// Returns the accepted bid, if any.
    #[must_use]
    pub const fn accepted_bid_id(&self) -> Option<BidId> {
        self.accepted_bid_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `target` when the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when
    /// [`TaskStatus::can_transition_to`] rejects the move.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Puts the task back to [`TaskStatus::Working`] regardless of its
    /// current status.
    ///
    /// This is an operator override for stuck tasks and skips the lifecycle
    /// guard. Discarding delivered results is the caller's responsibility.
    pub fn force_reset(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Working;
        self.touch(clock);
    }

    /// Records the escrow funding transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReferenceAlreadySet`] if one is already
    /// recorded.
    pub fn record_escrow(
        &mut self,
        signature: TransactionSignature,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        set_once(
            &mut self.escrow_tx_id,
            signature,
            self.id,
            TaskReference::EscrowTransaction,
        )?;
        self.touch(clock);
        Ok(())
    }

    /// Records the bid the poster accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReferenceAlreadySet`] if a bid was already
    /// accepted.
    pub fn accept_bid(&mut self, bid_id: BidId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        set_once(
            &mut self.accepted_bid_id,
            bid_id,
            self.id,
            TaskReference::AcceptedBid,
        )?;
        self.touch(clock);
        Ok(())
    }

    /// Records the transaction that locked escrow to the winning agent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReferenceAlreadySet`] if one is already
    /// recorded.
    pub fn record_lock(
        &mut self,
        signature: TransactionSignature,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        set_once(
            &mut self.lock_tx_id,
            signature,
            self.id,
            TaskReference::LockTransaction,
        )?;
        self.touch(clock);
        Ok(())
    }

    /// Records the transaction that released escrow after approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReferenceAlreadySet`] if one is already
    /// recorded.
    pub fn record_approval(
        &mut self,
        signature: TransactionSignature,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        set_once(
            &mut self.approve_tx_id,
            signature,
            self.id,
            TaskReference::ApproveTransaction,
        )?;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn set_once<T>(
    field: &mut Option<T>,
    value: T,
    task_id: TaskId,
    reference: TaskReference,
) -> Result<(), TaskDomainError> {
    if field.is_some() {
        return Err(TaskDomainError::ReferenceAlreadySet { task_id, reference });
    }
    *field = Some(value);
    Ok(())
}
