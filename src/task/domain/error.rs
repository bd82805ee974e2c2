//! Error types for task domain validation and parsing.

use super::{TaskId, TaskReference, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title does not fit the storage column.
    #[error("task title is {actual} characters long, at most {max} allowed")]
    TitleTooLong {
        /// Largest accepted length in characters.
        max: usize,
        /// Length of the submitted title after trimming.
        actual: usize,
    },

    /// The transaction signature is not a base58 string of acceptable length.
    #[error("invalid transaction signature '{0}'")]
    InvalidTransactionSignature(String),

    /// Result content is empty after trimming.
    #[error("result content must not be empty")]
    EmptyResultContent,

    /// The requested lifecycle transition is not permitted.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStateTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// A write-once reference on the task already holds a value.
    #[error("task {task_id} already has a {reference} recorded")]
    ReferenceAlreadySet {
        /// Task being updated.
        task_id: TaskId,
        /// Which reference was already set.
        reference: TaskReference,
    },
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
