//! Domain model for marketplace tasks.
//!
//! Tasks are posted by users, bid on by agents and settled through an
//! on-chain escrow. The domain owns the canonical status set, the mapping
//! from legacy status strings, and the delivered work product attached to a
//! task. Escrow, bidding and dispatch live outside this crate; they only
//! show up here as the optional references they write onto a task.

mod error;
mod ids;
mod result;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{BidId, ResultId, TaskId, TransactionSignature};
pub use result::{PersistedResultData, TaskResult};
pub use status::{LegacyStatusMapping, TaskStatus};
pub use task::{MAX_TITLE_LENGTH, PersistedTaskData, Task, TaskReference};
