//! Port contracts for waitlist persistence.

pub mod repository;

pub use repository::{WaitlistRepository, WaitlistRepositoryError, WaitlistRepositoryResult};
