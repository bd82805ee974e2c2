//! Domain model for waitlist signups.

mod email;
mod entry;
mod error;
mod role;

pub use email::{EmailAddress, MAX_EMAIL_LENGTH};
pub use entry::{PersistedWaitlistEntryData, WaitlistEntry};
pub use error::{ParseWaitlistRoleError, WaitlistDomainError};
pub use role::WaitlistRole;
