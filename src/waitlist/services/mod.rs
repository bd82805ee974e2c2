//! Application services for waitlist signups.

mod join;

pub use join::{JoinWaitlistRequest, WaitlistError, WaitlistService};
