//! Application services for task lifecycle and administration.

mod admin;
mod lifecycle;

pub use admin::{StatusNormalizationReport, TaskAdminError, TaskAdminService, TaskResetOutcome};
pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
