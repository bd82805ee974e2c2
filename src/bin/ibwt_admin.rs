//! Maintenance commands for operators.
//!
//! Usage:
//!
//! ```text
//! ibwt-admin migrate-statuses
//! ibwt-admin reset-task <TASK_ID>
//! ```
//!
//! `migrate-statuses` rewrites retired task statuses to the canonical set in
//! one transaction and logs the count per mapping. `reset-task` forces a
//! stuck task back to `working` and deletes its delivered results; it exits
//! non-zero when the task does not exist.

use clap::{Parser, Subcommand};
use ibwt::config::AppConfig;
use ibwt::database;
use ibwt::task::{
    adapters::postgres::PostgresTaskRepository, domain::TaskId, services::TaskAdminService,
};
use ibwt::telemetry::init_tracing;
use mockable::DefaultClock;
use std::sync::Arc;
use tracing::{error, info};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "ibwt-admin")]
#[command(about = "IBWT database maintenance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite legacy task statuses to their canonical values
    MigrateStatuses,
    /// Force a task back to `working` and delete its results
    ResetTask {
        /// Identifier of the task to reset
        task_id: TaskId,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    init_tracing(&config.log)?;

    let pool = database::connect(&config.database_url, config.pool_size)?;
    let service = TaskAdminService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    );

    match cli.command {
        Command::MigrateStatuses => {
            let report = service.normalize_statuses().await.inspect_err(|err| {
                error!(error = %err, "status migration failed");
            })?;
            info!(total = report.total_affected(), "status migration complete");
        }
        Command::ResetTask { task_id } => {
            let outcome = service.reset_task(task_id).await.inspect_err(|err| {
                error!(%task_id, error = %err, "task reset failed");
            })?;
            info!(
                %task_id,
                status = %outcome.task.status(),
                removed_results = outcome.removed_results,
                "task reset complete"
            );
        }
    }
    Ok(())
}
