//! One `dlcount` invocation.

use chrono::Local;
use dlcount_core::{AppConfig, RunSummary};

use crate::bootstrap::{CliConfig, bootstrap};
use crate::error::CliError;
use crate::parser::Cli;

/// Build the context from the environment, run one tally and print the
/// report to stdout.
pub async fn execute(cli: &Cli) -> Result<RunSummary, CliError> {
    let app = AppConfig::from_env()?;
    tracing::debug!(config = ?app, "Loaded configuration");

    let ctx = bootstrap(CliConfig::new(cli, app))?;
    let started_at = Local::now().naive_local();

    let summary = ctx.service.run(started_at, ctx.options).await?;

    println!("{}", summary.report);
    tracing::info!(
        devices = summary.devices,
        total_diff = summary.total_diff,
        snapshot_written = summary.snapshot_written,
        cumulative_written = summary.cumulative_written,
        notified = summary.notified,
        "Run complete"
    );

    Ok(summary)
}
