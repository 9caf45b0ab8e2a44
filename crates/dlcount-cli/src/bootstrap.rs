//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together:
//! - Device catalog and release host clients (via dlcount-hosts)
//! - Ledger files (via dlcount-core's JSON store)
//! - Report notifier (via dlcount-telegram)

use std::path::PathBuf;
use std::sync::Arc;

use dlcount_core::{AppConfig, JsonLedgerStore, NotifierPort, RunOptions, TallyDeps, TallyService};
use dlcount_hosts::{
    CatalogClientConfig, DefaultCatalogClient, DefaultReleaseHostClient, HostClientConfig,
};
use dlcount_telegram::{TelegramConfig, TelegramNotifier};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding both ledger files.
    pub data_dir: PathBuf,
    pub dry_run: bool,
    pub app: AppConfig,
}

impl CliConfig {
    /// Combine parsed arguments with the environment configuration.
    pub fn new(cli: &Cli, app: AppConfig) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            dry_run: cli.dry_run,
            app,
        }
    }
}

/// Fully composed context for one run.
pub struct CliContext {
    pub service: TallyService,
    pub options: RunOptions,
    /// Whether a notifier was wired in.
    pub notifications: bool,
}

/// Wire all adapters into a tally service.
///
/// No network traffic happens here.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    if !config.data_dir.is_dir() {
        return Err(CliError::Io(format!(
            "Data directory {} does not exist",
            config.data_dir.display()
        )));
    }

    let app = &config.app;

    let catalog = DefaultCatalogClient::new(&CatalogClientConfig::new(&app.devices_url))
        .map_err(|e| CliError::Config(e.to_string()))?;

    let primary = DefaultReleaseHostClient::new(
        &HostClientConfig::github()
            .with_optional_token(app.github_token.clone())
            .with_timeout(app.host_timeout),
    )
    .map_err(|e| CliError::Config(e.to_string()))?;

    let secondary =
        DefaultReleaseHostClient::new(&HostClientConfig::gitea().with_timeout(app.host_timeout))
            .map_err(|e| CliError::Config(e.to_string()))?;

    let notifier: Option<Arc<dyn NotifierPort>> = match &app.telegram {
        Some(target) => {
            let notifier: Arc<dyn NotifierPort> = Arc::new(
                TelegramNotifier::new(&TelegramConfig::from(target))
                    .map_err(|e| CliError::Config(e.to_string()))?,
            );
            Some(notifier)
        }
        None => {
            tracing::info!("Telegram credentials not set, notifications disabled");
            None
        }
    };
    let notifications = notifier.is_some();

    let deps = TallyDeps {
        catalog: Arc::new(catalog),
        primary: Arc::new(primary),
        secondary: Arc::new(secondary),
        store: Arc::new(JsonLedgerStore::new(config.data_dir.clone())),
        notifier,
    };

    Ok(CliContext {
        service: TallyService::new(deps, app.asset_filter.clone()),
        options: RunOptions {
            dry_run: config.dry_run,
        },
        notifications,
    })
}
