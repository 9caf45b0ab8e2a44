//! Tally service - orchestrates one accounting run.
//!
//! Loads both ledgers, walks the device catalog one device at a time,
//! feeds both release listings into the [`Tally`] engine, persists the
//! results and sends the report.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{AssetFilter, Device};
use crate::ledger::LedgerKind;
use crate::ports::{CoreError, DeviceCatalogPort, LedgerStore, NotifierPort, ReleaseHostPort};
use crate::report::Report;
use crate::tally::{HostListing, Tally, TallyOutcome};

/// Collaborators of the tally service.
#[derive(Clone)]
pub struct TallyDeps {
    pub catalog: Arc<dyn DeviceCatalogPort>,
    /// Host whose rate limiting aborts the run.
    pub primary: Arc<dyn ReleaseHostPort>,
    pub secondary: Arc<dyn ReleaseHostPort>,
    pub store: Arc<dyn LedgerStore>,
    /// `None` disables notifications.
    pub notifier: Option<Arc<dyn NotifierPort>>,
}

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Compute everything but write no files and send nothing.
    pub dry_run: bool,
}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub devices: usize,
    pub total_diff: i64,
    pub snapshot_written: bool,
    pub cumulative_written: bool,
    pub notified: bool,
    pub report: Report,
}

/// Service running the download accounting.
pub struct TallyService {
    deps: TallyDeps,
    filter: AssetFilter,
}

impl TallyService {
    /// Create a new tally service.
    pub const fn new(deps: TallyDeps, filter: AssetFilter) -> Self {
        Self { deps, filter }
    }

    /// Run one tally.
    ///
    /// Fails without writing anything if the ledgers cannot be loaded, the
    /// catalog cannot be fetched, or the primary host rate-limits us.
    pub async fn run(
        &self,
        started_at: NaiveDateTime,
        options: RunOptions,
    ) -> Result<RunSummary, CoreError> {
        let snapshot = self.deps.store.load(LedgerKind::Snapshot)?;
        let cumulative = self.deps.store.load(LedgerKind::Cumulative)?;

        let devices = self
            .deps
            .catalog
            .list_devices()
            .await
            .map_err(CoreError::Catalog)?;
        tracing::info!(count = devices.len(), "Fetched device catalog");

        let mut tally = Tally::new(snapshot, cumulative, self.filter.clone(), started_at);

        for device in &devices {
            tracing::info!("Processing {}...", device.label());

            let primary = fetch(self.deps.primary.as_ref(), device).await;
            if let Err(err) = &primary.result {
                if err.is_rate_limited() {
                    tracing::error!(
                        host = %primary.host,
                        codename = %device.codename,
                        "Rate limited, giving up before anything is written"
                    );
                    return Err(CoreError::RateLimited {
                        host: primary.host.clone(),
                        codename: device.codename.clone(),
                        status: err.status().unwrap_or_default(),
                    });
                }
            }

            let secondary = fetch(self.deps.secondary.as_ref(), device).await;
            tally.record_device(device, &primary, &secondary);
        }

        let outcome = tally.finish();
        let (snapshot_written, cumulative_written) = self.persist(&outcome, options)?;
        let notified = self.notify(&outcome, options).await;

        Ok(RunSummary {
            devices: devices.len(),
            total_diff: outcome.total_diff,
            snapshot_written,
            cumulative_written,
            notified,
            report: outcome.report,
        })
    }

    fn persist(&self, outcome: &TallyOutcome, options: RunOptions) -> Result<(bool, bool), CoreError> {
        if options.dry_run {
            tracing::info!("Dry run, ledgers not written");
            return Ok((false, false));
        }

        // Snapshot first: losing the cumulative write under-counts one run,
        // losing the snapshot write would count the same deltas twice.
        self.deps.store.save(LedgerKind::Snapshot, &outcome.snapshot)?;
        if outcome.cumulative_changed {
            self.deps
                .store
                .save(LedgerKind::Cumulative, &outcome.cumulative)?;
        }

        Ok((true, outcome.cumulative_changed))
    }

    async fn notify(&self, outcome: &TallyOutcome, options: RunOptions) -> bool {
        let Some(notifier) = &self.deps.notifier else {
            return false;
        };
        if options.dry_run || !outcome.has_growth() {
            return false;
        }

        match notifier.send(&outcome.report.to_string()).await {
            Ok(()) => {
                tracing::info!("Report sent");
                true
            }
            Err(e) => {
                tracing::warn!("Failed to send report: {e}");
                false
            }
        }
    }
}

async fn fetch(host: &dyn ReleaseHostPort, device: &Device) -> HostListing {
    HostListing::new(host.name(), host.list_releases(&device.codename).await)
}
